//! # 문자열 유틸리티
//!
//! 요청 값과 외부 프로바이더 응답에서 문자열을 꺼내고 정리하는 공통 함수들입니다.
//! 빈 문자열이나 공백만 있는 값은 "없음"으로 취급합니다.

use serde_json::{Map, Value};

use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Hello  ", "username").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "username").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// JSON 객체에서 문자열 속성 추출
///
/// 문자열은 정리해서, 숫자는 10진 표기로 돌려줍니다.
/// 키가 없거나, null이거나, 빈 문자열이거나, 다른 타입이면 `None`입니다.
///
/// # 예제
/// ```rust,ignore
/// let attrs = json!({ "id": 1234, "email": "  u@x.com ", "name": "" });
/// let attrs = attrs.as_object().unwrap();
///
/// assert_eq!(string_attr(attrs, "id"), Some("1234".to_string()));
/// assert_eq!(string_attr(attrs, "email"), Some("u@x.com".to_string()));
/// assert_eq!(string_attr(attrs, "name"), None);
/// ```
pub fn string_attr(attributes: &Map<String, Value>, key: &str) -> Option<String> {
    match attributes.get(key)? {
        Value::String(s) => clean_optional_string(Some(s.clone())),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JSON 객체에서 중첩 객체 속성 추출
pub fn object_attr<'a>(
    attributes: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    attributes.get(key).and_then(Value::as_object)
}
