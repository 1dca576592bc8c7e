/// 라우트별 인증 요구 수준
///
/// `Required`는 토큰 해석 실패 시 즉시 에러 응답을 돌려주고,
/// `Optional`은 실패해도 사용자 없이 요청을 통과시킵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    Optional,
}
