//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, JSON 속성 추출
//! - [`http_client`] - 타임아웃이 걸린 외부 API 클라이언트

pub mod http_client;
pub mod string_utils;
