//! 디스패치 엔진의 핸들러 계약 위에 올라가는 부속 미들웨어 모듈입니다.

pub mod cors;
pub mod parser;

pub use cors::{CorsConfig, CorsMiddleware};
pub use parser::{JsonParser, Parser, ParserRegistry, UrlEncodedParser};
