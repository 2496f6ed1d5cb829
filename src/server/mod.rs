//! 연결 수락과 요청 전달을 담당하는 서버 모듈입니다.

mod listener;

pub use listener::{Server, ServerError};
