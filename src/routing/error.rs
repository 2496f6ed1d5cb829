use serde_json::json;

/// 라우트 등록 관련 에러를 표현하는 열거형입니다.
///
/// 디스패치 중에는 발생하지 않고 등록 시점에만 반환됩니다.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// 잘못된 경로 패턴
    #[error("잘못된 경로 패턴: {pattern} ({reason})")]
    InvalidPathPattern { pattern: String, reason: String },

    /// 핸들러가 하나도 없는 등록 요청
    #[error("핸들러 체인이 비어 있음: {method} {pattern}")]
    EmptyChain { method: String, pattern: String },
}

/// 핸들러 실행 중 발생한 예외입니다.
///
/// HTTP 상태 코드와 메시지, 선택적 부가 정보를 담습니다. 디스패치 엔진은
/// 이 값을 가장 가까운 에러 핸들러 또는 최상위 `on_error`로 전달합니다.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Exception {
    status: u16,
    message: String,
    info: Option<serde_json::Value>,
}

impl Exception {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            info: None,
        }
    }

    /// 부가 정보를 포함한 예외를 생성합니다.
    pub fn with_info(status: u16, message: impl Into<String>, info: serde_json::Value) -> Self {
        Self {
            status,
            message: message.into(),
            info: Some(info),
        }
    }

    /// 500 Internal Server Error 예외를 생성합니다.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn info(&self) -> Option<&serde_json::Value> {
        self.info.as_ref()
    }

    /// 응답 본문으로 쓸 수 있는 JSON 표현을 반환합니다.
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "message": self.message })
    }
}

impl From<&str> for Exception {
    fn from(message: &str) -> Self {
        Exception::internal(message)
    }
}

impl From<String> for Exception {
    fn from(message: String) -> Self {
        Exception::internal(message)
    }
}
