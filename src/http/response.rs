use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE, LOCATION};
use hyper::{HeaderMap, StatusCode};
use tracing::warn;

/// 상태/헤더/본문을 모아 hyper 응답으로 변환되는 응답 어댑터입니다.
///
/// 모든 설정 메서드는 체이닝을 위해 `&mut Self`를 반환합니다.
/// "이미 전송됨" 여부는 추적하지 않습니다. 그 규율은 핸들러의 몫입니다.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    body_written: bool,
    locals: HashMap<String, serde_json::Value>,
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            body_written: false,
            locals: HashMap::new(),
        }
    }

    /// 응답 상태 코드를 설정합니다.
    pub fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// 헤더를 설정합니다. 같은 이름의 기존 값은 교체됩니다.
    pub fn set(&mut self, name: &str, value: &str) -> &mut Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                warn!(name, "잘못된 헤더 이름 또는 값, 무시");
            }
        }
        self
    }

    /// 같은 이름의 헤더에 값을 추가합니다.
    pub fn append(&mut self, name: &str, value: &str) -> &mut Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => {
                warn!(name, "잘못된 헤더 이름 또는 값, 무시");
            }
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 본문을 설정합니다.
    pub fn send(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self.body_written = true;
        self
    }

    /// JSON 본문을 설정하고 Content-Type을 지정합니다.
    pub fn json(&mut self, value: &serde_json::Value) -> &mut Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Bytes::from(value.to_string());
        self.body_written = true;
        self
    }

    /// 지정한 URL로 리다이렉트합니다. 상태 코드 기본값은 302입니다.
    pub fn redirect(&mut self, url: &str, status: Option<StatusCode>) -> &mut Self {
        self.status = status.unwrap_or(StatusCode::FOUND);
        match HeaderValue::try_from(url) {
            Ok(value) => {
                self.headers.insert(LOCATION, value);
            }
            Err(_) => {
                warn!(url, "잘못된 리다이렉트 URL, 무시");
            }
        }
        self.body_written = true;
        self
    }

    /// 같은 요청의 뒤 핸들러가 읽을 수 있는 요청 범위 상태입니다.
    pub fn locals(&self) -> &HashMap<String, serde_json::Value> {
        &self.locals
    }

    pub fn locals_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.locals
    }

    /// 핸들러가 본문을 기록했는지 여부입니다. 호출자의 기본 404 처리에 쓰입니다.
    pub fn body_written(&self) -> bool {
        self.body_written
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut response = hyper::Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
