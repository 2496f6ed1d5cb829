use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Uri};
use url::form_urlencoded;

/// 원시 HTTP 메시지를 감싸는 요청 어댑터입니다.
///
/// 헤더/경로/메서드 조회와 함께 디스패치가 누적하는 `params`, `query`,
/// `base_url` 상태를 노출합니다. `params`와 `query`는 한 요청의 디스패치
/// 동안 추가만 됩니다.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    raw_body: Bytes,
    remote_addr: Option<SocketAddr>,
    base_url: String,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl Request {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        let query = parse_query(&uri);
        Self {
            method,
            uri,
            headers,
            raw_body: body,
            remote_addr: None,
            base_url: String::new(),
            params: HashMap::new(),
            query,
            body: None,
        }
    }

    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self::new(parts.method, parts.uri, parts.headers, body)
    }

    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// 쿼리 문자열을 제외한 경로를 반환합니다.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// 클라이언트가 보낸 원본 URL을 반환합니다.
    pub fn original_url(&self) -> String {
        self.uri.to_string()
    }

    /// 이름으로 헤더 값을 조회합니다. 이름은 대소문자를 구분하지 않습니다.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Host 헤더에서 포트를 제외한 호스트 이름을 반환합니다.
    pub fn hostname(&self) -> Option<&str> {
        self.header("host").and_then(|host| host.split(':').next())
    }

    /// 클라이언트 IP 주소를 반환합니다.
    pub fn ip(&self) -> Option<String> {
        self.remote_addr.map(|addr| addr.ip().to_string())
    }

    /// X-Forwarded-For 헤더에 실린 IP 목록을 반환합니다. 헤더가 없으면 빈 목록입니다.
    pub fn ips(&self) -> Vec<String> {
        self.header("x-forwarded-for")
            .map(|value| value.split(',').map(|ip| ip.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Content-Type이 주어진 MIME 타입과 일치하면 true를 반환합니다.
    pub fn is(&self, mime: &str) -> bool {
        self.header("content-type")
            .map(|content_type| content_type.starts_with(mime))
            .unwrap_or(false)
    }

    /// 상위 라우터들이 소비한 경로 접두사입니다.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn set_base_url(&mut self, base: String) {
        self.base_url = base;
    }

    pub(crate) fn extend_base_url(&mut self, extension: &str) {
        self.base_url.push_str(extension);
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.query
    }

    /// 파서가 디코딩하기 전의 원본 본문입니다.
    pub fn raw_body(&self) -> &Bytes {
        &self.raw_body
    }

    /// 파서 레지스트리가 채운 디코딩된 본문입니다.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, value: serde_json::Value) {
        self.body = Some(value);
    }
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    match uri.query() {
        Some(query) => form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => HashMap::new(),
    }
}
