use std::fmt;

use hyper::Method as HttpMethod;
use tracing::debug;

use crate::routing::handler::Handler;
use crate::routing::matcher::PathPattern;

/// 엔트리가 매칭할 HTTP 메서드입니다. `Any`는 모든 메서드와 매칭됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    Any,
}

impl Method {
    pub fn matches(&self, method: &HttpMethod) -> bool {
        match self {
            Method::Any => true,
            other => other.as_str() == method.as_str(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Any => "*",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 등록된 (메서드, 패턴, 핸들러 체인) 하나를 담는 엔트리입니다.
///
/// 등록 이후에는 변경되지 않습니다. 패턴이 없으면 모든 경로와 매칭됩니다.
pub struct MiddlewareEntry {
    method: Method,
    pattern: Option<PathPattern>,
    chain: Vec<Handler>,
}

impl MiddlewareEntry {
    pub fn new(method: Method, pattern: Option<PathPattern>, chain: Vec<Handler>) -> Self {
        Self {
            method,
            pattern,
            chain,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> Option<&PathPattern> {
        self.pattern.as_ref()
    }

    pub fn chain(&self) -> &[Handler] {
        &self.chain
    }
}

/// 등록 순서를 보존하는 미들웨어 테이블입니다.
///
/// 추가만 가능하며, 겹치는 패턴의 우선순위는 등록 순서가 유일한 기준입니다.
#[derive(Default)]
pub struct MiddlewareTable {
    entries: Vec<MiddlewareEntry>,
}

impl MiddlewareTable {
    pub fn new() -> Self {
        MiddlewareTable {
            entries: Vec::new(),
        }
    }

    /// 테이블 끝에 엔트리를 추가합니다.
    pub fn add(&mut self, entry: MiddlewareEntry) {
        debug!(
            method = %entry.method(),
            pattern = entry.pattern().map(|p| p.source()).unwrap_or("*"),
            handlers = entry.chain().len(),
            "미들웨어 엔트리 등록"
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MiddlewareEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
