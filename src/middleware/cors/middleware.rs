use async_trait::async_trait;
use hyper::{header, Method, StatusCode};
use tracing::{debug, instrument};

use super::config::CorsConfig;
use crate::http::{Request, Response};
use crate::routing::{Flow, Handle, HandlerResult};

/// CORS 전략 핸들러입니다.
///
/// preflight(OPTIONS + Access-Control-Request-Method)는 설정에서 유도한
/// 헤더 전체를 기록하고 체인을 중단합니다. 그 외 요청은 단순 요청 헤더만
/// 기록하고 다음 핸들러로 진행합니다.
#[derive(Debug)]
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    /// Origin 검증
    fn validate_origin(&self, origin: &str) -> bool {
        self.config
            .allow_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }

    /// 설정에서 Allow-Origin 값을 결정합니다.
    fn derive_origin(&self, req: &Request) -> Option<String> {
        if self.config.allow_origins.is_empty()
            || self.config.allow_origins.iter().any(|origin| origin == "*")
        {
            return Some("*".to_string());
        }
        if self.config.allow_origins.len() == 1 {
            return Some(self.config.allow_origins[0].clone());
        }
        req.header(header::ORIGIN.as_str())
            .filter(|origin| self.validate_origin(origin))
            .map(String::from)
    }

    /// 단순 요청에도 쓰이는 기본 CORS 헤더 설정
    fn set_cors_headers(&self, req: &Request, res: &mut Response) {
        if let Some(origin) = self.derive_origin(req) {
            res.set(header::ACCESS_CONTROL_ALLOW_ORIGIN.as_str(), &origin);
        }

        if self.config.allow_credentials {
            res.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS.as_str(), "true");
        }
    }

    fn is_preflight(req: &Request) -> bool {
        *req.method() == Method::OPTIONS
            && req
                .header(header::ACCESS_CONTROL_REQUEST_METHOD.as_str())
                .is_some()
    }

    /// Preflight 요청 처리
    fn handle_preflight(&self, req: &Request, res: &mut Response) {
        self.set_cors_headers(req, res);

        let methods = if self.config.allow_methods.is_empty() {
            "*".to_string()
        } else {
            self.config.allow_methods.join(", ")
        };
        res.set(header::ACCESS_CONTROL_ALLOW_METHODS.as_str(), &methods);

        let headers = if self.config.allow_headers.is_empty() {
            "*".to_string()
        } else {
            self.config.allow_headers.join(", ")
        };
        res.set(header::ACCESS_CONTROL_ALLOW_HEADERS.as_str(), &headers);

        if let Some(max_age) = self.config.max_age {
            res.set(
                header::ACCESS_CONTROL_MAX_AGE.as_str(),
                &max_age.to_string(),
            );
        }

        res.status(StatusCode::NO_CONTENT);
    }
}

#[async_trait]
impl Handle for CorsMiddleware {
    #[instrument(skip(self, req, res))]
    async fn handle(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        if Self::is_preflight(req) {
            debug!("Handling CORS preflight request");
            self.handle_preflight(req, res);
            return Ok(Flow::Stop);
        }

        self.set_cors_headers(req, res);
        Ok(Flow::Continue)
    }
}
