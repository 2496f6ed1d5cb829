use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;
use tracing::{debug, error};

use crate::http::{Request, Response};
use crate::middleware::cors::{CorsConfig, CorsMiddleware};
use crate::middleware::parser::{JsonParser, Parser, ParserRegistry, UrlEncodedParser};
use crate::routing::{ErrorHandle, Exception, Flow, Handler, Method, Router, RoutingError};
use crate::server::{Server, ServerError};

/// 복구되지 않은 예외를 응답으로 바꾸는 최상위 책임자 시그니처입니다.
pub type ErrorResponder = dyn Fn(&Exception, &mut Request, &mut Response) + Send + Sync;

/// 최상위 라우터와 파서 레지스트리를 소유하는 조립 루트입니다.
///
/// 라우터를 상속하지 않고 합성으로 소유하며, 등록 메서드는 위임입니다.
pub struct Application {
    router: Router,
    parsers: ParserRegistry,
    on_error: Arc<ErrorResponder>,
}

impl Application {
    pub fn new() -> Self {
        let mut parsers = ParserRegistry::new();
        parsers.add("json", JsonParser);
        parsers.add("urlencoded", UrlEncodedParser);

        Self {
            router: Router::new(),
            parsers,
            on_error: Arc::new(default_on_error),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub fn bind_all(&mut self, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.bind_all(chain)
    }

    pub fn mount(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.mount(url, chain)
    }

    pub fn bind(
        &mut self,
        method: Method,
        url: &str,
        chain: Vec<Handler>,
    ) -> Result<(), RoutingError> {
        self.router.bind(method, url, chain)
    }

    pub fn get(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.get(url, chain)
    }

    pub fn post(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.post(url, chain)
    }

    pub fn put(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.put(url, chain)
    }

    pub fn patch(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.patch(url, chain)
    }

    pub fn delete(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.delete(url, chain)
    }

    pub fn options(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.options(url, chain)
    }

    pub fn head(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.router.head(url, chain)
    }

    pub fn on_error(&mut self, handler: impl ErrorHandle + 'static) {
        self.router.on_error(handler);
    }

    pub fn register(&mut self, controller: (String, Router)) -> Result<(), RoutingError> {
        self.router.register(controller)
    }

    pub fn register_all(
        &mut self,
        controllers: Vec<(String, Router)>,
    ) -> Result<(), RoutingError> {
        self.router.register_all(controllers)
    }

    /// 이름을 붙여 파서를 추가합니다. 먼저 매칭되는 파서가 사용됩니다.
    pub fn add_parser(&mut self, name: &str, parser: impl Parser + 'static) {
        self.parsers.add(name, parser);
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// 복구되지 않은 예외에 대한 최상위 응답자를 교체합니다.
    pub fn set_on_error(
        &mut self,
        responder: impl Fn(&Exception, &mut Request, &mut Response) + Send + Sync + 'static,
    ) {
        self.on_error = Arc::new(responder);
    }

    /// 설정으로부터 CORS 전략 핸들러를 만듭니다.
    pub fn cors(config: CorsConfig) -> Handler {
        Handler::func(CorsMiddleware::new(config))
    }

    /// 한 요청의 전체 수명입니다: 파서 디코딩, 디스패치, 기본 not-found.
    pub async fn run(&self, req: &mut Request, res: &mut Response) {
        // 1. 본문 디코딩
        if let Err(exception) = self.parsers.decode(req) {
            (self.on_error)(&exception, req, res);
            return;
        }

        // 2. 디스패치
        match self.router.dispatch(req, res).await {
            Ok(Flow::Continue) if !res.body_written() => {
                // 3. 매칭 없음은 에러가 아니다. 기본 not-found를 적용한다.
                debug!(path = req.path(), "매칭된 엔트리 없음");
                res.status(StatusCode::NOT_FOUND).send("Not Found");
            }
            Ok(_) => {}
            Err(exception) => {
                error!(
                    status = exception.status(),
                    error = %exception,
                    "복구되지 않은 예외"
                );
                (self.on_error)(&exception, req, res);
            }
        }
    }

    /// hyper 요청을 어댑터로 변환해 처리하고 hyper 응답으로 되돌립니다.
    pub async fn handle<B>(
        &self,
        req: hyper::Request<B>,
        remote_addr: Option<SocketAddr>,
    ) -> hyper::Response<Full<Bytes>>
    where
        B: hyper::body::Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                error!(error = %e, "요청 본문 수신 실패");
                let mut res = Response::new();
                res.status(StatusCode::BAD_REQUEST).send("Bad Request");
                return res.into_hyper();
            }
        };

        let mut request = Request::from_parts(parts, bytes);
        if let Some(addr) = remote_addr {
            request = request.with_remote_addr(addr);
        }
        let mut response = Response::new();

        self.run(&mut request, &mut response).await;
        response.into_hyper()
    }

    /// HTTP 리스너를 시작합니다.
    pub async fn listen(self, addr: SocketAddr) -> Result<(), ServerError> {
        let server = Server::bind(addr).await?;
        server.run(Arc::new(self)).await
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn default_on_error(exception: &Exception, _req: &mut Request, res: &mut Response) {
    let status = StatusCode::from_u16(exception.status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    res.status(status).json(&exception.to_json());
}
