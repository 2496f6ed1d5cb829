use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::http::{Request, Response};
use crate::routing::error::{Exception, RoutingError};
use crate::routing::handler::{ErrorHandle, Flow, Handler};
use crate::routing::matcher::{normalize_path, PathPattern};
use crate::routing::table::{Method, MiddlewareEntry, MiddlewareTable};

/// 라우터별 에러 핸들러 슬롯입니다.
///
/// 슬롯은 하나뿐이며 새 등록은 기존 핸들러를 교체합니다.
#[derive(Default)]
pub struct ErrorChannel {
    slot: Option<Arc<dyn ErrorHandle>>,
}

impl ErrorChannel {
    pub fn replace(&mut self, handler: Arc<dyn ErrorHandle>) {
        if self.slot.is_some() {
            debug!("기존 에러 핸들러를 교체");
        }
        self.slot = Some(handler);
    }

    pub fn get(&self) -> Option<Arc<dyn ErrorHandle>> {
        self.slot.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// 미들웨어 테이블과 에러 채널을 소유하는 라우터입니다.
///
/// 등록된 엔트리를 등록 순서대로 매칭해 핸들러 체인을 실행하고,
/// 중첩 라우터로 재귀 디스패치합니다.
#[derive(Default)]
pub struct Router {
    table: MiddlewareTable,
    errors: ErrorChannel,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MiddlewareTable {
        &self.table
    }

    /// 모든 등록 경로가 거치는 표준 등록 함수입니다.
    ///
    /// 패턴이 없으면 모든 경로와 매칭됩니다. 잘못된 패턴과 빈 체인은
    /// 등록 시점에 실패합니다.
    pub fn add(
        &mut self,
        method: Method,
        pattern: Option<&str>,
        chain: Vec<Handler>,
    ) -> Result<(), RoutingError> {
        if chain.is_empty() {
            return Err(RoutingError::EmptyChain {
                method: method.to_string(),
                pattern: pattern.unwrap_or("*").to_string(),
            });
        }

        let compiled = match pattern {
            Some(source) => Some(PathPattern::compile(source)?),
            None => None,
        };

        self.table.add(MiddlewareEntry::new(method, compiled, chain));
        Ok(())
    }

    /// 모든 메서드, 모든 경로에 대한 체인을 등록합니다.
    pub fn bind_all(&mut self, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Any, None, chain)
    }

    /// 모든 메서드, 특정 URL에 대한 체인을 등록합니다.
    pub fn mount(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Any, Some(url), chain)
    }

    /// 특정 메서드와 URL에 대한 체인을 등록합니다.
    pub fn bind(
        &mut self,
        method: Method,
        url: &str,
        chain: Vec<Handler>,
    ) -> Result<(), RoutingError> {
        self.add(method, Some(url), chain)
    }

    pub fn get(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Get, Some(url), chain)
    }

    pub fn post(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Post, Some(url), chain)
    }

    pub fn put(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Put, Some(url), chain)
    }

    pub fn patch(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Patch, Some(url), chain)
    }

    pub fn delete(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Delete, Some(url), chain)
    }

    pub fn options(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Options, Some(url), chain)
    }

    pub fn head(&mut self, url: &str, chain: Vec<Handler>) -> Result<(), RoutingError> {
        self.add(Method::Head, Some(url), chain)
    }

    /// 에러 핸들러를 등록합니다. 기존 핸들러는 교체됩니다.
    pub fn on_error(&mut self, handler: impl ErrorHandle + 'static) {
        self.errors.replace(Arc::new(handler));
    }

    /// (base 경로, 라우터) 쌍으로 만들어진 컨트롤러를 등록합니다.
    pub fn register(&mut self, controller: (String, Router)) -> Result<(), RoutingError> {
        let (base, router) = controller;
        let trimmed = base.trim_end_matches('/');
        let pattern = if trimmed.ends_with("/*") {
            trimmed.to_string()
        } else {
            format!("{}/*", trimmed)
        };
        self.mount(&pattern, vec![Handler::from(router)])
    }

    /// 명시적 컨트롤러 목록을 순서대로 등록합니다.
    pub fn register_all(
        &mut self,
        controllers: Vec<(String, Router)>,
    ) -> Result<(), RoutingError> {
        for controller in controllers {
            self.register(controller)?;
        }
        Ok(())
    }

    /// 요청을 매칭되는 엔트리들로 디스패치합니다.
    ///
    /// `Ok(Flow::Stop)`은 어떤 핸들러가 명시적으로 중단한 경우이고,
    /// 매칭 실패나 정상 완료는 `Ok(Flow::Continue)`입니다. 복구되지 않은
    /// 예외는 `Err`로 상위 라우터에 전파됩니다.
    pub fn dispatch<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
    ) -> BoxFuture<'a, Result<Flow, Exception>> {
        Box::pin(self.dispatch_inner(req, res))
    }

    async fn dispatch_inner(
        &self,
        req: &mut Request,
        res: &mut Response,
    ) -> Result<Flow, Exception> {
        debug!(
            method = %req.method(),
            path = req.path(),
            base = req.base_url(),
            entries = self.table.len(),
            "디스패치 시작"
        );

        for entry in self.table.entries() {
            if !entry.method().matches(req.method()) {
                continue;
            }

            // 상위 라우터가 소비한 접두사를 제거한 상대 경로로 매칭한다.
            let base_len = normalize_path(req.base_url()).len();
            let full = normalize_path(req.path()).to_string();
            let local = full.get(base_len..).unwrap_or("").to_string();

            let matched = match entry.pattern() {
                Some(pattern) => match pattern.find(&local) {
                    Some(found) => Some(found),
                    None => continue,
                },
                None => None,
            };

            // 캡처된 파라미터 병합. 같은 사이클에서 먼저 기록된 키가 유지된다.
            if let (Some(pattern), Some(found)) = (entry.pattern(), matched.as_ref()) {
                for (name, value) in pattern.param_names().iter().zip(found.params.iter()) {
                    req.params_mut()
                        .entry(name.clone())
                        .or_insert_with(|| value.clone());
                }
            }

            let consumed = matched.as_ref().map(|found| found.consumed).unwrap_or(0);

            for handler in entry.chain() {
                let signal = match handler {
                    Handler::Func(func) => func.handle(req, res).await,
                    Handler::Router(sub) => self.descend(sub.as_ref(), consumed, req, res).await,
                };

                match signal {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Stop) => return Ok(Flow::Stop),
                    Err(exception) => return self.recover(exception, req, res).await,
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// 중첩 라우터로 하강합니다. 소비된 접두사만큼 base URL을 확장합니다.
    async fn descend(
        &self,
        sub: &Router,
        consumed: usize,
        req: &mut Request,
        res: &mut Response,
    ) -> Result<Flow, Exception> {
        let saved = req.base_url().to_string();
        if consumed > 0 {
            let full = normalize_path(req.path()).to_string();
            if let Some(extension) = full.get(saved.len()..saved.len() + consumed) {
                let extension = extension.to_string();
                req.extend_base_url(&extension);
            }
        }

        match sub.dispatch(req, res).await {
            // 하위 라우터가 진행을 선택하면 형제 엔트리 매칭을 위해 base를 복원한다.
            Ok(Flow::Continue) => {
                req.set_base_url(saved);
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    /// 예외를 이 라우터의 에러 핸들러로 복구하거나 상위로 전파합니다.
    async fn recover(
        &self,
        exception: Exception,
        req: &mut Request,
        res: &mut Response,
    ) -> Result<Flow, Exception> {
        match self.errors.get() {
            Some(handler) => {
                warn!(
                    status = exception.status(),
                    error = %exception,
                    "핸들러 예외를 에러 핸들러로 전달"
                );
                handler.handle(&exception, req, res).await;
                // 에러 핸들러가 끝나면 이 요청의 디스패치도 끝난다.
                Ok(Flow::Stop)
            }
            None => Err(exception),
        }
    }
}
