use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::http::{Request, Response};
use crate::routing::error::Exception;
use crate::routing::router::Router;

/// 핸들러가 디스패치 엔진에 전달하는 진행 신호입니다.
///
/// `Stop`은 이 요청의 남은 핸들러와 엔트리 실행을 모두 중단합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub type HandlerResult = Result<Flow, Exception>;

/// 요청/응답을 처리하는 핸들러 인터페이스입니다.
///
/// 동기/비동기 구현 모두 디스패치 엔진이 동일하게 await 합니다.
#[async_trait]
pub trait Handle: Send + Sync {
    async fn handle(&self, req: &mut Request, res: &mut Response) -> HandlerResult;
}

/// 체인 실행 중 발생한 예외를 전달받는 에러 핸들러 인터페이스입니다.
///
/// 에러 핸들러가 끝나면 해당 요청의 디스패치도 끝납니다. 원래 체인으로의
/// 복귀는 없습니다.
#[async_trait]
pub trait ErrorHandle: Send + Sync {
    async fn handle(&self, exception: &Exception, req: &mut Request, res: &mut Response);
}

/// 테이블에 등록되는 핸들러입니다. 함수형 핸들러 또는 중첩 라우터입니다.
#[derive(Clone)]
pub enum Handler {
    Func(Arc<dyn Handle>),
    Router(Arc<Router>),
}

impl Handler {
    pub fn func(handler: impl Handle + 'static) -> Self {
        Handler::Func(Arc::new(handler))
    }

    /// 동기 클로저를 핸들러로 감쌉니다.
    pub fn sync_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        Handler::Func(Arc::new(SyncFn(f)))
    }

    /// boxed future를 반환하는 함수를 핸들러로 감쌉니다.
    pub fn async_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut Request, &'a mut Response) -> BoxFuture<'a, HandlerResult>
            + Send
            + Sync
            + 'static,
    {
        Handler::Func(Arc::new(AsyncFn(f)))
    }
}

impl From<Router> for Handler {
    fn from(router: Router) -> Self {
        Handler::Router(Arc::new(router))
    }
}

/// 동기 클로저를 에러 핸들러로 감쌉니다.
pub fn error_fn<F>(f: F) -> impl ErrorHandle + 'static
where
    F: Fn(&Exception, &mut Request, &mut Response) + Send + Sync + 'static,
{
    SyncErrorFn(f)
}

struct SyncFn<F>(F);

#[async_trait]
impl<F> Handle for SyncFn<F>
where
    F: Fn(&mut Request, &mut Response) -> HandlerResult + Send + Sync,
{
    async fn handle(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        (self.0)(req, res)
    }
}

struct AsyncFn<F>(F);

#[async_trait]
impl<F> Handle for AsyncFn<F>
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response) -> BoxFuture<'a, HandlerResult>
        + Send
        + Sync,
{
    async fn handle(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        (self.0)(req, res).await
    }
}

struct SyncErrorFn<F>(F);

#[async_trait]
impl<F> ErrorHandle for SyncErrorFn<F>
where
    F: Fn(&Exception, &mut Request, &mut Response) + Send + Sync,
{
    async fn handle(&self, exception: &Exception, req: &mut Request, res: &mut Response) {
        (self.0)(exception, req, res)
    }
}
