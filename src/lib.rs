//! Express 스타일의 HTTP 라우팅/미들웨어 디스패치 엔진입니다.
//!
//! # 주요 기능
//!
//! - 메서드 + URL 패턴(`:param`, 후행 `*`) 기반 라우팅
//! - 등록 순서가 보존되는 핸들러 체인과 Continue/Stop 신호
//! - 중첩 라우터 합성과 라우터별 에러 핸들러
//! - CORS preflight 전략
//! - 이름 붙은 파서 레지스트리
//!
//! # 예제
//!
//! ```
//! use express_router::http::{Request, Response};
//! use express_router::routing::{Flow, Handler, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/:id", vec![Handler::sync_fn(
//!     |req: &mut Request, res: &mut Response| {
//!         let id = req.param("id").unwrap_or("").to_string();
//!         res.send(id);
//!         Ok(Flow::Stop)
//!     },
//! )]).unwrap();
//! ```
//!
//! # 중첩 라우터
//!
//! ```
//! use express_router::http::{Request, Response};
//! use express_router::routing::{Flow, Handler, Router};
//!
//! let mut users = Router::new();
//! users.get("/:id", vec![Handler::sync_fn(
//!     |req: &mut Request, res: &mut Response| {
//!         res.send(format!("user {}", req.param("id").unwrap_or("")));
//!         Ok(Flow::Stop)
//!     },
//! )]).unwrap();
//!
//! let mut root = Router::new();
//! root.mount("/users/*", vec![Handler::from(users)]).unwrap();
//! ```

pub mod app;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod settings;
