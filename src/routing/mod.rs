//! URL 패턴 컴파일과 미들웨어 디스패치의 핵심 기능을 제공하는 모듈입니다.

pub mod error;
pub mod handler;
pub mod matcher;
pub mod router;
pub mod table;

pub use error::{Exception, RoutingError};
pub use handler::{error_fn, ErrorHandle, Flow, Handle, Handler, HandlerResult};
pub use matcher::{PathMatch, PathPattern, PathPatternKind};
pub use router::{ErrorChannel, Router};
pub use table::{Method, MiddlewareEntry, MiddlewareTable};
