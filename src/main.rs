use std::net::SocketAddr;
use std::process;

use hyper::StatusCode;
use serde_json::json;
use tracing::error;

use express_router::app::Application;
use express_router::http::{Request, Response};
use express_router::logging::init_logging;
use express_router::middleware::cors::CorsConfig;
use express_router::routing::{error_fn, Exception, Flow, Handler, Router};
use express_router::settings::ServerSettings;

#[tokio::main]
async fn main() {
    init_logging();

    let settings = match ServerSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "설정 로딩 실패");
            process::exit(1);
        }
    };

    let mut app = Application::new();

    app.bind_all(vec![Application::cors(CorsConfig::default())])
        .expect("CORS 미들웨어 등록 실패");

    app.get(
        "/health",
        vec![Handler::sync_fn(|_req: &mut Request, res: &mut Response| {
            res.json(&json!({ "status": "ok" }));
            Ok(Flow::Stop)
        })],
    )
    .expect("라우트 등록 실패");

    let mut users = Router::new();
    users
        .get(
            "/:id",
            vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
                let id = req.param("id").unwrap_or_default().to_string();
                res.json(&json!({ "id": id }));
                Ok(Flow::Stop)
            })],
        )
        .expect("라우트 등록 실패");
    app.register(("/users".to_string(), users))
        .expect("컨트롤러 등록 실패");

    app.on_error(error_fn(
        |exception: &Exception, _req: &mut Request, res: &mut Response| {
            res.status(StatusCode::INTERNAL_SERVER_ERROR)
                .json(&exception.to_json());
        },
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.http_port));
    if let Err(e) = app.listen(addr).await {
        error!(error = %e, "서버 실행 실패");
        process::exit(1);
    }
}
