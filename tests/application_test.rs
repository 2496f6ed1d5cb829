use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{HeaderMap, Method as HttpMethod, StatusCode};
use serde_json::json;

use express_router::app::Application;
use express_router::http::{Request, Response};
use express_router::routing::{error_fn, Exception, Flow, Handler, Router};

fn create_request(method: HttpMethod, path: &str) -> Request {
    Request::new(method, path.parse().unwrap(), HeaderMap::new(), Bytes::new())
}

#[tokio::test]
async fn test_default_not_found() {
    let app = Application::new();

    let mut req = create_request(HttpMethod::GET, "/missing");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(&res.body()[..], b"Not Found");
}

#[tokio::test]
async fn test_default_on_error_writes_exception_status() {
    let mut app = Application::new();
    app.get(
        "/boom",
        vec![Handler::sync_fn(|_req: &mut Request, _res: &mut Response| {
            Err(Exception::new(418, "teapot"))
        })],
    )
    .unwrap();

    let mut req = create_request(HttpMethod::GET, "/boom");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
    assert_eq!(&res.body()[..], b"{\"message\":\"teapot\"}");
}

#[tokio::test]
async fn test_custom_on_error_responder() {
    let mut app = Application::new();
    app.get(
        "/boom",
        vec![Handler::sync_fn(|_req: &mut Request, _res: &mut Response| {
            Err(Exception::internal("boom"))
        })],
    )
    .unwrap();

    app.set_on_error(|_exception: &Exception, _req: &mut Request, res: &mut Response| {
        res.status(StatusCode::BAD_GATEWAY).send("custom");
    });

    let mut req = create_request(HttpMethod::GET, "/boom");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(&res.body()[..], b"custom");
}

#[tokio::test]
async fn test_router_error_handler_takes_precedence_over_root() {
    let mut app = Application::new();
    app.get(
        "/boom",
        vec![Handler::sync_fn(|_req: &mut Request, _res: &mut Response| {
            Err(Exception::internal("boom"))
        })],
    )
    .unwrap();

    app.on_error(error_fn(
        |exception: &Exception, _req: &mut Request, res: &mut Response| {
            res.status(StatusCode::SERVICE_UNAVAILABLE)
                .send(format!("handled: {}", exception.message()));
        },
    ));

    let mut req = create_request(HttpMethod::GET, "/boom");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(&res.body()[..], b"handled: boom");
}

#[tokio::test]
async fn test_json_body_roundtrip_through_hyper() {
    let mut app = Application::new();
    app.post(
        "/echo",
        vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
            let body = req.body().cloned().unwrap_or(json!(null));
            res.json(&json!({ "received": body }));
            Ok(Flow::Stop)
        })],
    )
    .unwrap();

    let hyper_req = hyper::Request::builder()
        .method(HttpMethod::POST)
        .uri("/echo")
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from_static(b"{\"name\":\"kim\"}")))
        .unwrap();

    let response = app.handle(hyper_req, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"{\"received\":{\"name\":\"kim\"}}");
}

#[tokio::test]
async fn test_invalid_json_body_surfaces_through_on_error() {
    let mut app = Application::new();
    app.post(
        "/echo",
        vec![Handler::sync_fn(|_req: &mut Request, _res: &mut Response| {
            Ok(Flow::Stop)
        })],
    )
    .unwrap();

    let hyper_req = hyper::Request::builder()
        .method(HttpMethod::POST)
        .uri("/echo")
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from_static(b"{broken")))
        .unwrap();

    let response = app.handle(hyper_req, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_controller_pair() {
    let mut users = Router::new();
    users
        .get(
            "/:id",
            vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
                res.json(&json!({ "id": req.param("id").unwrap_or("") }));
                Ok(Flow::Stop)
            })],
        )
        .unwrap();

    let mut app = Application::new();
    app.register(("/users".to_string(), users)).unwrap();

    let mut req = create_request(HttpMethod::GET, "/users/42");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(&res.body()[..], b"{\"id\":\"42\"}");
}

#[tokio::test]
async fn test_register_all_explicit_controller_list() {
    let mut users = Router::new();
    users
        .get(
            "/:id",
            vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
                res.send(format!("user {}", req.param("id").unwrap_or("")));
                Ok(Flow::Stop)
            })],
        )
        .unwrap();

    let mut books = Router::new();
    books
        .get(
            "/:id",
            vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
                res.send(format!("book {}", req.param("id").unwrap_or("")));
                Ok(Flow::Stop)
            })],
        )
        .unwrap();

    let mut app = Application::new();
    app.register_all(vec![
        ("/users".to_string(), users),
        ("/books".to_string(), books),
    ])
    .unwrap();

    let mut req = create_request(HttpMethod::GET, "/books/7");
    let mut res = Response::new();
    app.run(&mut req, &mut res).await;
    assert_eq!(&res.body()[..], b"book 7");

    let mut req = create_request(HttpMethod::GET, "/users/42");
    let mut res = Response::new();
    app.run(&mut req, &mut res).await;
    assert_eq!(&res.body()[..], b"user 42");
}

#[tokio::test]
async fn test_redirect_counts_as_written_response() {
    let mut app = Application::new();
    app.get(
        "/old",
        vec![Handler::sync_fn(|_req: &mut Request, res: &mut Response| {
            res.redirect("/new", None);
            Ok(Flow::Stop)
        })],
    )
    .unwrap();

    let mut req = create_request(HttpMethod::GET, "/old");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(res.status_code(), StatusCode::FOUND);
    assert_eq!(res.header("location"), Some("/new"));
}

#[tokio::test]
async fn test_query_map_available_to_handlers() {
    let mut app = Application::new();
    app.get(
        "/search",
        vec![Handler::sync_fn(|req: &mut Request, res: &mut Response| {
            let keyword = req.query().get("q").cloned().unwrap_or_default();
            res.send(keyword);
            Ok(Flow::Stop)
        })],
    )
    .unwrap();

    let mut req = create_request(HttpMethod::GET, "/search?q=rust");
    let mut res = Response::new();

    app.run(&mut req, &mut res).await;

    assert_eq!(&res.body()[..], b"rust");
}
