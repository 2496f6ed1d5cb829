use express_router::http::{Request, Response};
use express_router::routing::{
    Flow, Handler, Method, MiddlewareEntry, MiddlewareTable, PathPattern,
};
use hyper::Method as HttpMethod;

fn noop_handler() -> Handler {
    Handler::sync_fn(|_req: &mut Request, _res: &mut Response| Ok(Flow::Continue))
}

#[test]
fn test_method_matching() {
    let test_cases = vec![
        // (등록 메서드, 요청 메서드, 예상 결과)
        (Method::Get, HttpMethod::GET, true),
        (Method::Get, HttpMethod::POST, false),
        (Method::Post, HttpMethod::POST, true),
        (Method::Any, HttpMethod::GET, true),
        (Method::Any, HttpMethod::DELETE, true),
        (Method::Options, HttpMethod::OPTIONS, true),
        (Method::Head, HttpMethod::GET, false),
    ];

    for (method, request_method, expected) in test_cases {
        assert_eq!(
            method.matches(&request_method),
            expected,
            "메서드 {}, 요청 {}, 예상 결과 {}",
            method,
            request_method,
            expected
        );
    }
}

#[test]
fn test_table_preserves_registration_order() {
    let mut table = MiddlewareTable::new();

    for pattern in ["/first", "/second", "/third"] {
        table.add(MiddlewareEntry::new(
            Method::Any,
            Some(PathPattern::compile(pattern).unwrap()),
            vec![noop_handler()],
        ));
    }

    let sources: Vec<&str> = table
        .entries()
        .iter()
        .map(|entry| entry.pattern().map(|p| p.source()).unwrap_or("*"))
        .collect();

    assert_eq!(sources, vec!["/first", "/second", "/third"]);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_entry_without_pattern_matches_any_path() {
    let entry = MiddlewareEntry::new(Method::Any, None, vec![noop_handler()]);
    assert!(entry.pattern().is_none());
    assert_eq!(entry.chain().len(), 1);
}

#[test]
fn test_empty_table() {
    let table = MiddlewareTable::new();
    assert!(table.is_empty());
    assert!(table.entries().is_empty());
}
