use express_router::routing::{PathPattern, PathPatternKind};

#[test]
fn test_path_pattern_creation() {
    let test_cases = vec![
        // (패턴, 매칭 종류, 성공 여부)
        ("/api", Some(PathPatternKind::Exact), true),
        ("/api/*", Some(PathPatternKind::Prefix), true),
        ("/users/:id", Some(PathPatternKind::Exact), true),
        ("/users/:id/books/:bookId", Some(PathPatternKind::Exact), true),
        ("/", Some(PathPatternKind::Exact), true),
        ("/*", Some(PathPatternKind::Prefix), true),
        ("api", None, false),            // 슬래시로 시작하지 않음
        ("/a*b", None, false),           // 와일드카드가 끝이 아님
        ("/users/:/books", None, false), // 빈 파라미터 이름
    ];

    for (pattern, expected_kind, should_succeed) in test_cases {
        let result = PathPattern::compile(pattern);
        if should_succeed {
            let compiled =
                result.unwrap_or_else(|e| panic!("패턴 '{}' 컴파일 실패: {}", pattern, e));
            assert_eq!(
                Some(compiled.kind.clone()),
                expected_kind,
                "패턴 '{}': 예상 종류 {:?}, 실제 종류 {:?}",
                pattern,
                expected_kind,
                compiled.kind
            );
        } else {
            assert!(result.is_err(), "패턴 '{}'은 실패해야 하는데 성공함", pattern);
        }
    }
}

#[test]
fn test_path_pattern_matching() {
    let test_cases = vec![
        // (패턴, 테스트 경로, 예상 결과)
        // Exact 매칭
        ("/api", "/api", true),
        ("/api", "/api/", true),
        ("/api", "/api/users", false),
        ("/api", "/apis", false),
        // Prefix 매칭
        ("/api/*", "/api", true),
        ("/api/*", "/api/", true),
        ("/api/*", "/api/users", true),
        ("/api/*", "/api/users/123", true),
        ("/api/*", "/apis", false),
        ("/api/*", "/api-v2", false),
        // 파라미터 매칭
        ("/users/:id", "/users/42", true),
        ("/users/:id", "/users/42/books", false),
        ("/users/:id", "/users", false),
        // 루트
        ("/", "/", true),
        ("/", "/api", false),
        ("/*", "/", true),
        ("/*", "/anything", true),
    ];

    for (pattern, path, expected) in test_cases {
        let compiled = PathPattern::compile(pattern)
            .unwrap_or_else(|_| panic!("패턴 '{}' 컴파일 실패", pattern));

        assert_eq!(
            compiled.find(path).is_some(),
            expected,
            "패턴: '{}', 경로: '{}', 예상 결과: {}",
            pattern,
            path,
            expected
        );
    }
}

#[test]
fn test_param_capture() {
    let pattern = PathPattern::compile("/users/:id/books/:bookId").unwrap();

    assert_eq!(
        pattern.param_names(),
        &["id".to_string(), "bookId".to_string()]
    );

    let matched = pattern.find("/users/42/books/7").expect("매칭되어야 함");
    assert_eq!(matched.params, vec!["42".to_string(), "7".to_string()]);
}

#[test]
fn test_compilation_idempotence() {
    // 같은 패턴을 두 번 컴파일해도 같은 경로에서 같은 바인딩이 나와야 함
    let first = PathPattern::compile("/users/:id/books/:bookId").unwrap();
    let second = PathPattern::compile("/users/:id/books/:bookId").unwrap();

    assert_eq!(first, second);

    let first_match = first.find("/users/42/books/7").unwrap();
    let second_match = second.find("/users/42/books/7").unwrap();
    assert_eq!(first_match, second_match);
}

#[test]
fn test_wildcard_trailing_match() {
    let pattern = PathPattern::compile("/static/*").unwrap();

    let matched = pattern.find("/static/css/a.css").expect("매칭되어야 함");
    assert!(matched.params.is_empty(), "이름 있는 파라미터가 없어야 함");
    assert_eq!(matched.consumed, "/static".len());
}

#[test]
fn test_wildcard_with_params_consumed_prefix() {
    let pattern = PathPattern::compile("/users/:id/*").unwrap();

    let matched = pattern.find("/users/42/files/readme").expect("매칭되어야 함");
    assert_eq!(matched.params, vec!["42".to_string()]);
    assert_eq!(matched.consumed, "/users/42".len());
}

#[test]
fn test_trailing_slash_normalization() {
    let pattern = PathPattern::compile("/a/").unwrap();
    assert!(pattern.find("/a").is_some());
    assert!(pattern.find("/a/").is_some());

    let pattern = PathPattern::compile("/a").unwrap();
    assert!(pattern.find("/a/").is_some());
}

#[test]
fn test_literal_escaping() {
    // '.'이 정규식 메타문자로 해석되면 안 됨
    let pattern = PathPattern::compile("/files/a.txt").unwrap();
    assert!(pattern.find("/files/a.txt").is_some());
    assert!(pattern.find("/files/aXtxt").is_none());
}
