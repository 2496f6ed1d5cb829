use regex_lite as regex;

use crate::routing::error::RoutingError;

/// 경로 매칭 결과입니다.
///
/// `params`는 패턴의 파라미터 이름 순서와 같은 순서의 캡처 값이고,
/// `consumed`는 와일드카드 앞까지 매칭된 고정 접두사의 바이트 길이입니다.
/// 중첩 라우터는 `consumed`만큼 base URL을 확장합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    pub params: Vec<String>,
    pub consumed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPatternKind {
    Exact,
    Prefix,
}

/// 컴파일된 URL 패턴입니다.
///
/// `:name`은 경로 한 세그먼트를 캡처하고, 후행 `*`는 열린 접미사를
/// 매칭합니다. 같은 패턴 문자열은 항상 동작이 동일한 매처로 컴파일됩니다.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub kind: PathPatternKind,
    pattern: String,
    param_names: Vec<String>,
    regex: regex::Regex,
}

/// 후행 슬래시를 제거해 `/a`와 `/a/`를 동일하게 취급합니다. 루트는 빈 문자열이 됩니다.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.trim_end_matches('/')
}

fn escape_literal(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for ch in segment.chars() {
        if matches!(
            ch,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl PathPattern {
    /// 패턴 문자열을 매처로 컴파일합니다.
    ///
    /// 잘못된 패턴은 등록 시점에 `RoutingError`로 즉시 실패합니다.
    pub fn compile(pattern: &str) -> Result<Self, RoutingError> {
        if !pattern.starts_with('/') {
            return Err(RoutingError::InvalidPathPattern {
                pattern: pattern.to_string(),
                reason: "패턴은 '/'로 시작해야 함".to_string(),
            });
        }

        if let Some(position) = pattern.find('*') {
            if position != pattern.len() - 1 {
                return Err(RoutingError::InvalidPathPattern {
                    pattern: pattern.to_string(),
                    reason: "와일드카드는 패턴 끝에서만 허용됨".to_string(),
                });
            }
        }

        let kind = if pattern.ends_with('*') {
            PathPatternKind::Prefix
        } else {
            PathPatternKind::Exact
        };

        let body = normalize_path(pattern.trim_end_matches('*'));

        let mut source = String::from("^");
        let mut param_names = Vec::new();
        for segment in body.split('/').skip(1) {
            source.push('/');
            if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RoutingError::InvalidPathPattern {
                        pattern: pattern.to_string(),
                        reason: "파라미터 이름이 비어 있음".to_string(),
                    });
                }
                param_names.push(name.to_string());
                source.push_str("([^/]+)");
            } else {
                source.push_str(&escape_literal(segment));
            }
        }

        match kind {
            PathPatternKind::Prefix => source.push_str("(/.*)?$"),
            PathPatternKind::Exact => source.push('$'),
        }

        let regex = regex::Regex::new(&source).map_err(|e| RoutingError::InvalidPathPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(PathPattern {
            kind,
            pattern: pattern.to_string(),
            param_names,
            regex,
        })
    }

    /// 원본 패턴 문자열을 반환합니다.
    pub fn source(&self) -> &str {
        &self.pattern
    }

    /// 파라미터 이름을 패턴에 나타난 순서대로 반환합니다.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// 경로를 매칭해 캡처 값과 소비된 접두사 길이를 반환합니다.
    pub fn find(&self, path: &str) -> Option<PathMatch> {
        let normalized = normalize_path(path);
        let captures = self.regex.captures(normalized)?;

        let params = (1..=self.param_names.len())
            .map(|index| {
                captures
                    .get(index)
                    .map(|capture| capture.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect();

        let consumed = match self.kind {
            PathPatternKind::Exact => normalized.len(),
            PathPatternKind::Prefix => {
                let suffix_len = captures
                    .get(self.param_names.len() + 1)
                    .map(|capture| capture.as_str().len())
                    .unwrap_or(0);
                normalized.len() - suffix_len
            }
        };

        Some(PathMatch { params, consumed })
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.pattern == other.pattern
    }
}

impl Eq for PathPattern {}
