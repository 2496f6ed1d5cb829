use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::http::{Request, Response};
use crate::routing::Exception;

/// 요청 본문을 해석하고 응답 본문을 인코딩하는 파서 인터페이스입니다.
pub trait Parser: Send + Sync {
    /// 이 파서가 요청 본문을 처리할 수 있으면 true를 반환합니다.
    fn matches(&self, req: &Request) -> bool;

    /// 요청 본문을 디코딩해 요청의 body를 채웁니다.
    fn decode(&self, req: &mut Request) -> Result<(), Exception>;

    /// 출력 데이터를 응답에 인코딩합니다.
    fn encode(&self, body: &Value, res: &mut Response) -> Result<(), Exception>;
}

/// 등록 순서를 보존하는 이름 붙은 파서 레지스트리입니다.
///
/// `matches`가 처음 true를 반환하는 파서가 사용됩니다.
#[derive(Default, Clone)]
pub struct ParserRegistry {
    parsers: Vec<(String, Arc<dyn Parser>)>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        ParserRegistry {
            parsers: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, parser: impl Parser + 'static) {
        self.parsers.push((name.to_string(), Arc::new(parser)));
    }

    /// 요청과 매칭되는 첫 파서의 이름을 반환합니다.
    pub fn select(&self, req: &Request) -> Option<&str> {
        self.parsers
            .iter()
            .find(|(_, parser)| parser.matches(req))
            .map(|(name, _)| name.as_str())
    }

    /// 매칭되는 첫 파서로 요청 본문을 디코딩합니다. 매칭이 없으면 그대로 둡니다.
    pub fn decode(&self, req: &mut Request) -> Result<(), Exception> {
        if req.raw_body().is_empty() {
            return Ok(());
        }

        let selected = self
            .parsers
            .iter()
            .find(|(_, parser)| parser.matches(req))
            .map(|(name, parser)| (name.clone(), parser.clone()));

        if let Some((name, parser)) = selected {
            debug!(parser = %name, "요청 본문 디코딩");
            parser.decode(req)?;
        }
        Ok(())
    }
}

/// application/json 본문 파서
pub struct JsonParser;

impl Parser for JsonParser {
    fn matches(&self, req: &Request) -> bool {
        req.is("application/json")
    }

    fn decode(&self, req: &mut Request) -> Result<(), Exception> {
        let value: Value = serde_json::from_slice(req.raw_body())
            .map_err(|e| Exception::new(400, format!("invalid json body: {}", e)))?;
        req.set_body(value);
        Ok(())
    }

    fn encode(&self, body: &Value, res: &mut Response) -> Result<(), Exception> {
        res.json(body);
        Ok(())
    }
}

/// application/x-www-form-urlencoded 본문 파서
pub struct UrlEncodedParser;

impl Parser for UrlEncodedParser {
    fn matches(&self, req: &Request) -> bool {
        req.is("application/x-www-form-urlencoded")
    }

    fn decode(&self, req: &mut Request) -> Result<(), Exception> {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(req.raw_body())
            .into_owned()
            .collect();

        let mut object = serde_json::Map::new();
        for (key, value) in pairs {
            object.insert(key, Value::String(value));
        }
        req.set_body(Value::Object(object));
        Ok(())
    }

    fn encode(&self, body: &Value, res: &mut Response) -> Result<(), Exception> {
        let object = body
            .as_object()
            .ok_or_else(|| Exception::internal("urlencoded body must be an object"))?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in object {
            match value {
                Value::String(text) => {
                    serializer.append_pair(key, text);
                }
                other => {
                    serializer.append_pair(key, &other.to_string());
                }
            }
        }

        res.set(
            hyper::header::CONTENT_TYPE.as_str(),
            "application/x-www-form-urlencoded",
        );
        res.send(serializer.finish());
        Ok(())
    }
}
