use serde::{Deserialize, Serialize};

/// CORS 설정입니다. 모든 필드는 선택적이며 기본 동작은 전체 허용입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// 허용할 Origin 목록. 비어 있으면 모든 Origin을 허용합니다.
    #[serde(default)]
    pub allow_origins: Vec<String>,

    /// 허용할 HTTP 메서드 목록. 비어 있으면 모든 메서드를 허용합니다.
    #[serde(default = "default_methods")]
    pub allow_methods: Vec<String>,

    /// 허용할 요청 헤더 목록. 비어 있으면 모든 헤더를 허용합니다.
    #[serde(default)]
    pub allow_headers: Vec<String>,

    /// credentials 허용 여부
    #[serde(default)]
    pub allow_credentials: bool,

    /// preflight 응답 캐시 시간 (초)
    #[serde(default)]
    pub max_age: Option<u64>,
}

fn default_methods() -> Vec<String> {
    vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl CorsConfig {
    /// TOML 설정에서 CORS 설정을 파싱합니다.
    pub fn from_toml(config: &str) -> Result<Self, toml::de::Error> {
        #[derive(Deserialize)]
        struct Config {
            cors: CorsConfig,
        }

        let config: Config = toml::from_str(config)?;
        Ok(config.cors)
    }
}
