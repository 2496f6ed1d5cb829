use std::env;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("환경 변수 {var_name} 값 {value} 오류: {reason}")]
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
}

/// 서버 실행 설정입니다. 환경 변수에서 읽습니다.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// HTTP 포트 (기본값: 8080)
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_http_port() -> u16 {
    8080
}

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(
    name: &str,
    default: F,
) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let http_port: u16 = parse_env_var("HTTP_PORT", default_http_port)?;
        if http_port == 0 {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "HTTP_PORT".to_string(),
                value: http_port.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }
        Ok(Self { http_port })
    }
}
