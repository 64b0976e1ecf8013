use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_WS_PORT: u16 = 8081;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const PIPE_BASENAME: &str = "TimeWidgetsPipe";

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub use_http: bool,
    pub host: String,
    pub http_port: u16,
    pub use_websocket: bool,
    pub ws_port: u16,
    pub pipe_name: String,
    pub data_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let use_http = parse_flag("USE_HTTP", lookup("USE_HTTP"), defaults.use_http)?;
        let use_websocket = parse_flag("USE_WEBSOCKET", lookup("USE_WEBSOCKET"), defaults.use_websocket)?;
        let http_port = parse_port("PORT", lookup("PORT"), defaults.http_port)?;
        let ws_port = parse_port("WS_PORT", lookup("WS_PORT"), defaults.ws_port)?;

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let pipe_name = lookup("PIPE_NAME")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.pipe_name);
        let data_file = lookup("DATA_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            use_http,
            host,
            http_port,
            use_websocket,
            ws_port,
            pipe_name,
            data_file,
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn ws_addr(&self) -> String {
        format!("{}:{}", self.host, self.ws_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            use_http: false,
            host: DEFAULT_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            use_websocket: true,
            ws_port: DEFAULT_WS_PORT,
            pipe_name: default_pipe_name(),
            data_file: None,
        }
    }
}

#[cfg(windows)]
pub fn default_pipe_name() -> String {
    format!(r"\\.\pipe\{}", PIPE_BASENAME)
}

#[cfg(not(windows))]
pub fn default_pipe_name() -> String {
    env::temp_dir()
        .join(format!("{}.sock", PIPE_BASENAME))
        .to_string_lossy()
        .into_owned()
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool, AppError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::Config(format!("{} must be true or false, got {:?}", key, other))),
    }
}

fn parse_port(key: &str, value: Option<String>, default: u16) -> Result<u16, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("{} is not a valid port ({:?}): {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(!config.use_http);
        assert!(config.use_websocket);
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.ws_port, 8081);
        assert!(config.pipe_name.contains("TimeWidgetsPipe"));
        assert_eq!(config.http_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("USE_HTTP", "true"),
            ("PORT", "8080"),
            ("USE_WEBSOCKET", "no"),
            ("WS_PORT", "9001"),
            ("HOST", "0.0.0.0"),
            ("PIPE_NAME", "/tmp/widgets.sock"),
            ("DATA_FILE", "data.json"),
        ])
        .unwrap();

        assert!(config.use_http);
        assert!(!config.use_websocket);
        assert_eq!(config.http_addr(), "0.0.0.0:8080");
        assert_eq!(config.ws_addr(), "0.0.0.0:9001");
        assert_eq!(config.pipe_name, "/tmp/widgets.sock");
        assert_eq!(config.data_file, Some(PathBuf::from("data.json")));
    }

    #[test]
    fn test_flags_are_case_insensitive() {
        assert!(config_from(&[("USE_HTTP", "TRUE")]).unwrap().use_http);
        assert!(config_from(&[("USE_HTTP", "1")]).unwrap().use_http);
        assert!(!config_from(&[("USE_HTTP", "False")]).unwrap().use_http);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            config_from(&[("USE_HTTP", "maybe")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(config_from(&[("PORT", "http")]), Err(AppError::Config(_))));
        assert!(matches!(config_from(&[("WS_PORT", "70000")]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", " "), ("PIPE_NAME", ""), ("DATA_FILE", "")]).unwrap();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.pipe_name, default_pipe_name());
        assert!(config.data_file.is_none());
    }
}
