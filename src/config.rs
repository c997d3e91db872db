use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub logs_dir: PathBuf,
    pub file_prefix: String,
    pub file_suffix: String,
    pub route: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SUBLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SUBLOG_HOST: {e}"))?;

        let port: u16 = env_or("SUBLOG_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SUBLOG_PORT: {e}"))?;

        let logs_dir = PathBuf::from(env_or("SUBLOG_LOGS_DIR", "logs"));

        let file_prefix = env_or("SUBLOG_FILE_PREFIX", "submissions-");

        let file_suffix = env_or("SUBLOG_FILE_SUFFIX", ".jsonl");
        if file_suffix.is_empty() {
            return Err("SUBLOG_FILE_SUFFIX must not be empty".to_string());
        }

        let route = env_or("SUBLOG_ROUTE", "/api/submission-logs");
        if !route.starts_with('/') {
            return Err(format!("Invalid SUBLOG_ROUTE '{route}': must start with '/'"));
        }

        let log_level = env_or("SUBLOG_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            logs_dir,
            file_prefix,
            file_suffix,
            route,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
