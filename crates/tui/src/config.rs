use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const SERVER_URL_ENV: &str = "AGENDA_SERVER_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub downloads: DownloadsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// Zero leaves requests to the transport's own limits.
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadsConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_seconds: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.request_timeout_seconds))
    }
}

impl DownloadsConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        if !self.dir.trim().is_empty() {
            return PathBuf::from(self.dir.trim());
        }
        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("downloads"))
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &PathBuf) -> Self {
        Self::load(path).unwrap_or_default()
    }

    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                self.server.base_url = url.trim().to_string();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            base_url = "http://agenda.internal:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://agenda.internal:8080");
        assert_eq!(config.server.request_timeout(), None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn timeout_applies_when_set() {
        let config: Config = toml::from_str("[server]\nrequest_timeout_seconds = 30\n").unwrap();
        assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn explicit_download_dir_wins() {
        let downloads = DownloadsConfig {
            dir: " /tmp/agendas ".to_string(),
        };
        assert_eq!(downloads.resolve_dir(), PathBuf::from("/tmp/agendas"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml"));
        assert_eq!(config.server.base_url, "http://localhost:5000");
    }
}
