use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable that replaces `[data] path` when set.
pub const DATA_PATH_ENV: &str = "SALES_DATA_PATH";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the sales CSV file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Directory for the log file
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "target/logs".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {addr}: {e}"))
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[data]
path = "data/sales_data.csv"

[logging]
dir = "target/logs"
"#;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Runs before logging is initialised, so the caller reports the source.
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    let (config, source) = match config_next_to_exe() {
        Some(config_path) => {
            let contents = std::fs::read_to_string(&config_path)?;
            (parse_config(&contents)?, ConfigSource::File(config_path))
        }
        None => (parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded),
    };

    let config = apply_data_path_override(config, std::env::var(DATA_PATH_ENV).ok());
    Ok((config, source))
}

fn config_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    config_path.exists().then_some(config_path)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Replace the data path with a non-empty override value
pub fn apply_data_path_override(mut config: Config, value: Option<String>) -> Config {
    if let Some(path) = value.filter(|p| !p.trim().is_empty()) {
        config.data.path = path;
    }
    config
}

/// Get the sales data file path from configuration
///
/// Relative paths are resolved against the executable directory when the file
/// exists there, otherwise against the current directory.
pub fn get_data_path(config: &Config) -> PathBuf {
    let data_path = Path::new(&config.data.path);

    if data_path.is_absolute() {
        return data_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(data_path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    data_path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.data.path, "data/sales_data.csv");
        assert_eq!(config.logging.dir, "target/logs");
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_logging_section_is_optional() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [data]
            path = "/srv/sales.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.dir, "target/logs");
        assert_eq!(get_data_path(&config), PathBuf::from("/srv/sales.csv"));
    }

    #[test]
    fn test_data_path_override() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();

        let same = apply_data_path_override(config.clone(), Some("  ".to_string()));
        assert_eq!(same.data.path, "data/sales_data.csv");

        let overridden = apply_data_path_override(config, Some("/tmp/other.csv".to_string()));
        assert_eq!(overridden.data.path, "/tmp/other.csv");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(server.socket_addr().is_err());
    }
}
