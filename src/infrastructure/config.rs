use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_session_ttl() -> u64 {
  86400
}

fn default_uploads_dir() -> String {
  "./static/upload".to_string()
}

fn default_uploads_public_base() -> String {
  "/static/upload".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub security: SecurityConfig,
  #[serde(default)]
  pub uploads: UploadsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Security configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  #[serde(default = "default_session_ttl")]
  pub session_ttl_seconds: u64,
}

impl Default for SecurityConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: default_session_ttl(),
    }
  }
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
  /// Directory uploaded images are written to
  #[serde(default = "default_uploads_dir")]
  pub dir: String,
  /// Public URL prefix under which that directory is served
  #[serde(default = "default_uploads_public_base")]
  pub public_base: String,
}

impl Default for UploadsConfig {
  fn default() -> Self {
    Self {
      dir: default_uploads_dir(),
      public_base: default_uploads_public_base(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Sources, later ones overriding earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if present)
  /// 3. config/{RUN_MODE}.toml (if present)
  /// 4. Environment variables with the ADBOARD_ prefix, double underscore
  ///    as the section separator: `ADBOARD_SERVER__PORT=8080`,
  ///    `ADBOARD_DATABASE__URL=postgres://...`,
  ///    `ADBOARD_SECURITY__SESSION_TTL_SECONDS=86400`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("ADBOARD")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/adboard"
            max_connections = 5

            [security]
            session_ttl_seconds = 3600

            [uploads]
            dir = "./static/upload"
            public_base = "/static/upload"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "postgres://localhost/adboard");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.security.session_ttl_seconds, 3600);
    assert_eq!(config.uploads.dir, "./static/upload");
  }

  #[test]
  fn test_config_defaults_for_optional_sections() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/adboard"
            max_connections = 5
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.security.session_ttl_seconds, 86400);
    assert_eq!(config.uploads.public_base, "/static/upload");
  }
}
