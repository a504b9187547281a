use std::env;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub posts: PostsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    /// Token lifetime; tokens never expire when unset.
    pub expiration_hours: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub covers_dir: PathBuf,
    #[serde(default)]
    pub public_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_page_size() -> u32 {
    10
}

impl JwtConfig {
    /// Configured token lifetime, `None` for non-expiring tokens.
    pub fn lifetime(&self) -> Option<chrono::Duration> {
        self.expiration_hours
            .filter(|hours| *hours > 0)
            .map(chrono::Duration::hours)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(expiration_hours: Option<i64>) -> JwtConfig {
        JwtConfig {
            secret: String::new(),
            expiration_hours,
        }
    }

    #[test]
    fn test_lifetime_is_opt_in() {
        assert_eq!(jwt(None).lifetime(), None);
        assert_eq!(jwt(Some(0)).lifetime(), None);
        assert_eq!(jwt(Some(24)).lifetime(), Some(chrono::Duration::hours(24)));
    }

    #[test]
    fn test_sections_deserialize_from_toml() {
        let configuration = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                r#"
                [database]
                url = "postgres://localhost/blog"

                [server]
                http_port = 3000

                [jwt]
                secret = "a-secret-that-is-long-enough-for-hs256"

                [storage]
                covers_dir = "uploads/covers"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.posts.page_size, 10);
        assert_eq!(config.jwt.expiration_hours, None);
        assert_eq!(config.storage.public_base_url, "");
    }
}
