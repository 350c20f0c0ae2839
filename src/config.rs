use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_session_ttl() -> u64 {
    86_400
}

fn default_cookie_name() -> String {
    "ghotok_session".to_string()
}

/// Which backend receives new uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    Cloudinary,
    ObjectStore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub cloudinary: CloudinarySettings,
    pub object_store: ObjectStoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_cloudinary_folder")]
    pub folder: String,
}

fn default_cloudinary_folder() -> String {
    "ghotokbari".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStoreSettings {
    pub base_url: String,
    pub bucket: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: usize,
}

fn default_max_file_size() -> usize {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with GHOTOK_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with GHOTOK_)
            // e.g., GHOTOK_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GHOTOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GHOTOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional deployment variables on top of the layered
/// config: `DATABASE_URL` and the `CLOUDINARY_*` trio win over files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(cloud_name) = env::var("CLOUDINARY_CLOUD_NAME") {
        builder = builder.set_override("storage.cloudinary.cloud_name", cloud_name)?;
    }
    if let Ok(api_key) = env::var("CLOUDINARY_API_KEY") {
        builder = builder.set_override("storage.cloudinary.api_key", api_key)?;
    }
    if let Ok(api_secret) = env::var("CLOUDINARY_API_SECRET") {
        builder = builder.set_override("storage.cloudinary.api_secret", api_secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_session_ttl(), 86_400);
        assert_eq!(default_cookie_name(), "ghotok_session");
        assert_eq!(default_max_file_size(), 5 * 1024 * 1024);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }

    #[test]
    fn test_storage_backend_parses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: StorageBackend,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"backend":"object-store"}"#).unwrap();
        assert_eq!(parsed.backend, StorageBackend::ObjectStore);

        let parsed: Wrapper = serde_json::from_str(r#"{"backend":"cloudinary"}"#).unwrap();
        assert_eq!(parsed.backend, StorageBackend::Cloudinary);
    }
}
