use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

/// Database file used when neither the environment nor a config file names one.
pub const DEFAULT_DATABASE_PATH: &str = "ownincome.db";

/// Environment variable overriding every other source of the database path.
pub const DATABASE_PATH_ENV_VAR: &str = "OWNINCOME_DATABASE_PATH";

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

/// Loads an [`AppConfig`] from a TOML file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    Ok(app_config)
}

/// Resolves the effective configuration.
///
/// Precedence: the `OWNINCOME_DATABASE_PATH` environment variable, then a
/// `config.toml` in the working directory, then the built-in default.
pub fn load_app_configuration() -> Result<AppConfig> {
    resolve_configuration(env::var(DATABASE_PATH_ENV_VAR).ok(), Path::new(CONFIG_FILE))
}

fn resolve_configuration(env_override: Option<String>, config_file: &Path) -> Result<AppConfig> {
    if let Some(database_path) = env_override {
        tracing::debug!(
            "Using database path from {}: {}",
            DATABASE_PATH_ENV_VAR,
            database_path
        );
        return Ok(AppConfig { database_path });
    }
    if config_file.exists() {
        return load_config(config_file);
    }
    Ok(AppConfig {
        database_path: DEFAULT_DATABASE_PATH.to_string(),
    })
}
