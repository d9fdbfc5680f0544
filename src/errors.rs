use thiserror::Error;

/// All failure modes surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

// Convenience `Result` type
/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
