use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Session file error: {0}")]
    SessionFile(#[from] serde_json::Error),

    #[error("record not found for update: {0}")]
    NotFoundForUpdate(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
