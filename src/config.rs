//! Application configuration.
//!
//! Two values matter: the backend base URL and its public API key. They are
//! resolved from environment variables first (`BACKUP_CONSOLE_URL`,
//! `BACKUP_CONSOLE_ANON_KEY`), then from an optional `config.toml`, and
//! default to the empty string. Empty values are only rejected when the
//! gateway is constructed, so misconfiguration surfaces as one fatal error
//! at startup rather than on a random later call.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf};

const DEFAULT_SESSION_FILE: &str = "data/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`.
    pub backend_url: String,
    /// Public (anon) API key sent with every request.
    pub api_key: String,
    /// Where the persisted login session is stored between runs.
    pub session_file: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    backend: BackendConfig,
}

#[derive(Debug, Deserialize, Default)]
struct BackendConfig {
    #[serde(default)]
    url: String,
    #[serde(default)]
    anon_key: String,
    session_file: Option<String>,
}

fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })
}

/// Resolves the application configuration.
///
/// Environment variables win over `config.toml`; both fall back to empty
/// strings. A missing `config.toml` is fine, an unparseable one is not.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = if Path::new("config.toml").exists() {
        load_file_config("config.toml")?
    } else {
        FileConfig::default()
    };

    let backend_url = env::var("BACKUP_CONSOLE_URL").unwrap_or(file.backend.url);
    let api_key = env::var("BACKUP_CONSOLE_ANON_KEY").unwrap_or(file.backend.anon_key);
    let session_file = env::var("BACKUP_CONSOLE_SESSION_FILE")
        .ok()
        .or(file.backend.session_file)
        .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());

    Ok(AppConfig {
        backend_url: backend_url.trim_end_matches('/').to_string(),
        api_key,
        session_file: PathBuf::from(session_file),
    })
}
