// Configuration loading and parsing (client.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The backend accepts card years within this range.
pub const MIN_CARD_YEAR: i32 = 2025;
pub const MAX_CARD_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub cards: CardsConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// client.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire client.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ClientFile {
    backend: BackendConfig,
    cards: CardsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend the dev-server proxy would otherwise forward to.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardsConfig {
    /// Year stamped into newly created bingo cards.
    pub year: i32,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

/// Session cookie values lifted from an authenticated browser session.
/// Both are optional; without them only unauthenticated reads will succeed.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub sessionid: Option<String>,
    pub csrftoken: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/client.toml` and (optionally)
/// `config/credentials.toml`, both relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- client.toml (required) ---
    let client_path = config_dir.join("client.toml");
    let client_text = read_file(&client_path)?;
    let client_file: ClientFile =
        toml::from_str(&client_text).map_err(|e| ConfigError::ParseError {
            path: client_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        backend: client_file.backend,
        cards: client_file.cards,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }

        std::fs::copy(&path, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", path.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = &config.backend.base_url;
    match reqwest::Url::parse(base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => {
            return Err(ConfigError::ValidationError {
                field: "backend.base_url".into(),
                message: format!("must be an http(s) URL, got scheme `{}`", url.scheme()),
            });
        }
        Err(e) => {
            return Err(ConfigError::ValidationError {
                field: "backend.base_url".into(),
                message: format!("not a valid URL: {e}"),
            });
        }
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "backend.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let year = config.cards.year;
    if !(MIN_CARD_YEAR..=MAX_CARD_YEAR).contains(&year) {
        return Err(ConfigError::ValidationError {
            field: "cards.year".into(),
            message: format!(
                "must be between {MIN_CARD_YEAR} and {MAX_CARD_YEAR} inclusive, got {year}"
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
