use std::path::PathBuf;

/// Errors that can occur while fetching from the card API.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("No data for {0}")]
    NotFound(String),
}

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {field}. Set ${env_var} or add it to the config file")]
    Missing {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
