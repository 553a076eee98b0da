use std::path::{Path, PathBuf};
use std::time::Duration;

use cardex_catalog::types::Language;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ConfigError;

pub const ENV_DATABASE_PATH: &str = "CARDEX_DATABASE_PATH";
pub const ENV_LANGUAGE: &str = "CARDEX_LANGUAGE";
pub const ENV_THROTTLE_MS: &str = "CARDEX_THROTTLE_MS";
pub const ENV_AUTO_CREATE: &str = "CARDEX_AUTO_CREATE";
pub const ENV_BASE_URL: &str = "CARDEX_BASE_URL";
pub const ENV_DEBUG: &str = "DEBUG_MODE";

const DEFAULT_THROTTLE_MS: u64 = 1000;

/// Everything an ingestion run needs to know before it starts.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub language: Language,
    /// Delay between two card fetches.
    pub throttle: Duration,
    /// Create missing rarity/element rows instead of leaving them unresolved.
    pub auto_create: bool,
    pub base_url: String,
    pub debug: bool,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug)]
pub struct SettingSources {
    pub database_path: SettingSource,
    pub language: SettingSource,
    pub throttle_ms: SettingSource,
    pub auto_create: SettingSource,
    pub base_url: SettingSource,
    pub debug: SettingSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    debug: Option<bool>,
    database: Option<DatabaseConfig>,
    ingest: Option<IngestConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseConfig {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct IngestConfig {
    language: Option<String>,
    throttle_ms: Option<u64>,
    auto_create: Option<bool>,
    base_url: Option<String>,
}

impl ConfigFile {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the file at `path`. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn database_path(&self) -> Option<&PathBuf> {
        self.database.as_ref().and_then(|d| d.path.as_ref())
    }

    fn ingest(&self) -> Option<&IngestConfig> {
        self.ingest.as_ref()
    }
}

impl Settings {
    /// Load settings from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    /// Required: database path.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match config_path() {
            Some(path) => ConfigFile::read(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(|key| std::env::var(key).ok(), &file)
    }

    /// Merge an environment lookup over a parsed config file.
    pub fn resolve<E>(env: E, file: &ConfigFile) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let ingest = file.ingest();

        let database_path = env(ENV_DATABASE_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| file.database_path().cloned())
            .ok_or(ConfigError::Missing {
                field: "database path",
                env_var: ENV_DATABASE_PATH,
            })?;

        let language = match env(ENV_LANGUAGE).or_else(|| ingest.and_then(|i| i.language.clone())) {
            Some(raw) => raw.parse::<Language>().map_err(|e| ConfigError::Invalid {
                field: "language",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => Language::Fr,
        };

        let throttle_ms = match env(ENV_THROTTLE_MS) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "throttle_ms",
                value: raw.clone(),
                reason: "expected a number of milliseconds".to_string(),
            })?,
            None => ingest
                .and_then(|i| i.throttle_ms)
                .unwrap_or(DEFAULT_THROTTLE_MS),
        };

        let auto_create = match env(ENV_AUTO_CREATE) {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                field: "auto_create",
                value: raw.clone(),
                reason: "expected 1/0, true/false, on/off or yes/no".to_string(),
            })?,
            None => ingest.and_then(|i| i.auto_create).unwrap_or(true),
        };

        let base_url = env(ENV_BASE_URL)
            .or_else(|| ingest.and_then(|i| i.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Anything other than a recognized "on" value leaves debug off.
        let debug = match env(ENV_DEBUG) {
            Some(raw) => parse_flag(&raw).unwrap_or(false),
            None => file.debug.unwrap_or(false),
        };

        Ok(Self {
            database_path,
            language,
            throttle: Duration::from_millis(throttle_ms),
            auto_create,
            base_url,
            debug,
        })
    }

    /// Override the language (e.g., from CLI args).
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        if let Some(language) = language {
            self.language = language;
        }
        self
    }
}

/// Parse a boolean flag the way `DEBUG_MODE` is read.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cardex").join("config.toml"))
}

/// Determine where each setting is coming from.
pub fn setting_sources() -> SettingSources {
    let file = config_path()
        .and_then(|p| ConfigFile::read(&p).ok())
        .unwrap_or_default();
    sources_from(|key| std::env::var(key).ok(), &file)
}

pub fn sources_from<E>(env: E, file: &ConfigFile) -> SettingSources
where
    E: Fn(&str) -> Option<String>,
{
    let ingest = file.ingest();
    let pick = |var: &'static str, in_file: bool, fallback: SettingSource| {
        if env(var).is_some() && (var != ENV_DATABASE_PATH || env_path_is_set(&env)) {
            SettingSource::EnvVar(var)
        } else if in_file {
            SettingSource::ConfigFile
        } else {
            fallback
        }
    };

    SettingSources {
        database_path: pick(
            ENV_DATABASE_PATH,
            file.database_path().is_some(),
            SettingSource::Missing,
        ),
        language: pick(
            ENV_LANGUAGE,
            ingest.is_some_and(|i| i.language.is_some()),
            SettingSource::Default,
        ),
        throttle_ms: pick(
            ENV_THROTTLE_MS,
            ingest.is_some_and(|i| i.throttle_ms.is_some()),
            SettingSource::Default,
        ),
        auto_create: pick(
            ENV_AUTO_CREATE,
            ingest.is_some_and(|i| i.auto_create.is_some()),
            SettingSource::Default,
        ),
        base_url: pick(
            ENV_BASE_URL,
            ingest.is_some_and(|i| i.base_url.is_some()),
            SettingSource::Default,
        ),
        debug: pick(ENV_DEBUG, file.debug.is_some(), SettingSource::Default),
    }
}

/// A blank database path in the environment falls through to the file.
fn env_path_is_set<E>(env: &E) -> bool
where
    E: Fn(&str) -> Option<String>,
{
    env(ENV_DATABASE_PATH).is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
