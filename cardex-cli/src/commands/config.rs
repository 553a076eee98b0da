use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardex_tcgdex::{SettingSource, Settings};

use crate::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = cardex_tcgdex::config_path();
    let sources = cardex_tcgdex::setting_sources();

    log::info!(
        "{}",
        "Cardex Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // Settings::load() fails as a whole when the database path is missing
    let settings = match Settings::load() {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("  {}", e);
            crate::log_blank();
            None
        }
    };

    let value = |source: &SettingSource, from_settings: Option<String>| -> Option<String> {
        match source {
            SettingSource::Missing => None,
            SettingSource::EnvVar(var) => std::env::var(var).ok(),
            SettingSource::ConfigFile | SettingSource::Default => from_settings,
        }
    };
    let s = settings.as_ref();

    let fields: &[(&str, &SettingSource, Option<String>)] = &[
        (
            "database.path",
            &sources.database_path,
            value(
                &sources.database_path,
                s.map(|s| s.database_path.display().to_string()),
            ),
        ),
        (
            "ingest.language",
            &sources.language,
            value(&sources.language, s.map(|s| s.language.to_string())),
        ),
        (
            "ingest.throttle_ms",
            &sources.throttle_ms,
            value(
                &sources.throttle_ms,
                s.map(|s| s.throttle.as_millis().to_string()),
            ),
        ),
        (
            "ingest.auto_create",
            &sources.auto_create,
            value(&sources.auto_create, s.map(|s| s.auto_create.to_string())),
        ),
        (
            "ingest.base_url",
            &sources.base_url,
            value(&sources.base_url, s.map(|s| s.base_url.clone())),
        ),
        (
            "debug",
            &sources.debug,
            value(&sources.debug, s.map(|s| s.debug.to_string())),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match cardex_tcgdex::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
        .into()),
    }
}
