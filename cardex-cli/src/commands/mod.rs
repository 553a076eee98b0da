pub(crate) mod config;
pub(crate) mod ingest;
pub(crate) mod stats;
pub(crate) mod verify;

use rusqlite::Connection;

use cardex_tcgdex::Settings;

use crate::CliError;

/// Open (or create) the catalog database named by the settings.
pub(crate) fn open_catalog(settings: &Settings) -> Result<Connection, CliError> {
    let path = &settings.database_path;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    cardex_db::open_database(path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            path.display(),
            e
        ))
    })
}
