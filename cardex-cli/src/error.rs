use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] cardex_tcgdex::ConfigError),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// HTTP client could not be built
    #[error("Source error: {0}")]
    Source(#[from] cardex_tcgdex::SourceError),

    #[error("Ingestion failed: {0}")]
    Ingest(#[from] cardex_import::IngestError),

    #[error("Verification failed: {0}")]
    Verify(#[from] cardex_import::VerifyError),

    /// The verified set has critical issues
    #[error("{0} card(s) with critical issues")]
    Integrity(usize),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
