//! TCGdex card source and runtime configuration.
//!
//! [`TcgdexClient`] fetches blocs, sets and cards for one language through
//! the [`CardSource`] trait; [`Settings`] tells an ingestion run where the
//! catalog database lives and how to pace itself.

pub mod client;
pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use client::{DEFAULT_BASE_URL, TcgdexClient};
pub use config::{
    ConfigFile, SettingSource, SettingSources, Settings, config_path, parse_flag, setting_sources,
};
pub use error::{ConfigError, SourceError};
pub use source::CardSource;
pub use types::{
    CardBrief, CardCount, CardDetail, SerieBrief, SerieDetail, SetBrief, SetDetail, Variants,
};
