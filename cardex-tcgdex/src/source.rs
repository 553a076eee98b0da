use cardex_catalog::types::Language;

use crate::error::SourceError;
use crate::types::{CardDetail, SerieBrief, SerieDetail, SetDetail};

/// A catalog source for one language, walked bloc → set → card.
///
/// Every call is one request; a failure affects only the node asked for.
pub trait CardSource {
    /// Short name recorded in the import log.
    fn name(&self) -> &str;

    fn language(&self) -> Language;

    fn series(&self) -> Result<Vec<SerieBrief>, SourceError>;

    fn serie(&self, id: &str) -> Result<SerieDetail, SourceError>;

    fn set(&self, id: &str) -> Result<SetDetail, SourceError>;

    fn card(&self, id: &str) -> Result<CardDetail, SourceError>;
}
