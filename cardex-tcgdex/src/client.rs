use std::time::Duration;

use cardex_catalog::types::Language;
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::source::CardSource;
use crate::types::{CardDetail, SerieBrief, SerieDetail, SetDetail};

pub const DEFAULT_BASE_URL: &str = "https://api.tcgdex.net/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the TCGdex v2 API, bound to one language.
pub struct TcgdexClient {
    http: reqwest::blocking::Client,
    base_url: String,
    language: Language,
}

impl TcgdexClient {
    pub fn new(base_url: &str, language: Language) -> Result<Self, SourceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cardex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    /// Full URL of an endpoint path such as `series` or `cards/sv1-25`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.language.api_code(), path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send()?;
        let status = resp.status().as_u16();
        let text = resp.text()?;
        decode(&url, status, &text)
    }
}

/// Turn a response into data. Anything but HTTP 200 with a JSON body is an
/// error.
pub(crate) fn decode<T: DeserializeOwned>(
    url: &str,
    status: u16,
    body: &str,
) -> Result<T, SourceError> {
    if status == 404 {
        return Err(SourceError::NotFound(url.to_string()));
    }
    if status != 200 {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }
    serde_json::from_str(body).map_err(|e| SourceError::Parse {
        url: url.to_string(),
        message: format!("{e}. Response: {}", truncate(body, 200)),
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

impl CardSource for TcgdexClient {
    fn name(&self) -> &str {
        "tcgdex"
    }

    fn language(&self) -> Language {
        self.language
    }

    fn series(&self) -> Result<Vec<SerieBrief>, SourceError> {
        self.get_json("series")
    }

    fn serie(&self, id: &str) -> Result<SerieDetail, SourceError> {
        self.get_json(&format!("series/{id}"))
    }

    fn set(&self, id: &str) -> Result<SetDetail, SourceError> {
        self.get_json(&format!("sets/{id}"))
    }

    fn card(&self, id: &str) -> Result<CardDetail, SourceError> {
        self.get_json(&format!("cards/{id}"))
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
