//! Title lookups against IMDb's public suggestion endpoint, the same data that
//! backs the search box on imdb.com.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::app::ports::{TitleCandidate, TitleCatalogPort, TitleKind};
use crate::error::{Result, ScraperError};

#[derive(Debug, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub d: Vec<SuggestionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionEntry {
    pub id: String,
    /// Display title.
    pub l: Option<String>,
    /// Human-readable kind, e.g. "TV series".
    pub q: Option<String>,
    /// Machine kind, e.g. "tvSeries".
    pub qid: Option<String>,
}

impl SuggestionResponse {
    /// Title entries only (people and companies are dropped), in IMDb's order.
    pub fn into_candidates(self) -> Vec<TitleCandidate> {
        self.d
            .into_iter()
            .filter(|entry| entry.id.starts_with("tt"))
            .map(|entry| TitleCandidate {
                kind: title_kind(entry.qid.as_deref(), entry.q.as_deref()),
                title: entry.l.unwrap_or_default(),
                id: entry.id,
            })
            .collect()
    }
}

fn title_kind(qid: Option<&str>, q: Option<&str>) -> TitleKind {
    match qid {
        Some("tvSeries") => TitleKind::TvSeries,
        Some("tvMiniSeries") => TitleKind::TvMiniSeries,
        Some("movie") => TitleKind::Movie,
        other => TitleKind::Other(q.or(other).unwrap_or("unknown").to_string()),
    }
}

pub struct ImdbSuggestCatalog {
    client: Client,
    base_url: String,
}

impl ImdbSuggestCatalog {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/{first letter}/{query}.json`
    pub fn suggestion_url(&self, title: &str) -> Result<Url> {
        let query = title.trim().to_lowercase();
        let bucket = query
            .chars()
            .find(|c| c.is_ascii_alphanumeric())
            .unwrap_or('x')
            .to_string();

        let invalid = |reason: &str| ScraperError::InvalidUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL"))?
            .pop_if_empty()
            .push(&bucket)
            .push(&format!("{}.json", query));
        Ok(url)
    }
}

#[async_trait]
impl TitleCatalogPort for ImdbSuggestCatalog {
    async fn search(&self, title: &str) -> Result<Vec<TitleCandidate>> {
        let url = self.suggestion_url(title)?;
        debug!("IMDb suggestion lookup {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let suggestions: SuggestionResponse = response.json().await?;
        Ok(suggestions.into_candidates())
    }
}
