use async_trait::async_trait;

use crate::error::Result;

// Fetch-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Fetches a page; non-success statuses are errors.
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub bytes: Vec<u8>,
}

impl HttpGetResult {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

// Catalog ports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleKind {
    TvSeries,
    TvMiniSeries,
    Movie,
    Other(String),
}

/// A search hit from the title catalog, ranked as the catalog returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCandidate {
    pub id: String,
    pub title: String,
    pub kind: TitleKind,
}

#[async_trait]
pub trait TitleCatalogPort: Send + Sync {
    async fn search(&self, title: &str) -> Result<Vec<TitleCandidate>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvSearchHit {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvSeasonEntry {
    pub season_number: u32,
    pub air_date: Option<String>,
    pub episode_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvDetails {
    pub seasons: Vec<TvSeasonEntry>,
}

#[async_trait]
pub trait SeasonCatalogPort: Send + Sync {
    async fn search_tv(&self, title: &str) -> Result<Vec<TvSearchHit>>;
    async fn tv_details(&self, id: i64) -> Result<TvDetails>;
}

// Status output
pub trait ProgressPort: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}
