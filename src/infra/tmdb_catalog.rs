use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::app::ports::{SeasonCatalogPort, TvDetails, TvSearchHit, TvSeasonEntry};
use crate::error::{Result, ScraperError};

#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TvShow {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TvShowDetail {
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Deserialize)]
pub struct Season {
    pub season_number: u32,
    pub air_date: Option<String>,
    pub episode_count: Option<u32>,
}

impl From<TvShowDetail> for TvDetails {
    fn from(detail: TvShowDetail) -> Self {
        TvDetails {
            seasons: detail
                .seasons
                .into_iter()
                .map(|s| TvSeasonEntry {
                    season_number: s.season_number,
                    air_date: s.air_date,
                    episode_count: s.episode_count,
                })
                .collect(),
        }
    }
}

/// TMDb v3 client authenticated with an `api_key` query parameter.
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbCatalog {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let mut request = self
            .client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(query);
        if let Some(lang) = &self.language {
            request = request.query(&[("language", lang.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SeasonCatalogPort for TmdbCatalog {
    async fn search_tv(&self, title: &str) -> Result<Vec<TvSearchHit>> {
        debug!("TMDb search/tv query={}", title);
        let response: PaginatedResponse<TvShow> =
            self.get_json("/search/tv", &[("query", title)]).await?;
        Ok(response
            .results
            .into_iter()
            .map(|show| TvSearchHit { id: show.id })
            .collect())
    }

    async fn tv_details(&self, id: i64) -> Result<TvDetails> {
        debug!("TMDb tv/{}", id);
        let detail: TvShowDetail = self.get_json(&format!("/tv/{}", id), &[]).await?;
        Ok(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 40075, "name": "Gravity Falls", "original_name": "Gravity Falls", "first_air_date": "2012-06-15", "vote_average": 8.6}
            ],
            "total_pages": 1,
            "total_results": 1
        }"#;
        let response: PaginatedResponse<TvShow> = serde_json::from_str(json).unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 40075);
    }

    #[test]
    fn test_detail_keeps_season_order_and_nulls() {
        let json = r#"{
            "id": 40075,
            "name": "Gravity Falls",
            "number_of_seasons": 2,
            "seasons": [
                {"air_date": null, "episode_count": 31, "id": 1, "name": "Specials", "season_number": 0},
                {"air_date": "2012-06-15", "episode_count": 20, "id": 2, "name": "Season 1", "season_number": 1},
                {"air_date": "2014-08-01", "id": 3, "name": "Season 2", "season_number": 2}
            ]
        }"#;
        let detail: TvShowDetail = serde_json::from_str(json).unwrap();
        let details: TvDetails = detail.into();

        let numbers: Vec<u32> = details.seasons.iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(details.seasons[0].air_date, None);
        assert_eq!(details.seasons[1].episode_count, Some(20));
        assert_eq!(details.seasons[2].episode_count, None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let catalog = TmdbCatalog::new(Client::new(), "https://api.themoviedb.org/3/", "key");
        assert_eq!(catalog.url("/tv/1"), "https://api.themoviedb.org/3/tv/1");
    }
}
