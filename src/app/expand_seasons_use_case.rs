use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::app::extract_labels_use_case::ExtractLabelsUseCase;
use crate::app::ports::{ProgressPort, SeasonCatalogPort, TitleCandidate, TitleCatalogPort, TitleKind};
use crate::config::DetailConfig;
use crate::constants::{NO_IMDB_RESULTS, NO_TMDB_SEASONS, NO_TV_SERIES, TMDB_SHOW_NOT_FOUND};
use crate::types::{Enrichment, ReleaseYear, SeasonId, SeasonInfo, ShowRecord};

/// What expanding one show produced. `error` is set whenever `seasons` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionOutcome {
    pub enrichment: Enrichment,
    pub seasons: Vec<SeasonInfo>,
    pub error: Option<String>,
}

impl ExpansionOutcome {
    fn failed(enrichment: Enrichment, message: String) -> Self {
        Self {
            enrichment,
            seasons: Vec::new(),
            error: Some(message),
        }
    }
}

/// Turns a show into its seasons: detail-page enrichment, then the title
/// catalog to confirm a TV series, then the season catalog.
pub struct ExpandSeasonsUseCase {
    labels: ExtractLabelsUseCase,
    detail: DetailConfig,
    titles: Arc<dyn TitleCatalogPort>,
    seasons: Arc<dyn SeasonCatalogPort>,
    progress: Arc<dyn ProgressPort>,
}

impl ExpandSeasonsUseCase {
    pub fn new(
        labels: ExtractLabelsUseCase,
        detail: DetailConfig,
        titles: Arc<dyn TitleCatalogPort>,
        seasons: Arc<dyn SeasonCatalogPort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        Self {
            labels,
            detail,
            titles,
            seasons,
            progress,
        }
    }

    #[instrument(skip(self, show), fields(show = %show.name))]
    pub async fn expand(&self, show: &ShowRecord) -> ExpansionOutcome {
        let enrichment = self.enrich(show).await;
        let search_title = enrichment.original_title.clone();

        let series = match self.find_series(&search_title).await {
            Ok(series) => series,
            Err(message) => return self.fail(enrichment, message),
        };

        let resolved_title = if series.title.trim().is_empty() {
            search_title
        } else {
            series.title.clone()
        };
        self.report(&format!(
            "🎬 Found: {} ({}) - Type: tv series",
            resolved_title, series.id
        ));

        match self.fetch_seasons(&resolved_title).await {
            Ok(seasons) if seasons.is_empty() => self.fail(enrichment, NO_TMDB_SEASONS.to_string()),
            Ok(seasons) => {
                info!("{} seasons found for {}", seasons.len(), resolved_title);
                ExpansionOutcome {
                    enrichment,
                    seasons,
                    error: None,
                }
            }
            Err(message) => self.fail(enrichment, message),
        }
    }

    async fn enrich(&self, show: &ShowRecord) -> Enrichment {
        let Some(url) = show.url.as_deref() else {
            return Enrichment::bare(&show.name);
        };

        self.report(&format!("🔍 Extracting wiki info for: {}", show.name));
        let values = self.labels.extract(url, &self.detail.labels()).await;
        let original_title = values
            .get(&self.detail.original_title_label)
            .map(str::trim)
            .filter(|title| !title.is_empty());
        info!("Original title extracted: {:?}", original_title);

        Enrichment {
            actor_direction: values.get(&self.detail.actor_direction_label).map(str::to_string),
            technical_direction: values
                .get(&self.detail.technical_direction_label)
                .map(str::to_string),
            original_title: original_title.unwrap_or(&show.name).to_string(),
        }
    }

    async fn find_series(&self, search_title: &str) -> Result<TitleCandidate, String> {
        self.report(&format!("🔍 Searching IMDb for: {}", search_title));
        let candidates = self
            .titles
            .search(search_title)
            .await
            .map_err(|e| format!("IMDb error: {}", e))?;

        if candidates.is_empty() {
            return Err(NO_IMDB_RESULTS.to_string());
        }

        candidates
            .into_iter()
            .find(|c| c.kind == TitleKind::TvSeries)
            .ok_or_else(|| NO_TV_SERIES.to_string())
    }

    async fn fetch_seasons(&self, title: &str) -> Result<Vec<SeasonInfo>, String> {
        let hits = self
            .seasons
            .search_tv(title)
            .await
            .map_err(|e| format!("TMDb error: {}", e))?;
        let show_id = hits
            .first()
            .map(|hit| hit.id)
            .ok_or_else(|| format!("TMDb error: {}", TMDB_SHOW_NOT_FOUND))?;

        let details = self
            .seasons
            .tv_details(show_id)
            .await
            .map_err(|e| format!("TMDb error: {}", e))?;

        Ok(details
            .seasons
            .iter()
            .map(|entry| SeasonInfo {
                season: SeasonId::from_raw(entry.season_number),
                release_year: ReleaseYear::from_air_date(entry.air_date.as_deref()),
                episodes: entry.episode_count.unwrap_or(0),
            })
            .collect())
    }

    fn fail(&self, enrichment: Enrichment, message: String) -> ExpansionOutcome {
        warn!("{}", message);
        self.progress.error(&format!("❌ {}", message));
        ExpansionOutcome::failed(enrichment, message)
    }

    fn report(&self, message: &str) {
        info!("{}", message);
        self.progress.info(message);
    }
}
