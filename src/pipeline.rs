use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::app::expand_seasons_use_case::ExpandSeasonsUseCase;
use crate::app::ports::{HttpClientPort, ProgressPort};
use crate::config::SourceConfig;
use crate::error::Result;
use crate::parser::table::{reconstruct, ReconstructedTable, TableOptions};
use crate::types::{ErrorLog, SeasonRecord};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub source_url: String,
    pub shows_processed: usize,
    pub ghost_rows: usize,
    pub records: Vec<SeasonRecord>,
    pub errors: ErrorLog,
}

impl PipelineResult {
    pub fn fallback_rows(&self) -> usize {
        self.records.iter().filter(|r| r.is_fallback()).count()
    }
}

/// Fetch, reconstruct and expand, one show at a time.
pub struct Pipeline {
    http: Arc<dyn HttpClientPort>,
    expander: ExpandSeasonsUseCase,
    progress: Arc<dyn ProgressPort>,
    source: SourceConfig,
}

impl Pipeline {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        expander: ExpandSeasonsUseCase,
        progress: Arc<dyn ProgressPort>,
        source: SourceConfig,
    ) -> Self {
        Self {
            http,
            expander,
            progress,
            source,
        }
    }

    /// Fetches the listing page and rebuilds its show table.
    #[instrument(skip(self))]
    pub async fn reconstruct_table(
        &self,
        url: &str,
        max_items: Option<NonZeroUsize>,
    ) -> Result<ReconstructedTable> {
        info!("📡 Fetching {}", url);
        let page = match self.http.get(url).await {
            Ok(page) => page,
            Err(e) => {
                error!("Failed to fetch {}: {}", url, e);
                self.progress.error(&format!("❌ Error accessing {}: {}", url, e));
                return Err(e);
            }
        };

        self.progress.info("🔍 Looking for the show table on the wiki page...");
        let options = TableOptions::from_config(&self.source, max_items);
        match reconstruct(&page.text(), url, &options) {
            Ok(table) => Ok(table),
            Err(e) => {
                error!("Table reconstruction failed: {}", e);
                self.progress.error(&format!("❌ {}", e));
                Err(e.into())
            }
        }
    }

    /// Run the complete pipeline for a wiki page
    #[instrument(skip(self))]
    pub async fn run(&self, url: &str, max_items: Option<NonZeroUsize>) -> Result<PipelineResult> {
        let table = self.reconstruct_table(url, max_items).await?;
        let shows = table.shows();
        if shows.is_empty() {
            warn!("No shows found in the table");
            self.progress.error("❌ The table has no usable rows.");
        }

        let mut records = Vec::new();
        let mut errors = ErrorLog::new();

        for show in &shows {
            let msg = format!("📺 Expanding: {}", show.name);
            info!("{}", msg);
            self.progress.info(&msg);

            let outcome = self.expander.expand(show).await;
            if let Some(message) = &outcome.error {
                errors.record(&show.name, message.clone());
            }
            let error_text = errors.message_for(&show.name);

            if outcome.seasons.is_empty() {
                records.push(SeasonRecord::fallback(show, &outcome.enrichment, error_text));
            } else {
                records.extend(
                    outcome
                        .seasons
                        .iter()
                        .map(|season| SeasonRecord::for_season(show, &outcome.enrichment, season, error_text)),
                );
            }
        }

        info!(
            "✅ Expanded {} shows into {} rows ({} with errors)",
            shows.len(),
            records.len(),
            errors.len()
        );

        Ok(PipelineResult {
            source_url: url.to_string(),
            shows_processed: shows.len(),
            ghost_rows: table.ghost_rows,
            records,
            errors,
        })
    }
}
