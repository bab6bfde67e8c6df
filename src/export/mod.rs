//! CSV and XLSX serializations of the season table. Both share the column
//! order in [`EXPORT_COLUMNS`] and the cell rendering in [`record_cells`].

pub mod csv;
pub mod xlsx;

use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::OutputConfig;
use crate::constants::EXPORT_COLUMNS;
use crate::error::Result;
use crate::types::{ReleaseYear, SeasonId, SeasonRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Both,
}

impl ExportFormat {
    fn wants_csv(self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }

    fn wants_xlsx(self) -> bool {
        matches!(self, ExportFormat::Xlsx | ExportFormat::Both)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    fn optional(value: Option<&str>) -> Self {
        value.map(Cell::text).unwrap_or(Cell::Empty)
    }

    /// The cell as it appears in a text format.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Markers used for values that are not plain data.
#[derive(Debug, Clone)]
pub struct ExportLabels {
    pub specials: String,
    pub unknown_year: String,
}

impl From<&OutputConfig> for ExportLabels {
    fn from(config: &OutputConfig) -> Self {
        Self {
            specials: config.specials_label.clone(),
            unknown_year: config.unknown_year_label.clone(),
        }
    }
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

pub fn header() -> &'static [&'static str] {
    &EXPORT_COLUMNS
}

/// One record as cells, in [`EXPORT_COLUMNS`] order.
pub fn record_cells(record: &SeasonRecord, labels: &ExportLabels) -> Vec<Cell> {
    let season = match record.season {
        Some(SeasonId::Number(n)) => Cell::Number(f64::from(n)),
        Some(SeasonId::Specials) => Cell::text(&labels.specials),
        None => Cell::Empty,
    };
    let year = match &record.release_year {
        Some(ReleaseYear::Year(y)) => Cell::text(y),
        Some(ReleaseYear::Unknown) => Cell::text(&labels.unknown_year),
        None => Cell::Empty,
    };
    let episodes = record
        .episodes
        .map(|n| Cell::Number(f64::from(n)))
        .unwrap_or(Cell::Empty);

    vec![
        Cell::text(&record.name),
        Cell::optional(record.url.as_deref()),
        Cell::optional(record.studio.as_deref()),
        Cell::text(&record.cast_list),
        Cell::optional(record.actor_direction.as_deref()),
        Cell::optional(record.technical_direction.as_deref()),
        Cell::text(&record.original_title),
        season,
        year,
        episodes,
        Cell::text(&record.error_log),
    ]
}

/// Writes the requested formats into `dir` and returns the written paths.
pub fn write_exports(
    records: &[SeasonRecord],
    config: &OutputConfig,
    format: ExportFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let labels = ExportLabels::from(config);
    let mut written = Vec::new();

    if format.wants_csv() {
        let path = dir.join(format!("{}.csv", config.file_stem));
        csv::write_csv(&path, records, &labels)?;
        written.push(path);
    }
    if format.wants_xlsx() {
        let path = dir.join(format!("{}.xlsx", config.file_stem));
        xlsx::write_xlsx(&path, records, &labels)?;
        written.push(path);
    }

    for path in &written {
        info!("Wrote {} rows to {}", records.len(), path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Enrichment, SeasonInfo, ShowRecord};

    fn show() -> ShowRecord {
        ShowRecord {
            name: "Show A".to_string(),
            url: Some("https://wiki.example/Show_A".to_string()),
            studio: Some("X".to_string()),
            cast: ["Bob".to_string(), "Alice".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn test_season_cells() {
        let season = SeasonInfo {
            season: SeasonId::Specials,
            release_year: ReleaseYear::Unknown,
            episodes: 4,
        };
        let record = SeasonRecord::for_season(&show(), &Enrichment::bare("Show A"), &season, "");
        let cells = record_cells(&record, &ExportLabels::default());

        assert_eq!(cells.len(), header().len());
        assert_eq!(cells[3], Cell::Text("Alice, Bob".to_string()));
        assert_eq!(cells[4], Cell::Empty);
        assert_eq!(cells[7], Cell::Text("Especiais".to_string()));
        assert_eq!(cells[8], Cell::Text("N/A".to_string()));
        assert_eq!(cells[9], Cell::Number(4.0));
        assert_eq!(cells[9].render(), "4");
    }

    #[test]
    fn test_fallback_cells_leave_season_columns_empty() {
        let record = SeasonRecord::fallback(&show(), &Enrichment::bare("Show A"), "No results found on IMDb.");
        let cells = record_cells(&record, &ExportLabels::default());

        assert_eq!(&cells[7..10], &[Cell::Empty, Cell::Empty, Cell::Empty]);
        assert_eq!(cells[10].render(), "No results found on IMDb.");
    }

    #[test]
    fn test_literal_unknown_text_is_not_the_marker() {
        let season = SeasonInfo {
            season: SeasonId::Number(2),
            release_year: ReleaseYear::Year("N/A".to_string()),
            episodes: 0,
        };
        let record = SeasonRecord::for_season(&show(), &Enrichment::bare("Show A"), &season, "");
        let labels = ExportLabels {
            specials: "Specials".to_string(),
            unknown_year: "unknown".to_string(),
        };
        let cells = record_cells(&record, &labels);

        assert_eq!(cells[7], Cell::Number(2.0));
        assert_eq!(cells[8].render(), "N/A");
    }
}
