use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One distinct show found in the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub name: String,
    pub url: Option<String>,
    pub studio: Option<String>,
    pub cast: BTreeSet<String>,
}

impl ShowRecord {
    /// Sorted, comma-joined cast list as it appears in the export.
    pub fn cast_list(&self) -> String {
        join_cast(&self.cast)
    }
}

/// A retained source row after forward-fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub show_name: String,
    /// Only set on rows that started a show.
    pub url: Option<String>,
    pub cast_member: Option<String>,
    pub studio: Option<String>,
    pub cast_list: String,
}

/// Show name to the set of cast members credited on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastMapping {
    inner: HashMap<String, BTreeSet<String>>,
}

impl CastMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the name was already present for that show.
    pub fn add(&mut self, show: &str, cast_member: &str) -> bool {
        self.inner
            .entry(show.to_string())
            .or_default()
            .insert(cast_member.to_string())
    }

    pub fn contains_show(&self, show: &str) -> bool {
        self.inner.contains_key(show)
    }

    pub fn cast_for(&self, show: &str) -> BTreeSet<String> {
        self.inner.get(show).cloned().unwrap_or_default()
    }

    pub fn joined(&self, show: &str) -> String {
        self.inner.get(show).map(join_cast).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn join_cast(cast: &BTreeSet<String>) -> String {
    cast.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Detail-page enrichment shared by every season of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub actor_direction: Option<String>,
    pub technical_direction: Option<String>,
    pub original_title: String,
}

impl Enrichment {
    pub fn bare(title: &str) -> Self {
        Self {
            actor_direction: None,
            technical_direction: None,
            original_title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonId {
    Number(u32),
    Specials,
}

impl SeasonId {
    pub fn from_raw(season_number: u32) -> Self {
        match season_number {
            0 => SeasonId::Specials,
            n => SeasonId::Number(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseYear {
    Year(String),
    Unknown,
}

impl ReleaseYear {
    /// Takes the first four characters of an air date such as `2019-03-01`.
    pub fn from_air_date(air_date: Option<&str>) -> Self {
        match air_date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => ReleaseYear::Year(date.chars().take(4).collect()),
            None => ReleaseYear::Unknown,
        }
    }
}

/// Season data as read from the season catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub season: SeasonId,
    pub release_year: ReleaseYear,
    pub episodes: u32,
}

/// One output row: a (show, season) pair, or the single fallback row of a show
/// whose seasons could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub name: String,
    pub url: Option<String>,
    pub studio: Option<String>,
    pub cast_list: String,
    pub actor_direction: Option<String>,
    pub technical_direction: Option<String>,
    pub original_title: String,
    pub season: Option<SeasonId>,
    pub release_year: Option<ReleaseYear>,
    pub episodes: Option<u32>,
    pub error_log: String,
}

impl SeasonRecord {
    pub fn for_season(
        show: &ShowRecord,
        enrichment: &Enrichment,
        season: &SeasonInfo,
        error_log: &str,
    ) -> Self {
        Self {
            season: Some(season.season),
            release_year: Some(season.release_year.clone()),
            episodes: Some(season.episodes),
            ..Self::fallback(show, enrichment, error_log)
        }
    }

    pub fn fallback(show: &ShowRecord, enrichment: &Enrichment, error_log: &str) -> Self {
        Self {
            name: show.name.clone(),
            url: show.url.clone(),
            studio: show.studio.clone(),
            cast_list: show.cast_list(),
            actor_direction: enrichment.actor_direction.clone(),
            technical_direction: enrichment.technical_direction.clone(),
            original_title: enrichment.original_title.clone(),
            season: None,
            release_year: None,
            episodes: None,
            error_log: error_log.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.season.is_none() && self.release_year.is_none() && self.episodes.is_none()
    }
}

/// Show name to the failure message recorded while expanding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLog {
    entries: BTreeMap<String, String>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, show: &str, message: impl Into<String>) {
        self.entries.insert(show.to_string(), message.into());
    }

    /// Empty string when nothing was recorded for the show.
    pub fn message_for(&self, show: &str) -> &str {
        self.entries.get(show).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}
