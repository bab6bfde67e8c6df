use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::*;
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub detail: DetailConfig,
    pub http: HttpConfig,
    pub tmdb: TmdbConfig,
    pub imdb: ImdbConfig,
    pub output: OutputConfig,
}

/// Where the show table lives on the wiki page and how its columns are named.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub section_heading: String,
    pub table_class: String,
    pub name_column: String,
    pub cast_column: String,
    pub studio_column: String,
    /// Base for resolving relative show links. Defaults to the page URL.
    pub base_url: Option<String>,
    /// Only look at this many data rows; handy while poking at a new page.
    pub debug_row_limit: Option<usize>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            section_heading: DEFAULT_SECTION_HEADING.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            cast_column: DEFAULT_CAST_COLUMN.to_string(),
            studio_column: DEFAULT_STUDIO_COLUMN.to_string(),
            base_url: None,
            debug_row_limit: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    pub actor_direction_label: String,
    pub technical_direction_label: String,
    pub original_title_label: String,
}

impl DetailConfig {
    /// Labels requested from each show's detail page.
    pub fn labels(&self) -> Vec<String> {
        vec![
            self.actor_direction_label.clone(),
            self.technical_direction_label.clone(),
            self.original_title_label.clone(),
        ]
    }
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            actor_direction_label: DEFAULT_ACTOR_DIRECTION_LABEL.to_string(),
            technical_direction_label: DEFAULT_TECHNICAL_DIRECTION_LABEL.to_string(),
            original_title_label: DEFAULT_ORIGINAL_TITLE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub base_url: String,
    pub language: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            language: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImdbConfig {
    pub suggestion_url: String,
}

impl Default for ImdbConfig {
    fn default() -> Self {
        Self {
            suggestion_url: DEFAULT_IMDB_SUGGESTION_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub file_stem: String,
    pub specials_label: String,
    pub unknown_year_label: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            specials_label: DEFAULT_SPECIALS_LABEL.to_string(),
            unknown_year_label: DEFAULT_UNKNOWN_YEAR_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Reads `config.toml` (or the given path), then applies environment
    /// overrides. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::read_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read_file(path: Option<&Path>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| Path::new("config.toml"));
        if !config_path.exists() {
            if path.is_some() {
                return Err(ScraperError::Config(format!(
                    "Config file '{}' does not exist",
                    config_path.display()
                )));
            }
            debug!("No config.toml found, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&config_content)?;
        info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "http.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Overrides a few settings from variables looked up through `lookup`.
    /// Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(base_url) = value(BASE_URL_ENV) {
            debug!("{} overrides source.base_url", BASE_URL_ENV);
            self.source.base_url = Some(base_url);
        }
        if let Some(dir) = value(OUTPUT_DIR_ENV) {
            debug!("{} overrides output.dir", OUTPUT_DIR_ENV);
            self.output.dir = dir;
        }
        if let Some(language) = value(TMDB_LANGUAGE_ENV) {
            debug!("{} overrides tmdb.language", TMDB_LANGUAGE_ENV);
            self.tmdb.language = Some(language);
        }
    }
}

/// Reads the TMDb key from the environment, after loading `.env` if present.
pub fn tmdb_api_key() -> Result<String> {
    dotenv::dotenv().ok();
    match std::env::var(TMDB_API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ScraperError::MissingCredential(TMDB_API_KEY_ENV.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_wiki_layout() {
        let config = Config::default();
        assert_eq!(config.source.section_heading, "Séries");
        assert_eq!(config.source.table_class, "article-table");
        assert_eq!(config.source.name_column, "Nome");
        assert_eq!(config.output.specials_label, "Especiais");
        assert_eq!(
            config.detail.labels(),
            vec!["Direção de Atores", "Direção Técnica", "Título Original"]
        );
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [source]
            section_heading = "Filmes"
            debug_row_limit = 16

            [http]
            timeout_seconds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.source.section_heading, "Filmes");
        assert_eq!(config.source.debug_row_limit, Some(16));
        assert_eq!(config.source.cast_column, "Personagem");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Config::from_toml("[http]\ntimeout_seconds = 0\n");
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = Config::from_toml("[output]\ndir = \"from_file\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            (BASE_URL_ENV, "https://wikidobragens.fandom.com"),
            (OUTPUT_DIR_ENV, "/tmp/dubs"),
            (TMDB_LANGUAGE_ENV, "  "),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.base_url.as_deref(), Some("https://wikidobragens.fandom.com"));
        assert_eq!(config.output.dir, "/tmp/dubs");
        assert_eq!(config.tmdb.language, None);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        config.apply_overrides(|_| None);
        assert_eq!(config.output.dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(config.source.base_url, None);
    }

    #[test]
    fn test_explicit_missing_config_path_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }
}
