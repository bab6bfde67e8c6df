/// Defaults for the dubbing wiki layout. Every value here can be overridden
/// from `config.toml`; these are what the wiki uses today.

// Source table
pub const DEFAULT_SECTION_HEADING: &str = "Séries";
pub const DEFAULT_TABLE_CLASS: &str = "article-table";
pub const DEFAULT_NAME_COLUMN: &str = "Nome";
pub const DEFAULT_CAST_COLUMN: &str = "Personagem";
pub const DEFAULT_STUDIO_COLUMN: &str = "Estúdio";

// Detail-page infobox labels
pub const DEFAULT_ACTOR_DIRECTION_LABEL: &str = "Direção de Atores";
pub const DEFAULT_TECHNICAL_DIRECTION_LABEL: &str = "Direção Técnica";
pub const DEFAULT_ORIGINAL_TITLE_LABEL: &str = "Título Original";

// External catalogs
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMDB_SUGGESTION_URL: &str = "https://v3.sg.media-imdb.com/suggestion";
pub const BASE_URL_ENV: &str = "DUB_SCRAPER_BASE_URL";
pub const OUTPUT_DIR_ENV: &str = "DUB_SCRAPER_OUTPUT_DIR";
pub const TMDB_LANGUAGE_ENV: &str = "DUB_SCRAPER_TMDB_LANGUAGE";
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

// HTTP
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) dub_scraper/0.1";

// Output
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_FILE_STEM: &str = "series_temporadas_expandido";
pub const DEFAULT_SPECIALS_LABEL: &str = "Especiais";
pub const DEFAULT_UNKNOWN_YEAR_LABEL: &str = "N/A";

/// Column headers of the exported table, in output order.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Nome",
    "URL",
    "Estúdio",
    "Personagens (Todos)",
    "Direção de Atores",
    "Direção Técnica",
    "Título Original",
    "Temporada",
    "Ano Lançamento",
    "Episódios",
    "Error Log",
];

// Per-show failure messages recorded in the error log
pub const NO_IMDB_RESULTS: &str = "No results found on IMDb.";
pub const NO_TV_SERIES: &str = "No TV series found in the results.";
pub const TMDB_SHOW_NOT_FOUND: &str = "TMDb show not found";
pub const NO_TMDB_SEASONS: &str = "No seasons listed on TMDb.";
