pub mod console_progress;
pub mod http_client;
pub mod imdb_catalog;
pub mod tmdb_catalog;
