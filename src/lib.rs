pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod types;

// Application use cases and the ports they depend on
pub mod app;
// Adapters for HTTP, the external catalogs and console output
pub mod infra;
