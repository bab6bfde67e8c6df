use std::sync::Arc;
use tracing::{debug, warn};

use crate::app::ports::{HttpClientPort, ProgressPort};
use crate::parser::labels::{extract_labels, LabelValues};

/// Reads infobox labels from a show's detail page. Enrichment is best-effort,
/// so failures degrade to every label being absent.
pub struct ExtractLabelsUseCase {
    http: Arc<dyn HttpClientPort>,
    progress: Arc<dyn ProgressPort>,
}

impl ExtractLabelsUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, progress: Arc<dyn ProgressPort>) -> Self {
        Self { http, progress }
    }

    pub async fn extract(&self, url: &str, labels: &[String]) -> LabelValues {
        match self.http.get(url).await {
            Ok(page) => {
                debug!("Fetched detail page {} ({} bytes)", url, page.bytes.len());
                extract_labels(&page.text(), labels)
            }
            Err(e) => {
                warn!("Detail page fetch failed for {}: {}", url, e);
                self.progress
                    .error(&format!("❌ Error accessing {}: {}", url, e));
                LabelValues::absent(labels)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use crate::error::{Result, ScraperError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticHttp(Option<&'static str>);

    #[async_trait]
    impl HttpClientPort for StaticHttp {
        async fn get(&self, _url: &str) -> Result<HttpGetResult> {
            match self.0 {
                Some(body) => Ok(HttpGetResult {
                    bytes: body.as_bytes().to_vec(),
                }),
                None => Err(ScraperError::Api {
                    status: 404,
                    message: "Not Found".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        errors: Mutex<Vec<String>>,
    }

    impl ProgressPort for RecordingProgress {
        fn info(&self, _message: &str) {}
        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    fn labels() -> Vec<String> {
        vec!["Título Original".to_string(), "Direção Técnica".to_string()]
    }

    #[tokio::test]
    async fn test_extract_from_fetched_page() {
        let html = r#"<div class="pi-data"><h3 class="pi-data-label">Título Original</h3><div class="pi-data-value">Bluey</div></div>"#;
        let progress = Arc::new(RecordingProgress::default());
        let use_case = ExtractLabelsUseCase::new(Arc::new(StaticHttp(Some(html))), progress.clone());

        let values = use_case.extract("https://wiki.example/Bluey", &labels()).await;

        assert_eq!(values.get("Título Original"), Some("Bluey"));
        assert_eq!(values.get("Direção Técnica"), None);
        assert!(progress.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_absent() {
        let progress = Arc::new(RecordingProgress::default());
        let use_case = ExtractLabelsUseCase::new(Arc::new(StaticHttp(None)), progress.clone());

        let values = use_case.extract("https://wiki.example/Missing", &labels()).await;

        assert_eq!(values, LabelValues::absent(&labels()));
        assert_eq!(progress.errors.lock().unwrap().len(), 1);
    }
}
