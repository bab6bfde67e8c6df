use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::debug;

use super::{cell_text, spaced_text};

static DATA_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.pi-data").expect("valid selector"));
static DATA_LABEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.pi-data-label").expect("valid selector"));
static DATA_VALUE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.pi-data-value").expect("valid selector"));

/// Requested infobox labels mapped to their value, `None` when not on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelValues {
    values: BTreeMap<String, Option<String>>,
}

impl LabelValues {
    /// Every requested label present and absent.
    pub fn absent<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            values: labels
                .iter()
                .map(|label| (label.as_ref().to_string(), None))
                .collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).and_then(|v| v.as_deref())
    }

    pub fn is_requested(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    pub fn found_count(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }

    fn set(&mut self, label: &str, value: String) {
        if let Some(slot) = self.values.get_mut(label) {
            *slot = Some(value);
        }
    }
}

/// Reads portable-infobox key/value blocks from a detail page.
///
/// A block counts only when it carries both a label and a value element; the
/// result is restricted to the requested labels.
pub fn extract_labels<S: AsRef<str>>(html: &str, labels: &[S]) -> LabelValues {
    let document = Html::parse_document(html);
    let mut result = LabelValues::absent(labels);

    for block in document.select(&DATA_BLOCK) {
        let (Some(label), Some(value)) = (
            block.select(&DATA_LABEL).next(),
            block.select(&DATA_VALUE).next(),
        ) else {
            continue;
        };

        let label_text = cell_text(&label);
        if result.is_requested(&label_text) {
            result.set(&label_text, spaced_text(&value));
        }
    }

    debug!(
        "Extracted {}/{} requested labels",
        result.found_count(),
        labels.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFOBOX: &str = r#"
        <html><body>
        <aside class="portable-infobox">
            <div class="pi-item pi-data">
                <h3 class="pi-data-label">Título Original</h3>
                <div class="pi-data-value">Avatar: The Last Airbender</div>
            </div>
            <div class="pi-item pi-data">
                <h3 class="pi-data-label">Direção de Atores</h3>
                <div class="pi-data-value"><a href="/wiki/Ana">Ana Silva</a><br><a href="/wiki/Rui">Rui Costa</a></div>
            </div>
            <div class="pi-item pi-data">
                <h3 class="pi-data-label">Estúdio</h3>
                <div class="pi-data-value">Matinha</div>
            </div>
            <div class="pi-item pi-data">
                <h3 class="pi-data-label">Direção Técnica</h3>
            </div>
        </aside>
        </body></html>
    "#;

    #[test]
    fn test_extracts_requested_labels_only() {
        let labels = ["Título Original", "Direção de Atores", "Direção Técnica"];
        let values = extract_labels(INFOBOX, &labels);

        assert_eq!(values.get("Título Original"), Some("Avatar: The Last Airbender"));
        assert_eq!(values.get("Direção de Atores"), Some("Ana Silva Rui Costa"));
        // block without a value element is skipped
        assert_eq!(values.get("Direção Técnica"), None);
        assert!(!values.is_requested("Estúdio"));
        assert_eq!(values.found_count(), 2);
    }

    #[test]
    fn test_page_without_infobox_yields_all_absent() {
        let labels = ["Título Original"];
        let values = extract_labels("<html><body><p>nothing</p></body></html>", &labels);

        assert!(values.is_requested("Título Original"));
        assert_eq!(values.get("Título Original"), None);
        assert_eq!(values, LabelValues::absent(&labels));
    }
}
