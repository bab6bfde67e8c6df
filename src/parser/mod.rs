//! HTML parsing for the wiki pages: the show table on the listing page and the
//! infobox on each show's detail page.
//!
//! Everything here is synchronous and works on already-fetched markup, so
//! `scraper::Html` never has to live across an `.await`.

pub mod labels;
pub mod table;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Text of an element with every text fragment trimmed and glued together.
pub fn cell_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<String>()
}

/// Text of an element with trimmed fragments joined by single spaces.
pub fn spaced_text(element: &ElementRef) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE_RUN.replace_all(&joined, " ").into_owned()
}

/// Replaces empty or missing values with the nearest preceding non-empty one.
/// Leading gaps stay `None`.
pub fn forward_fill<I>(values: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut last: Option<String> = None;
    values
        .into_iter()
        .map(|value| match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                last = Some(v.clone());
                Some(v)
            }
            None => last.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_forward_fill_inherits_previous_value() {
        let filled = forward_fill(vec![
            Some("A".to_string()),
            None,
            Some(String::new()),
            Some("B".to_string()),
            None,
        ]);
        assert_eq!(
            filled,
            vec![
                Some("A".to_string()),
                Some("A".to_string()),
                Some("A".to_string()),
                Some("B".to_string()),
                Some("B".to_string()),
            ]
        );
    }

    #[test]
    fn test_forward_fill_keeps_leading_gaps() {
        let filled = forward_fill(vec![None, Some("X".to_string())]);
        assert_eq!(filled, vec![None, Some("X".to_string())]);
    }

    #[test]
    fn test_forward_fill_is_noop_without_gaps() {
        let input = vec![Some("A".to_string()), Some("B".to_string())];
        assert_eq!(forward_fill(input.clone()), input);
    }

    #[test]
    fn test_text_helpers() {
        let html = Html::parse_fragment("<div> <b>Ana</b>\n  <i> Maria </i> </div>");
        let selector = Selector::parse("div").unwrap();
        let div = html.select(&selector).next().unwrap();

        assert_eq!(cell_text(&div), "AnaMaria");
        assert_eq!(spaced_text(&div), "Ana Maria");
    }
}
