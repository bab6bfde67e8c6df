//! Rebuilds the show table of a dubbing-wiki page.
//!
//! The wiki lists one show per linked row and puts every further character the
//! actor voiced on that show in follow-up rows without a link. The name and
//! studio cells of those follow-up rows are usually empty (merged cells), so
//! rows are attributed to the most recent linked show and the empty cells are
//! forward-filled.

use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{cell_text, forward_fill};
use crate::config::SourceConfig;
use crate::types::{CastMapping, ShowRecord, TableRow};

static SECTION_HEADING: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.mw-headline, div.mw-heading h2, div.mw-heading h3")
        .expect("valid selector")
});
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("valid selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Section '{0}' not found on the page")]
    SectionNotFound(String),

    #[error("No table with class '{0}' follows the section")]
    TableNotFound(String),

    #[error("Required column '{0}' missing from the table header")]
    MissingColumn(String),
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub section_heading: String,
    pub table_class: String,
    pub name_column: String,
    pub cast_column: String,
    pub studio_column: String,
    pub base_url: Option<String>,
    /// Stop once this many rows have been retained.
    pub max_items: Option<NonZeroUsize>,
    /// Stop after examining this many data rows.
    pub debug_row_limit: Option<usize>,
}

impl TableOptions {
    pub fn from_config(source: &SourceConfig, max_items: Option<NonZeroUsize>) -> Self {
        Self {
            section_heading: source.section_heading.clone(),
            table_class: source.table_class.clone(),
            name_column: source.name_column.clone(),
            cast_column: source.cast_column.clone(),
            studio_column: source.studio_column.clone(),
            base_url: source.base_url.clone(),
            max_items,
            debug_row_limit: source.debug_row_limit,
        }
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::from_config(&SourceConfig::default(), None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructedTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub cast: CastMapping,
    /// Rows dropped because they contributed nothing.
    pub ghost_rows: usize,
}

impl ReconstructedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct shows in order of first appearance.
    pub fn shows(&self) -> Vec<ShowRecord> {
        let mut shows: Vec<ShowRecord> = Vec::new();
        for row in &self.rows {
            match shows.iter_mut().find(|s| s.name == row.show_name) {
                Some(show) => {
                    if show.url.is_none() {
                        show.url = row.url.clone();
                    }
                    if show.studio.is_none() {
                        show.studio = row.studio.clone();
                    }
                }
                None => shows.push(ShowRecord {
                    name: row.show_name.clone(),
                    url: row.url.clone(),
                    studio: row.studio.clone(),
                    cast: self.cast.cast_for(&row.show_name),
                }),
            }
        }
        shows
    }
}

/// A retained row before forward-fill.
struct PendingRow {
    /// Name cell text; `None` on continuation rows.
    name: Option<String>,
    url: Option<String>,
    cast_member: Option<String>,
    studio: String,
}

struct ColumnIndex {
    name: usize,
    cast: usize,
    studio: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String], options: &TableOptions) -> Result<Self, TableError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| TableError::MissingColumn(column.to_string()))
        };
        Ok(Self {
            name: find(&options.name_column)?,
            cast: find(&options.cast_column)?,
            studio: find(&options.studio_column)?,
        })
    }
}

/// Parses the show table out of a wiki page.
pub fn reconstruct(
    html: &str,
    page_url: &str,
    options: &TableOptions,
) -> Result<ReconstructedTable, TableError> {
    let document = Html::parse_document(html);
    let table = find_table(&document, options)?;

    let rows: Vec<ElementRef> = table.select(&ROW).collect();
    let Some((header_row, data_rows)) = rows.split_first() else {
        warn!("Table has no rows");
        return Ok(ReconstructedTable::default());
    };

    let headers: Vec<String> = header_row.select(&HEADER_CELL).map(|c| cell_text(&c)).collect();
    let columns = ColumnIndex::resolve(&headers, options)?;
    let base = link_base(options.base_url.as_deref(), page_url);

    let mut cast = CastMapping::new();
    let mut pending: Vec<PendingRow> = Vec::new();
    let mut current_show: Option<String> = None;
    let mut ghost_rows = 0usize;

    for (i, row) in data_rows.iter().enumerate() {
        if options.debug_row_limit.is_some_and(|limit| i >= limit) {
            debug!("Debug row limit {} reached", i);
            break;
        }
        if options.max_items.is_some_and(|cap| pending.len() >= cap.get()) {
            debug!("Item cap reached after {} rows", pending.len());
            break;
        }

        let cells: Vec<ElementRef> = row.select(&DATA_CELL).collect();
        if cells.is_empty() {
            continue;
        }
        let text_at = |idx: usize| cells.get(idx).map(cell_text).unwrap_or_default();

        let name_text = text_at(columns.name);
        let cast_text = text_at(columns.cast);
        let studio_text = text_at(columns.studio);
        let href = cells
            .get(columns.name)
            .and_then(|cell| cell.select(&LINK).next())
            .and_then(|a| a.value().attr("href"));

        if let Some(href) = href {
            let show_name = if name_text.is_empty() {
                current_show.clone()
            } else {
                Some(name_text.clone())
            };
            let Some(show_name) = show_name else {
                warn!("Linked row {} has no name and no preceding show; skipping", i + 1);
                ghost_rows += 1;
                continue;
            };

            if !cast_text.is_empty() {
                cast.add(&show_name, &cast_text);
            }
            current_show = Some(show_name);
            pending.push(PendingRow {
                name: Some(name_text),
                url: Some(resolve_link(base.as_ref(), href)),
                cast_member: Some(cast_text).filter(|c| !c.is_empty()),
                studio: studio_text,
            });
            continue;
        }

        let Some(show_name) = current_show.as_deref() else {
            debug!("Row {} precedes any linked show; skipping", i + 1);
            ghost_rows += 1;
            continue;
        };

        let contributed = if !cast_text.is_empty() {
            Some(cast_text)
        } else if !name_text.is_empty() {
            Some(name_text)
        } else {
            None
        };

        match contributed {
            Some(member) => {
                cast.add(show_name, &member);
                pending.push(PendingRow {
                    name: None,
                    url: None,
                    cast_member: Some(member),
                    studio: studio_text,
                });
            }
            None => ghost_rows += 1,
        }
    }

    let names = forward_fill(pending.iter().map(|r| r.name.clone()));
    let mut assembled: Vec<(String, PendingRow)> = Vec::with_capacity(pending.len());
    for (name, row) in names.into_iter().zip(pending) {
        // Every retained row has a show by construction; a gap here means the
        // row cannot be attributed.
        match name {
            Some(name) => assembled.push((name, row)),
            None => ghost_rows += 1,
        }
    }

    assembled.retain(|(name, row)| {
        row.url.is_some() || row.cast_member.is_some() || cast.contains_show(name)
    });

    let studios = forward_fill(assembled.iter().map(|(_, r)| Some(r.studio.clone())));
    let rows: Vec<TableRow> = assembled
        .into_iter()
        .zip(studios)
        .map(|((show_name, row), studio)| TableRow {
            cast_list: cast.joined(&show_name),
            show_name,
            url: row.url,
            cast_member: row.cast_member,
            studio,
        })
        .collect();

    info!(
        "Reconstructed {} rows across {} shows ({} ghost rows dropped)",
        rows.len(),
        cast.len(),
        ghost_rows
    );

    Ok(ReconstructedTable {
        headers,
        rows,
        cast,
        ghost_rows,
    })
}

fn find_table<'a>(document: &'a Html, options: &TableOptions) -> Result<ElementRef<'a>, TableError> {
    let heading = document
        .select(&SECTION_HEADING)
        .find(|el| cell_text(el) == options.section_heading)
        .ok_or_else(|| TableError::SectionNotFound(options.section_heading.clone()))?;

    // Section content sits next to the heading's container, not inside it.
    let anchor = heading.parent().unwrap_or(*heading);
    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "table"
                && el.value().classes().any(|class| class == options.table_class)
        })
        .ok_or_else(|| TableError::TableNotFound(options.table_class.clone()))
}

fn link_base(base_url: Option<&str>, page_url: &str) -> Option<Url> {
    base_url
        .and_then(|b| Url::parse(b).ok())
        .or_else(|| Url::parse(page_url).ok())
}

fn resolve_link(base: Option<&Url>, href: &str) -> String {
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}
