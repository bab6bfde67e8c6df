use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::{header, record_cells, Cell, ExportLabels};
use crate::error::Result;
use crate::types::SeasonRecord;

const SHEET_NAME: &str = "Temporadas";

pub fn build_workbook(records: &[SeasonRecord], labels: &ExportLabels) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in header().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record_cells(record, labels).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook)
}

pub fn write_xlsx(path: &Path, records: &[SeasonRecord], labels: &ExportLabels) -> Result<()> {
    let mut workbook = build_workbook(records, labels)?;
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Enrichment, ReleaseYear, SeasonId, SeasonInfo, ShowRecord};
    use tempfile::tempdir;

    fn records() -> Vec<SeasonRecord> {
        let show = ShowRecord {
            name: "Bluey".to_string(),
            url: Some("https://wiki.example/Bluey".to_string()),
            studio: Some("Matinha".to_string()),
            cast: ["Chilli".to_string()].into_iter().collect(),
        };
        let season = SeasonInfo {
            season: SeasonId::Number(3),
            release_year: ReleaseYear::Year("2021".to_string()),
            episodes: 49,
        };
        vec![
            SeasonRecord::for_season(&show, &Enrichment::bare("Bluey"), &season, ""),
            SeasonRecord::fallback(&show, &Enrichment::bare("Bluey"), "No results found on IMDb."),
        ]
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_season_and_episode_columns_are_numeric() {
        let labels = ExportLabels::default();
        let cells = record_cells(&records()[0], &labels);

        assert_eq!(header()[7], "Temporada");
        assert_eq!(cells[7], Cell::Number(3.0));
        assert_eq!(header()[9], "Episódios");
        assert_eq!(cells[9], Cell::Number(49.0));
        // year stays text, like its "N/A" marker
        assert_eq!(cells[8], Cell::Text("2021".to_string()));
    }

    #[test]
    fn test_workbook_has_named_sheet_and_packages() {
        let mut workbook = build_workbook(&records(), &ExportLabels::default()).unwrap();
        assert!(workbook.worksheet_from_name(SHEET_NAME).is_ok());

        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(contains(&bytes, "xl/worksheets/sheet1.xml"));
        assert!(contains(&bytes, "xl/sharedStrings.xml"));
    }

    #[test]
    fn test_write_xlsx_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("temporadas.xlsx");

        write_xlsx(&path, &records(), &ExportLabels::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_record_set_still_builds_header_only_sheet() {
        let mut workbook = build_workbook(&[], &ExportLabels::default()).unwrap();
        assert!(!workbook.save_to_buffer().unwrap().is_empty());
    }
}
