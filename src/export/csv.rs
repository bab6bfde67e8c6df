use std::io::Write;
use std::path::Path;

use super::{header, record_cells, ExportLabels};
use crate::error::Result;
use crate::types::SeasonRecord;

/// Write a header row plus one row per record to any writer.
pub fn write_rows<W: Write>(writer: W, records: &[SeasonRecord], labels: &ExportLabels) -> Result<()> {
    let mut out = ::csv::WriterBuilder::new().from_writer(writer);
    out.write_record(header())?;
    for record in records {
        out.write_record(record_cells(record, labels).iter().map(|cell| cell.render()))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[SeasonRecord], labels: &ExportLabels) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_rows(file, records, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Enrichment, ReleaseYear, SeasonId, SeasonInfo, ShowRecord};

    #[test]
    fn test_quotes_joined_cast_list() {
        let show = ShowRecord {
            name: "Show A".to_string(),
            url: None,
            studio: Some("X".to_string()),
            cast: ["Alice".to_string(), "Bob".to_string()].into_iter().collect(),
        };
        let season = SeasonInfo {
            season: SeasonId::Number(1),
            release_year: ReleaseYear::Year("2020".to_string()),
            episodes: 10,
        };
        let records = vec![SeasonRecord::for_season(&show, &Enrichment::bare("Show A"), &season, "")];

        let mut buffer = Vec::new();
        write_rows(&mut buffer, &records, &ExportLabels::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Nome,URL,Estúdio,Personagens (Todos)"));
        assert_eq!(lines[1], "Show A,,X,\"Alice, Bob\",,,Show A,1,2020,10,");
    }
}
