use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::info;

use crate::badge::BadgeRecord;
use crate::error::{Error, Result};

// Bulk ingestion
//------------------------------------------------------------------------------

/// One rejected row from a bulk upload. `row` is the 1-based line number in
/// the source file, header included, so it matches what users see in their
/// spreadsheet application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub error: String,
}

/// Outcome of parsing a bulk upload. Valid and invalid rows travel together;
/// a handful of bad rows never aborts the batch.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub records: Vec<BadgeRecord>,
    pub row_errors: Vec<RowError>,
}

/// Parses a bulk upload into badge records, dispatching on the file
/// extension. CSV goes through the csv crate; xlsx, xls and ods go through
/// calamine. Anything else is rejected outright.
pub fn parse_records(bytes: &[u8], filename: &str) -> Result<BatchResult> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    let batch = match ext.as_str() {
        "csv" => parse_csv(bytes)?,
        "xlsx" | "xlsm" | "xls" | "ods" => parse_spreadsheet(bytes)?,
        other => return Err(Error::UnsupportedFile(other.to_string())),
    };
    info!(
        file = filename,
        accepted = batch.records.len(),
        rejected = batch.row_errors.len(),
        "parsed bulk upload"
    );
    Ok(batch)
}

// Column resolution
//------------------------------------------------------------------------------

struct ColumnMap {
    first_name: usize,
    last_name: usize,
    company: usize,
    website: Option<usize>,
    linkedin: Option<usize>,
}

/// Case- and accent-tolerant header matching. The platform's upload templates
/// circulate in both English and French, so both spellings are first-class.
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        aliases.iter().any(|a| h == *a)
    })
}

fn map_columns(headers: &[String]) -> Result<ColumnMap> {
    let first_name = find_column(headers, &["firstname", "first name", "prénom", "prenom"]);
    let last_name = find_column(headers, &["lastname", "last name", "nom"]);
    let company = find_column(headers, &["company", "entreprise", "société", "societe"]);
    let website = find_column(headers, &["website", "site web", "siteweb", "site"]);
    let linkedin = find_column(headers, &["linkedin"]);

    let mut missing = Vec::new();
    if first_name.is_none() {
        missing.push("firstName".to_string());
    }
    if last_name.is_none() {
        missing.push("lastName".to_string());
    }
    if company.is_none() {
        missing.push("company".to_string());
    }
    if let (Some(first_name), Some(last_name), Some(company)) = (first_name, last_name, company) {
        Ok(ColumnMap { first_name, last_name, company, website, linkedin })
    } else {
        Err(Error::MissingColumns(missing))
    }
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|s| s.trim().to_string()).unwrap_or_default()
}

fn optional_cell(row: &[String], index: Option<usize>) -> Option<String> {
    index.map(|i| cell(row, i)).filter(|s| !s.is_empty())
}

/// Builds and validates one record; `line` is the 1-based source line.
fn collect_row(batch: &mut BatchResult, map: &ColumnMap, row: &[String], line: usize) {
    let record = BadgeRecord {
        first_name: cell(row, map.first_name),
        last_name: cell(row, map.last_name),
        company: cell(row, map.company),
        website: optional_cell(row, map.website),
        linkedin: optional_cell(row, map.linkedin),
    };
    match record.validate() {
        Ok(()) => batch.records.push(record),
        Err(error) => batch.row_errors.push(RowError { row: line, error }),
    }
}

// Readers
//------------------------------------------------------------------------------

fn parse_csv(bytes: &[u8]) -> Result<BatchResult> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Table(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let map = map_columns(&headers)?;

    let mut batch = BatchResult::default();
    for (i, row) in reader.records().enumerate() {
        let line = i + 2;
        match row {
            Ok(row) => {
                let row: Vec<String> = row.iter().map(str::to_string).collect();
                if row.iter().all(|c| c.trim().is_empty()) {
                    continue;
                }
                collect_row(&mut batch, &map, &row, line);
            }
            Err(e) => batch.row_errors.push(RowError { row: line, error: e.to_string() }),
        }
    }
    Ok(batch)
}

fn parse_spreadsheet(bytes: &[u8]) -> Result<BatchResult> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::Table(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Table("workbook has no sheets".to_string()))?
        .map_err(|e| Error::Table(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| Error::Table("sheet is empty".to_string()))?
        .iter()
        .map(render_cell)
        .collect();
    let map = map_columns(&headers)?;

    let mut batch = BatchResult::default();
    for (i, row) in rows.enumerate() {
        let line = i + 2;
        let row: Vec<String> = row.iter().map(render_cell).collect();
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        collect_row(&mut batch, &map, &row, line);
    }
    Ok(batch)
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod ingest_tests {
    use super::*;

    const CSV: &str = "\
firstName,lastName,company,website,linkedin
Jean,Dupont,Acme,https://acme.com,
Marie,Curie,Radium,,https://linkedin.com/in/mc
Ada,Lovelace,Analytical,https://engine.example,
Blaise,Pascal,,https://pascal.example,
";

    #[test]
    fn mixed_batch_splits_valid_and_invalid_rows() {
        let batch = parse_records(CSV.as_bytes(), "guests.csv").unwrap();
        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.records[0].first_name, "Jean");
        assert_eq!(
            batch.row_errors,
            vec![RowError { row: 5, error: "Entreprise manquante".into() }]
        );
    }

    #[test]
    fn french_headers_are_recognized() {
        let csv = "Prénom,Nom,Entreprise,Site web\nJean,Dupont,Acme,https://acme.com\n";
        let batch = parse_records(csv.as_bytes(), "invites.csv").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].website.as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn header_matching_ignores_case_and_padding() {
        let csv = " FIRSTNAME , LastName ,COMPANY,Website\nJean,Dupont,Acme,https://acme.com\n";
        let batch = parse_records(csv.as_bytes(), "guests.csv").unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn missing_required_columns_abort_the_batch() {
        let csv = "firstName,website\nJean,https://acme.com\n";
        let err = parse_records(csv.as_bytes(), "guests.csv").unwrap_err();
        match err {
            Error::MissingColumns(cols) => {
                assert_eq!(cols, vec!["lastName".to_string(), "company".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped_silently() {
        let csv = "firstName,lastName,company,website\nJean,Dupont,Acme,https://acme.com\n,,,\n";
        let batch = parse_records(csv.as_bytes(), "guests.csv").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert!(batch.row_errors.is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = parse_records(b"whatever", "guests.pdf").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(ext) if ext == "pdf"));
    }

    #[test]
    fn macro_enabled_workbooks_reach_the_spreadsheet_reader() {
        // Dispatch accepts the extension; the junk payload then fails as a
        // table error, not as an unsupported format.
        let err = parse_records(b"not a workbook", "guests.xlsm").unwrap_err();
        assert!(matches!(err, Error::Table(_)));
    }

    #[test]
    fn linkedin_only_rows_are_valid() {
        let csv = "firstName,lastName,company,linkedin\nJean,Dupont,Acme,https://linkedin.com/in/jd\n";
        let batch = parse_records(csv.as_bytes(), "guests.csv").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(
            batch.records[0].destination(),
            Some("https://linkedin.com/in/jd")
        );
    }
}
