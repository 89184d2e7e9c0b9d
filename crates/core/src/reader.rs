//! Raw text extraction from CSV and PDF sources.

use crate::error::IngestError;
use crate::table::Table;
use lopdf::Document;
use std::path::Path;

/// Extract the text of every page, concatenate the pages in page order,
/// and flatten newlines to single spaces.
pub fn read_pdf(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)?;
    let document =
        Document::load_mem(&bytes).map_err(|error| IngestError::PdfParse(error.to_string()))?;

    let mut pages = Vec::new();
    for (page_number, _object_id) in document.get_pages() {
        let text = document
            .extract_text(&[page_number])
            .map_err(|error| IngestError::PdfParse(error.to_string()))?;

        if !text.trim().is_empty() {
            pages.push(text);
        }
    }

    if pages.is_empty() {
        return Err(IngestError::PdfParse(format!(
            "pdf had no readable page text: {}",
            path.display()
        )));
    }

    Ok(flatten_pages(&pages))
}

pub(crate) fn flatten_pages(pages: &[String]) -> String {
    pages.concat().replace('\n', " ")
}

/// Parse a delimited file with a header row into a [`Table`].
///
/// A malformed file is an error here; the design this replaces logged
/// the failure and returned an empty result instead.
pub fn read_csv(path: &Path) -> Result<Table, IngestError> {
    Table::read_csv(path)
}

/// For each row, concatenate the values of the named columns separated
/// by single spaces, then append a newline. Column presence is validated
/// before any row is visited.
pub fn combine_columns(path: &Path, columns: &[String]) -> Result<String, IngestError> {
    let table = Table::read_csv(path)?;

    let indices = columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| IngestError::MissingColumn(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut combined = String::new();
    for row in table.rows() {
        for &index in &indices {
            if let Some(value) = row.get(index) {
                combined.push_str(value);
            }
            combined.push(' ');
        }
        combined.push('\n');
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::{combine_columns, flatten_pages, read_csv, read_pdf};
    use crate::error::IngestError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_people_csv(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("people.csv");
        fs::write(
            &path,
            "First Name,Last Name,Job Title\nAna,Silva,Engineer\nBob,Lima,Developer\n",
        )
        .expect("fixture written");
        path
    }

    #[test]
    fn combine_columns_matches_the_reference_layout() {
        let dir = tempdir().expect("tempdir");
        let path = write_people_csv(dir.path());

        let columns = vec![
            "First Name".to_string(),
            "Last Name".to_string(),
            "Job Title".to_string(),
        ];
        let combined = combine_columns(&path, &columns).expect("combine");
        assert_eq!(combined, "Ana Silva Engineer \nBob Lima Developer \n");
    }

    #[test]
    fn combine_columns_emits_one_line_per_row_in_requested_order() {
        let dir = tempdir().expect("tempdir");
        let path = write_people_csv(dir.path());

        let columns = vec!["Job Title".to_string(), "First Name".to_string()];
        let combined = combine_columns(&path, &columns).expect("combine");

        let lines: Vec<&str> = combined.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Engineer Ana ");
        assert!(combined.ends_with('\n'));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = tempdir().expect("tempdir");
        let path = write_people_csv(dir.path());

        let columns = vec!["Salary".to_string()];
        let result = combine_columns(&path, &columns);
        match result {
            Err(IngestError::MissingColumn(name)) => assert_eq!(name, "Salary"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn ragged_csv_rows_are_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b\n1,2\n3\n").expect("fixture written");

        let result = read_csv(&path);
        assert!(matches!(result, Err(IngestError::CsvParse(_))));
    }

    #[test]
    fn missing_csv_file_is_an_io_error() {
        let result = read_csv(Path::new("/nonexistent/people.csv"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }

    #[test]
    fn unreadable_pdf_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\n%broken").expect("fixture written");

        let result = read_pdf(&path);
        assert!(matches!(result, Err(IngestError::PdfParse(_))));
    }

    #[test]
    fn missing_pdf_file_is_an_io_error() {
        let result = read_pdf(Path::new("/nonexistent/doc.pdf"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }

    #[test]
    fn flatten_pages_joins_pages_and_replaces_newlines() {
        let pages = vec!["era uma vez\ntres porquinhos".to_string(), "fim".to_string()];
        assert_eq!(flatten_pages(&pages), "era uma vez tres porquinhosfim");
    }
}
