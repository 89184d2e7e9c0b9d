//! Dataframe-style convenience helpers over delimited files.
//!
//! A [`Table`] is a header row plus string rows. The helpers mirror the
//! usual dataframe conveniences: build from columns, read/write CSV,
//! positional and label selection, single-column extraction, `head`.
//! Unrelated to the retrieval pipeline except that the source reader
//! parses CSVs through it.

use crate::error::IngestError;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from named columns. All columns must have the same
    /// length and there must be one name per column.
    pub fn from_columns(
        names: Vec<String>,
        column_data: Vec<Vec<String>>,
    ) -> Result<Self, IngestError> {
        if names.len() != column_data.len() {
            return Err(IngestError::InvalidArgument(format!(
                "{} column names for {} columns of data",
                names.len(),
                column_data.len()
            )));
        }

        let height = column_data.first().map(Vec::len).unwrap_or(0);
        if column_data.iter().any(|column| column.len() != height) {
            return Err(IngestError::InvalidArgument(
                "columns have differing lengths".to_string(),
            ));
        }

        let rows = (0..height)
            .map(|row| column_data.iter().map(|column| column[row].clone()).collect())
            .collect();

        Ok(Self {
            columns: names,
            rows,
        })
    }

    /// Read a CSV file with a header row.
    pub fn read_csv(path: &Path) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let columns = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Write the table as CSV, header row first.
    pub fn write_csv(&self, path: &Path) -> Result<(), IngestError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// The values of one column, by label.
    pub fn column(&self, name: &str) -> Result<Vec<String>, IngestError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| IngestError::MissingColumn(name.to_string()))?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    /// Positional selection: keep the listed row and column indices, in
    /// the order given.
    pub fn select_positions(
        &self,
        row_positions: &[usize],
        column_positions: &[usize],
    ) -> Result<Self, IngestError> {
        for &position in column_positions {
            if position >= self.columns.len() {
                return Err(IngestError::InvalidArgument(format!(
                    "column position {position} out of range for width {}",
                    self.columns.len()
                )));
            }
        }
        for &position in row_positions {
            if position >= self.rows.len() {
                return Err(IngestError::InvalidArgument(format!(
                    "row position {position} out of range for height {}",
                    self.rows.len()
                )));
            }
        }

        let columns = column_positions
            .iter()
            .map(|&position| self.columns[position].clone())
            .collect();
        let rows = row_positions
            .iter()
            .map(|&row| {
                column_positions
                    .iter()
                    .map(|&column| self.rows[row][column].clone())
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Label selection: keep the named columns (all rows), in the order
    /// given.
    pub fn select_labels(&self, names: &[String]) -> Result<Self, IngestError> {
        let positions = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| IngestError::MissingColumn(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let all_rows: Vec<usize> = (0..self.rows.len()).collect();
        self.select_positions(&all_rows, &positions)
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::error::IngestError;
    use tempfile::tempdir;

    fn people() -> Table {
        Table::from_columns(
            vec!["nome".to_string(), "cargo".to_string()],
            vec![
                vec!["Ana".to_string(), "Bob".to_string(), "Carla".to_string()],
                vec![
                    "Engineer".to_string(),
                    "Developer".to_string(),
                    "Designer".to_string(),
                ],
            ],
        )
        .expect("valid columns")
    }

    #[test]
    fn from_columns_rejects_mismatched_name_count() {
        let result = Table::from_columns(
            vec!["a".to_string()],
            vec![vec!["1".to_string()], vec!["2".to_string()]],
        );
        assert!(matches!(result, Err(IngestError::InvalidArgument(_))));
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let result = Table::from_columns(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string()],
            ],
        );
        assert!(matches!(result, Err(IngestError::InvalidArgument(_))));
    }

    #[test]
    fn from_columns_transposes_into_rows() {
        let table = people();
        assert_eq!(table.height(), 3);
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows()[0], vec!["Ana", "Engineer"]);
    }

    #[test]
    fn column_extracts_values_by_label() {
        let table = people();
        let cargo = table.column("cargo").expect("column exists");
        assert_eq!(cargo, vec!["Engineer", "Developer", "Designer"]);

        let result = table.column("salario");
        assert!(matches!(result, Err(IngestError::MissingColumn(_))));
    }

    #[test]
    fn select_positions_keeps_requested_cells() {
        let table = people();
        let selected = table.select_positions(&[2, 0], &[1]).expect("in range");
        assert_eq!(selected.columns().to_vec(), vec!["cargo"]);
        assert_eq!(selected.rows()[0], vec!["Designer"]);
        assert_eq!(selected.rows()[1], vec!["Engineer"]);

        let result = table.select_positions(&[9], &[0]);
        assert!(matches!(result, Err(IngestError::InvalidArgument(_))));
    }

    #[test]
    fn select_labels_reorders_columns() {
        let table = people();
        let selected = table
            .select_labels(&["cargo".to_string(), "nome".to_string()])
            .expect("labels exist");
        assert_eq!(selected.columns().to_vec(), vec!["cargo", "nome"]);
        assert_eq!(selected.rows()[1], vec!["Developer", "Bob"]);
    }

    #[test]
    fn head_limits_the_row_count() {
        let table = people();
        assert_eq!(table.head(2).height(), 2);
        assert_eq!(table.head(10).height(), 3);
    }

    #[test]
    fn written_csv_reads_back_identically() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("people.csv");

        let table = people();
        table.write_csv(&path).expect("write");
        let read_back = Table::read_csv(&path).expect("read");
        assert_eq!(read_back, table);
    }
}
