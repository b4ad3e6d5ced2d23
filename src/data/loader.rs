use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::error::PrepareError;
use super::model::Trope;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Non-trope columns the preparer reads. Names are matched exactly.
pub const BASE_COLUMNS: [&str; 6] = [
    "school",
    "conference",
    "year",
    "bpm",
    "sec_duration",
    "spotify_id",
];

/// Every column that must be present, base columns first.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    BASE_COLUMNS
        .into_iter()
        .chain(Trope::ALL.iter().map(|t| t.column()))
}

// ---------------------------------------------------------------------------
// RawTable – header + untyped records
// ---------------------------------------------------------------------------

/// The source CSV after schema validation, before any typing.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

/// Read and validate the fight song CSV at `path`.
pub fn read_csv_file(path: &Path) -> Result<RawTable, PrepareError> {
    let file = File::open(path).map_err(|source| PrepareError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Read and validate fight song CSV from any reader. The header row is
/// mandatory; column order is irrelevant.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, PrepareError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(PrepareError::Header)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    validate_schema(&headers)?;

    let rows = reader
        .records()
        .enumerate()
        .map(|(row, result)| result.map_err(|source| PrepareError::Malformed { row, source }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable { headers, rows })
}

/// Fail with every missing required column at once.
fn validate_schema(headers: &[String]) -> Result<(), PrepareError> {
    let missing: Vec<String> = required_columns()
        .filter(|col| !headers.iter().any(|h| h == col))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PrepareError::Schema { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "school,conference,year,bpm,sec_duration,spotify_id,fight,victory,win_won,rah,nonsense,colors,men,opponents,spelling";

    #[test]
    fn reads_rows_in_source_order() {
        let csv = format!(
            "{HEADER}\nA,SEC,1900,100,60,,Yes,No,No,No,No,No,No,No,No\nB,ACC,1910,120,90,x,No,No,No,No,No,No,No,No,No\n"
        );
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(&table.rows[0][0], "A");
        assert_eq!(&table.rows[1][0], "B");
        assert_eq!(table.column_index("spelling"), Some(14));
    }

    #[test]
    fn column_order_is_irrelevant() {
        let csv = "spelling,opponents,men,colors,nonsense,rah,win_won,victory,fight,spotify_id,sec_duration,bpm,year,conference,school\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.column_index("school"), Some(14));
    }

    #[test]
    fn schema_error_names_every_missing_column() {
        let csv = "school,conference,year,bpm,sec_duration,fight,victory,win_won,rah,nonsense,colors,men,opponents\n";
        match read_csv(csv.as_bytes()) {
            Err(PrepareError::Schema { missing }) => {
                assert_eq!(missing, ["spotify_id", "spelling"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let csv = HEADER.replace("school", "School");
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(PrepareError::Schema { missing }) if missing == ["school"]
        ));
    }

    #[test]
    fn ragged_record_is_malformed() {
        let csv = format!("{HEADER}\nA,SEC,1900\n");
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(PrepareError::Malformed { row: 0, .. })
        ));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(
            read_csv_file(&path),
            Err(PrepareError::SourceUnavailable { .. })
        ));
    }
}
