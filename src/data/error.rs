use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while turning the source CSV into a [`PreparedDataset`].
///
/// Per-row data problems are never reported here; they end up as
/// [`DataIssue`]s on the prepared dataset instead.
///
/// [`PreparedDataset`]: super::model::PreparedDataset
/// [`DataIssue`]: super::model::DataIssue
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("cannot read fight song data from {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fight song data is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("cannot read CSV header row: {0}")]
    Header(#[source] csv::Error),

    #[error("malformed CSV record at data row {row}: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("no row has a numeric year, so missing years cannot be imputed")]
    NoParseableYears,
}

/// Failure to resolve a single school for the profile view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no school named \"{0}\" in the dataset")]
    SchoolNotFound(String),
}
