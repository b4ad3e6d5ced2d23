use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single pass-through cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell for source columns the dashboard does not
/// interpret itself (song name, writers, ...). Kept so the raw table can
/// show every column of the source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the most specific type for a raw CSV field.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Trope – the nine lyrical flags
// ---------------------------------------------------------------------------

/// One of the nine annotated lyrical conventions of a fight song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trope {
    Fight,
    Victory,
    WinWon,
    Rah,
    Nonsense,
    Colors,
    Men,
    Opponents,
    Spelling,
}

impl Trope {
    /// All tropes in source column order. Aggregations iterate this.
    pub const ALL: [Trope; 9] = [
        Trope::Fight,
        Trope::Victory,
        Trope::WinWon,
        Trope::Rah,
        Trope::Nonsense,
        Trope::Colors,
        Trope::Men,
        Trope::Opponents,
        Trope::Spelling,
    ];

    /// Tropes summed into the aggression score.
    pub const AGGRESSION: [Trope; 4] = [
        Trope::Fight,
        Trope::Victory,
        Trope::WinWon,
        Trope::Opponents,
    ];

    /// Tropes summed into the spirit score.
    pub const SPIRIT: [Trope; 4] = [Trope::Rah, Trope::Nonsense, Trope::Colors, Trope::Spelling];

    /// Exact column name in the CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Trope::Fight => "fight",
            Trope::Victory => "victory",
            Trope::WinWon => "win_won",
            Trope::Rah => "rah",
            Trope::Nonsense => "nonsense",
            Trope::Colors => "colors",
            Trope::Men => "men",
            Trope::Opponents => "opponents",
            Trope::Spelling => "spelling",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Trope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Normalised trope flags of one song: `Some(0 | 1)` or `None` when the
/// source held anything but `Yes`/`No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TropeFlags([Option<u8>; 9]);

impl TropeFlags {
    pub fn get(&self, trope: Trope) -> Option<u8> {
        self.0[trope.index()]
    }

    pub fn set(&mut self, trope: Trope, value: Option<u8>) {
        self.0[trope.index()] = value;
    }

    /// Sum of the given flags, `None` as soon as one of them is missing.
    pub fn sum(&self, tropes: &[Trope]) -> Option<u8> {
        tropes
            .iter()
            .try_fold(0u8, |acc, &t| self.get(t).map(|v| acc + v))
    }
}

// ---------------------------------------------------------------------------
// SongRecord – one prepared row
// ---------------------------------------------------------------------------

/// One school's fight song with all derived columns populated.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
    pub school: String,
    pub conference: String,
    pub tropes: TropeFlags,
    /// `year` exactly as it appeared in the source.
    pub year: String,
    /// Parsed year, or the dataset median when `year` was not numeric.
    pub year_clean: f64,
    pub bpm: Option<f64>,
    pub sec_duration: Option<f64>,
    pub spotify_id: Option<String>,
    pub aggression_score: Option<u8>,
    pub spirit_score: Option<u8>,
    pub is_big_ten: bool,
    /// Non-required source columns: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

// ---------------------------------------------------------------------------
// Data-quality report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Trope flag other than `Yes`/`No`.
    UnrecognizedFlag,
    /// `bpm` or `sec_duration` that is not a finite number.
    UnparseableNumber,
    /// `year` that is not numeric; replaced by the median year.
    ImputedYear,
}

/// A recovered, non-fatal problem in one cell of the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataIssue {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub school: String,
    pub column: String,
    pub raw: String,
    pub kind: IssueKind,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::UnrecognizedFlag => "unrecognized flag",
            IssueKind::UnparseableNumber => "not a number",
            IssueKind::ImputedYear => "year imputed from median",
        };
        write!(
            f,
            "row {} ({}): {} = {:?}, {what}",
            self.row, self.school, self.column, self.raw
        )
    }
}

// ---------------------------------------------------------------------------
// PreparedDataset – the immutable table every view reads
// ---------------------------------------------------------------------------

/// The analysis-ready fight song table. Never mutated after preparation.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Rows in source order.
    pub songs: Vec<SongRecord>,
    /// Trope column names in fixed order, as used by the spotlight view.
    pub trope_columns: Vec<&'static str>,
    /// Source header in source order.
    pub headers: Vec<String>,
    /// Median of all numeric years, used for imputation.
    pub year_median: Option<f64>,
    pub issues: Vec<DataIssue>,
    pub source: PathBuf,
}

impl PreparedDataset {
    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trope_columns_follow_source_order() {
        let names: Vec<&str> = Trope::ALL.iter().map(|t| t.column()).collect();
        assert_eq!(
            names,
            [
                "fight", "victory", "win_won", "rah", "nonsense", "colors", "men", "opponents",
                "spelling"
            ]
        );
    }

    #[test]
    fn flag_sum_propagates_missing() {
        let mut flags = TropeFlags::default();
        for t in Trope::AGGRESSION {
            flags.set(t, Some(1));
        }
        assert_eq!(flags.sum(&Trope::AGGRESSION), Some(4));

        flags.set(Trope::Victory, None);
        assert_eq!(flags.sum(&Trope::AGGRESSION), None);
    }

    #[test]
    fn cell_values_are_guessed_from_text() {
        assert_eq!(CellValue::from_text(""), CellValue::Null);
        assert_eq!(CellValue::from_text("12"), CellValue::Integer(12));
        assert_eq!(CellValue::from_text("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::from_text("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::from_text("Across the Field"),
            CellValue::String("Across the Field".into())
        );
    }
}
