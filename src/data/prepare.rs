use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::error::PrepareError;
use super::loader::{self, RawTable, BASE_COLUMNS};
use super::model::{
    CellValue, DataIssue, IssueKind, PreparedDataset, SongRecord, Trope, TropeFlags,
};
use super::stats;

/// Conference label of the spotlight subgroup.
pub const BIG_TEN: &str = "Big Ten";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the fight song CSV at `path` and derive every analysis column.
pub fn prepare(path: &Path) -> Result<PreparedDataset, PrepareError> {
    let raw = loader::read_csv_file(path)?;
    prepare_table(raw, path.to_path_buf())
}

/// Same as [`prepare`] for an in-memory source; `source` only labels it.
pub fn prepare_reader<R: Read>(
    reader: R,
    source: impl Into<PathBuf>,
) -> Result<PreparedDataset, PrepareError> {
    let raw = loader::read_csv(reader)?;
    prepare_table(raw, source.into())
}

/// Type the raw rows, then impute missing years from the median.
///
/// Two passes: every row is parsed first, and only once the median of
/// all numeric years is known can the unparseable ones be filled in.
pub fn prepare_table(raw: RawTable, source: PathBuf) -> Result<PreparedDataset, PrepareError> {
    let columns = ColumnIndex::new(&raw)?;
    let mut issues = Vec::new();

    // Pass 1: per-row typing, `year_clean` left as NaN where unparseable.
    let mut parsed_years: Vec<Option<f64>> = Vec::with_capacity(raw.rows.len());
    let mut songs: Vec<SongRecord> = Vec::with_capacity(raw.rows.len());

    for (row, record) in raw.rows.iter().enumerate() {
        let field = move |idx: usize| record.get(idx).unwrap_or("");
        let school = field(columns.school).to_string();

        let mut tropes = TropeFlags::default();
        for (trope, &idx) in Trope::ALL.iter().zip(&columns.tropes) {
            let text = field(idx);
            let flag = normalize_flag(text);
            if flag.is_none() {
                warn!("{school}: unrecognized {} flag {text:?}", trope.column());
                issues.push(DataIssue {
                    row,
                    school: school.clone(),
                    column: trope.column().to_string(),
                    raw: text.to_string(),
                    kind: IssueKind::UnrecognizedFlag,
                });
            }
            tropes.set(*trope, flag);
        }

        let mut number = |name: &str, idx: usize| {
            let text = field(idx);
            let value = parse_number(text);
            if value.is_none() {
                warn!("{school}: {name} {text:?} is not a number");
                issues.push(DataIssue {
                    row,
                    school: school.clone(),
                    column: name.to_string(),
                    raw: text.to_string(),
                    kind: IssueKind::UnparseableNumber,
                });
            }
            value
        };
        let bpm = number("bpm", columns.bpm);
        let sec_duration = number("sec_duration", columns.sec_duration);

        let year = field(columns.year).to_string();
        let parsed_year = parse_number(&year);
        parsed_years.push(parsed_year);

        let conference = field(columns.conference).to_string();
        let spotify_id = Some(field(columns.spotify_id).trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let extra: BTreeMap<String, CellValue> = columns
            .extra
            .iter()
            .map(|&idx| (raw.headers[idx].clone(), CellValue::from_text(field(idx))))
            .collect();

        songs.push(SongRecord {
            is_big_ten: conference == BIG_TEN,
            aggression_score: tropes.sum(&Trope::AGGRESSION),
            spirit_score: tropes.sum(&Trope::SPIRIT),
            school,
            conference,
            tropes,
            year,
            year_clean: parsed_year.unwrap_or(f64::NAN),
            bpm,
            sec_duration,
            spotify_id,
            extra,
        });
    }

    // Pass 2: impute.
    let numeric_years: Vec<f64> = parsed_years.iter().flatten().copied().collect();
    let year_median = stats::median(&numeric_years);

    for (row, (song, parsed)) in songs.iter_mut().zip(&parsed_years).enumerate() {
        if parsed.is_some() {
            continue;
        }
        let median = year_median.ok_or(PrepareError::NoParseableYears)?;
        warn!(
            "{}: year {:?} is not numeric, using median {median}",
            song.school, song.year
        );
        song.year_clean = median;
        issues.push(DataIssue {
            row,
            school: song.school.clone(),
            column: "year".to_string(),
            raw: song.year.clone(),
            kind: IssueKind::ImputedYear,
        });
    }

    info!(
        "Prepared {} fight songs from {} ({} numeric years, median {:?}, {} data issues)",
        songs.len(),
        source.display(),
        numeric_years.len(),
        year_median,
        issues.len()
    );

    Ok(PreparedDataset {
        songs,
        trope_columns: Trope::ALL.iter().map(|t| t.column()).collect(),
        headers: raw.headers,
        year_median,
        issues,
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell rules
// ---------------------------------------------------------------------------

/// `Yes` → 1, `No` → 0, anything else (including empty) → missing.
/// Matching is exact: no trimming, no case folding.
pub fn normalize_flag(text: &str) -> Option<u8> {
    match text {
        "Yes" => Some(1),
        "No" => Some(0),
        _ => None,
    }
}

/// Permissive numeric conversion; `None` instead of an error.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Header positions resolved once per table.
struct ColumnIndex {
    school: usize,
    conference: usize,
    year: usize,
    bpm: usize,
    sec_duration: usize,
    spotify_id: usize,
    /// Parallel to `Trope::ALL`.
    tropes: Vec<usize>,
    /// Every other column, in header order.
    extra: Vec<usize>,
}

impl ColumnIndex {
    fn new(raw: &RawTable) -> Result<Self, PrepareError> {
        let find = |name: &str| {
            raw.column_index(name).ok_or_else(|| PrepareError::Schema {
                missing: vec![name.to_string()],
            })
        };

        let tropes = Trope::ALL
            .iter()
            .map(|t| find(t.column()))
            .collect::<Result<Vec<_>, _>>()?;

        let extra = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                !BASE_COLUMNS.contains(&h.as_str())
                    && !Trope::ALL.iter().any(|t| t.column() == h.as_str())
            })
            .map(|(i, _)| i)
            .collect();

        Ok(ColumnIndex {
            school: find("school")?,
            conference: find("conference")?,
            year: find("year")?,
            bpm: find("bpm")?,
            sec_duration: find("sec_duration")?,
            spotify_id: find("spotify_id")?,
            tropes,
            extra,
        })
    }
}
