//! Read-only projections of a [`PreparedDataset`] for the dashboard views.
//!
//! Nothing here mutates the dataset; every function is a pure function of
//! the table (plus the current selection where one applies).

use super::model::{PreparedDataset, SongRecord, Trope};
use super::stats::{self, FiveNumberSummary};

// ---------------------------------------------------------------------------
// Conference comparison
// ---------------------------------------------------------------------------

/// Aggression scores of one conference.
#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceGroup {
    pub conference: String,
    /// Every row of the conference: (school, aggression score).
    pub points: Vec<(String, Option<u8>)>,
    /// Over defined scores only; `None` when there are none.
    pub summary: Option<FiveNumberSummary>,
    pub mean: Option<f64>,
    pub cv: Option<f64>,
}

impl ConferenceGroup {
    fn scores(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|(_, s)| s.map(f64::from))
            .collect()
    }
}

/// Group songs by conference, in order of first appearance.
pub fn conference_groups(dataset: &PreparedDataset) -> Vec<ConferenceGroup> {
    let mut groups: Vec<ConferenceGroup> = Vec::new();

    for song in &dataset.songs {
        let point = (song.school.clone(), song.aggression_score);
        match groups.iter_mut().find(|g| g.conference == song.conference) {
            Some(group) => group.points.push(point),
            None => groups.push(ConferenceGroup {
                conference: song.conference.clone(),
                points: vec![point],
                summary: None,
                mean: None,
                cv: None,
            }),
        }
    }

    for group in &mut groups {
        let scores = group.scores();
        group.summary = stats::five_number_summary(&scores);
        group.mean = stats::mean(&scores);
        group.cv = stats::coefficient_of_variation(&scores);
    }
    groups
}

/// Conferences with a defined CV, most uniform (lowest CV) first.
pub fn rank_by_uniformity(groups: &[ConferenceGroup]) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = groups
        .iter()
        .filter_map(|g| g.cv.map(|cv| (g.conference.as_str(), cv)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

// ---------------------------------------------------------------------------
// Big Ten spotlight
// ---------------------------------------------------------------------------

/// Share of songs using a trope inside and outside the Big Ten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TropeComparison {
    pub trope: Trope,
    pub big_ten: Option<f64>,
    pub national: Option<f64>,
}

/// Mean of every trope flag per `is_big_ten` partition, missing flags
/// skipped. One entry per trope, in [`Trope::ALL`] order.
pub fn subgroup_spotlight(dataset: &PreparedDataset) -> Vec<TropeComparison> {
    let flag_mean = |trope: Trope, big_ten: bool| {
        let values: Vec<f64> = dataset
            .songs
            .iter()
            .filter(|s| s.is_big_ten == big_ten)
            .filter_map(|s| s.tropes.get(trope).map(f64::from))
            .collect();
        stats::mean(&values)
    };

    Trope::ALL
        .iter()
        .map(|&trope| TropeComparison {
            trope,
            big_ten: flag_mean(trope, true),
            national: flag_mean(trope, false),
        })
        .collect()
}

/// Tropes the Big Ten uses more often than everyone else, largest lead first.
pub fn leading_tropes(comparisons: &[TropeComparison]) -> Vec<Trope> {
    let mut leads: Vec<(Trope, f64)> = comparisons
        .iter()
        .filter_map(|c| Some((c.trope, c.big_ten? - c.national?)))
        .filter(|(_, lead)| *lead > 0.0)
        .collect();
    leads.sort_by(|a, b| b.1.total_cmp(&a.1));
    leads.into_iter().map(|(t, _)| t).collect()
}

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

/// Columns appended after the source header.
pub const DERIVED_COLUMNS: [&str; 4] = ["aggression_score", "spirit_score", "is_big_ten", "year_clean"];

/// Every prepared row rendered as text: source columns in header order,
/// then the derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn raw_table(dataset: &PreparedDataset) -> RawTableView {
    let headers: Vec<String> = dataset
        .headers
        .iter()
        .cloned()
        .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
        .collect();

    let rows = dataset
        .songs
        .iter()
        .map(|song| {
            dataset
                .headers
                .iter()
                .map(|h| source_cell(song, h))
                .chain([
                    opt_to_string(song.aggression_score),
                    opt_to_string(song.spirit_score),
                    song.is_big_ten.to_string(),
                    song.year_clean.to_string(),
                ])
                .collect()
        })
        .collect();

    RawTableView { headers, rows }
}

fn source_cell(song: &SongRecord, column: &str) -> String {
    if let Some(trope) = Trope::ALL.iter().find(|t| t.column() == column) {
        return opt_to_string(song.tropes.get(*trope));
    }
    match column {
        "school" => song.school.clone(),
        "conference" => song.conference.clone(),
        "year" => song.year.clone(),
        "bpm" => opt_to_string(song.bpm),
        "sec_duration" => opt_to_string(song.sec_duration),
        "spotify_id" => song.spotify_id.clone().unwrap_or_else(|| NULL.to_string()),
        other => song
            .extra
            .get(other)
            .map(|v| v.to_string())
            .unwrap_or_else(|| NULL.to_string()),
    }
}

const NULL: &str = "<null>";

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NULL.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepare::prepare_reader;

    const HEADER: &str = "school,conference,year,bpm,sec_duration,spotify_id,fight,victory,win_won,rah,nonsense,colors,men,opponents,spelling,writers";

    fn dataset(body: &str) -> PreparedDataset {
        prepare_reader(format!("{HEADER}\n{body}").as_bytes(), "test.csv").unwrap()
    }

    #[test]
    fn spotlight_means_per_partition() {
        let ds = dataset(
            "A,Big Ten,1900,100,60,,Yes,No,No,No,No,No,No,No,No,\n\
             B,Big Ten,1900,100,60,,No,No,No,No,No,No,No,No,No,\n\
             C,SEC,1900,100,60,,Yes,No,No,No,No,No,No,No,No,\n\
             D,ACC,1900,100,60,,Yes,No,No,No,No,No,No,No,Yes,\n",
        );
        let cmp = subgroup_spotlight(&ds);
        assert_eq!(cmp.len(), 9);
        assert_eq!(cmp[0].trope, Trope::Fight);
        assert_eq!(cmp[0].big_ten, Some(0.5));
        assert_eq!(cmp[0].national, Some(1.0));

        let spelling = cmp.iter().find(|c| c.trope == Trope::Spelling).unwrap();
        assert_eq!(spelling.big_ten, Some(0.0));
        assert_eq!(spelling.national, Some(0.5));
    }

    #[test]
    fn spotlight_skips_missing_flags_and_empty_partitions() {
        let ds = dataset(
            "A,SEC,1900,100,60,,Yes,No,No,No,No,No,No,No,No,\n\
             B,SEC,1900,100,60,,??,No,No,No,No,No,No,No,No,\n",
        );
        let cmp = subgroup_spotlight(&ds);
        assert_eq!(cmp[0].national, Some(1.0));
        assert_eq!(cmp[0].big_ten, None);
    }

    #[test]
    fn leading_tropes_only_lists_big_ten_leads() {
        let cmp = [
            TropeComparison { trope: Trope::Fight, big_ten: Some(0.5), national: Some(1.0) },
            TropeComparison { trope: Trope::Colors, big_ten: Some(0.9), national: Some(0.4) },
            TropeComparison { trope: Trope::Spelling, big_ten: Some(0.6), national: Some(0.3) },
            TropeComparison { trope: Trope::Men, big_ten: None, national: Some(0.3) },
        ];
        assert_eq!(leading_tropes(&cmp), [Trope::Colors, Trope::Spelling]);
    }

    #[test]
    fn conferences_group_in_first_appearance_order() {
        let ds = dataset(
            "A,SEC,1900,100,60,,Yes,Yes,No,No,No,No,No,No,No,\n\
             B,ACC,1900,100,60,,Yes,No,No,No,No,No,No,No,No,\n\
             C,SEC,1900,100,60,,No,No,No,No,No,No,No,No,No,\n\
             D,SEC,1900,100,60,,?,No,No,No,No,No,No,No,No,\n",
        );
        let groups = conference_groups(&ds);
        let names: Vec<&str> = groups.iter().map(|g| g.conference.as_str()).collect();
        assert_eq!(names, ["SEC", "ACC"]);

        let sec = &groups[0];
        assert_eq!(sec.points.len(), 3);
        assert_eq!(sec.points[2], ("D".to_string(), None));
        assert_eq!(sec.mean, Some(1.0));
        let summary = sec.summary.unwrap();
        assert_eq!((summary.min, summary.median, summary.max), (0.0, 1.0, 2.0));

        assert_eq!(groups[1].cv, None);
        assert_eq!(rank_by_uniformity(&groups), [("SEC", 2f64.sqrt())]);
    }

    #[test]
    fn raw_table_has_source_then_derived_columns() {
        let ds = dataset("Ohio State,Big Ten,Unknown,120,90,abc,Yes,Yes,No,Yes,No,Yes,No,Yes,Yes,Carmen Ohio\nB,SEC,1920,x,90,,No,No,No,No,No,No,No,No,No,\n");
        let view = raw_table(&ds);
        assert_eq!(view.headers.len(), 16 + DERIVED_COLUMNS.len());
        assert_eq!(view.headers.last().map(String::as_str), Some("year_clean"));

        let first = &view.rows[0];
        assert_eq!(first.len(), view.headers.len());
        assert_eq!(first[0], "Ohio State");
        assert_eq!(first[2], "Unknown");
        assert_eq!(first[6], "1");
        assert_eq!(first[15], "Carmen Ohio");
        assert_eq!(&first[16..], ["3", "3", "true", "1920"]);

        let second = &view.rows[1];
        assert_eq!(second[3], "<null>");
        assert_eq!(second[5], "<null>");
        assert_eq!(second[15], "<null>");
    }
}
