use std::collections::BTreeSet;

use super::error::LookupError;
use super::model::PreparedDataset;

/// Tempo that maps to the outer ring of the profile chart.
pub const BPM_SCALE: f64 = 200.0;
/// Duration in seconds that maps to the outer ring of the profile chart.
pub const DURATION_SCALE: f64 = 180.0;
/// Radial range of every profile axis.
pub const AXIS_MAX: f64 = 4.0;

pub const AXIS_LABELS: [&str; 4] = ["Aggression", "Spirit", "Tempo (Scaled)", "Duration (Scaled)"];

const SPOTIFY_EMBED_BASE: &str = "https://open.spotify.com/embed/track/";

/// Four-axis profile of one school's fight song.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolProfile {
    pub school: String,
    /// Parallel to [`AXIS_LABELS`]; `None` where the source value is missing.
    pub axes: [Option<f64>; 4],
    pub spotify_id: Option<String>,
}

impl SchoolProfile {
    /// Embed URL for the audio preview, if the song has a track id.
    pub fn spotify_embed_url(&self) -> Option<String> {
        self.spotify_id.as_deref().map(spotify_embed_url)
    }
}

pub fn spotify_embed_url(track_id: &str) -> String {
    format!("{SPOTIFY_EMBED_BASE}{track_id}")
}

/// Sorted, de-duplicated school names for the selector.
pub fn school_names(dataset: &PreparedDataset) -> Vec<String> {
    dataset
        .songs
        .iter()
        .map(|s| s.school.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Profile of the first row whose `school` equals `school` exactly.
pub fn school_profile(dataset: &PreparedDataset, school: &str) -> Result<SchoolProfile, LookupError> {
    let song = dataset
        .songs
        .iter()
        .find(|s| s.school == school)
        .ok_or_else(|| LookupError::SchoolNotFound(school.to_string()))?;

    Ok(SchoolProfile {
        school: song.school.clone(),
        axes: [
            song.aggression_score.map(f64::from),
            song.spirit_score.map(f64::from),
            song.bpm.map(|bpm| bpm / BPM_SCALE * AXIS_MAX),
            song.sec_duration.map(|secs| secs / DURATION_SCALE * AXIS_MAX),
        ],
        spotify_id: song.spotify_id.clone(),
    })
}
