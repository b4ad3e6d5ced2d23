use std::path::PathBuf;

use clap::Parser;

/// Dataset location used when neither the command line nor the
/// environment names one.
pub const DEFAULT_DATA_PATH: &str = "data/fight-songs.csv";

/// School shown first on the profile tab when it exists in the data.
pub const DEFAULT_SCHOOL: &str = "Ohio State";

#[derive(Parser, Debug, Clone)]
#[command(name = "fight-song-dna", about = "Explore the data behind college fight songs")]
pub struct AppConfig {
    /// Fight song CSV to load.
    #[arg(env = "FIGHT_SONGS_CSV", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Start with the raw data table visible.
    #[arg(long)]
    pub show_raw: bool,

    /// School selected on the profile tab at startup.
    #[arg(long, default_value = DEFAULT_SCHOOL)]
    pub school: String,

    /// Prepare the dataset, print a summary and exit without opening a window.
    #[arg(long)]
    pub check: bool,

    /// With --check, print the summary as JSON.
    #[arg(long, requires = "check")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::try_parse_from(["fight-song-dna"]).unwrap();
        assert_eq!(config.school, DEFAULT_SCHOOL);
        assert!(!config.show_raw);
        assert!(!config.check);
    }

    #[test]
    fn json_requires_check() {
        assert!(AppConfig::try_parse_from(["fight-song-dna", "--json"]).is_err());
        let config =
            AppConfig::try_parse_from(["fight-song-dna", "songs.csv", "--check", "--json"]).unwrap();
        assert_eq!(config.data, PathBuf::from("songs.csv"));
        assert!(config.json);
    }
}
