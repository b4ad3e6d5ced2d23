use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ConferenceColors;
use crate::config::AppConfig;
use crate::data::cache::DatasetCache;
use crate::data::error::{LookupError, PrepareError};
use crate::data::model::PreparedDataset;
use crate::data::profile::{school_names, school_profile, SchoolProfile};
use crate::data::projection::{
    conference_groups, raw_table, subgroup_spotlight, ConferenceGroup, RawTableView,
    TropeComparison,
};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Conference,
    Spotlight,
    School,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Conference, Tab::Spotlight, Tab::School];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Conference => "📊 Conference Analysis",
            Tab::Spotlight => "🏆 Big Ten Spotlight",
            Tab::School => "🏫 School DNA",
        }
    }
}

// ---------------------------------------------------------------------------
// Projections of the current dataset
// ---------------------------------------------------------------------------

/// View data computed once per loaded dataset.
pub struct Views {
    pub conferences: Vec<ConferenceGroup>,
    pub conference_colors: ConferenceColors,
    pub spotlight: Vec<TropeComparison>,
    pub schools: Vec<String>,
    pub raw: RawTableView,
}

impl Views {
    fn new(dataset: &PreparedDataset) -> Self {
        let conferences = conference_groups(dataset);
        let conference_colors =
            ConferenceColors::new(conferences.iter().map(|g| g.conference.as_str()));
        Views {
            conferences,
            conference_colors,
            spotlight: subgroup_spotlight(dataset),
            schools: school_names(dataset),
            raw: raw_table(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// CSV the current dataset came from (or failed to come from).
    pub source: PathBuf,

    /// Prepared datasets by source file.
    pub cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<PreparedDataset>>,

    pub views: Option<Views>,

    pub tab: Tab,

    /// School shown on the profile tab.
    pub selected_school: Option<String>,

    /// Sidebar "Show Raw Data" toggle.
    pub show_raw_data: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// School to pick once a dataset is available.
    preferred_school: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            source: config.data.clone(),
            cache: DatasetCache::new(),
            dataset: None,
            views: None,
            tab: Tab::default(),
            selected_school: None,
            show_raw_data: config.show_raw,
            status_message: None,
            preferred_school: config.school.clone(),
        }
    }

    /// Prepare the configured source before any window exists. An unreadable
    /// source or a missing column is returned to the caller, not shown.
    pub fn startup(config: &AppConfig) -> Result<Self, PrepareError> {
        let mut cache = DatasetCache::new();
        let dataset = cache.get_or_prepare(&config.data)?;
        Ok(Self::with_dataset(config, cache, dataset))
    }

    /// State over an already prepared dataset and the cache that produced it.
    pub fn with_dataset(
        config: &AppConfig,
        cache: DatasetCache,
        dataset: Arc<PreparedDataset>,
    ) -> Self {
        let mut state = Self::new(config);
        state.cache = cache;
        state.set_dataset(dataset);
        state
    }

    /// Load `path` through the cache and make it the current dataset
    /// ("Open…" / "Reload" after startup). On failure the previous dataset
    /// is dropped so no stale data shows.
    pub fn load(&mut self, path: &Path) {
        self.source = path.to_path_buf();
        match self.cache.get_or_prepare(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} fight songs with columns {:?}",
                    dataset.len(),
                    dataset.headers
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.dataset = None;
                self.views = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop the cached copy of the current source and load it again.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        self.cache.invalidate(&source);
        self.load(&source);
    }

    /// Ingest a prepared dataset and keep the school selection valid.
    pub fn set_dataset(&mut self, dataset: Arc<PreparedDataset>) {
        let views = Views::new(&dataset);

        let keep = self
            .selected_school
            .as_ref()
            .filter(|s| views.schools.contains(s))
            .cloned();
        self.selected_school = keep.or_else(|| {
            views
                .schools
                .iter()
                .find(|s| **s == self.preferred_school)
                .or_else(|| views.schools.first())
                .cloned()
        });

        self.views = Some(views);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    pub fn select_school(&mut self, school: String) {
        self.selected_school = Some(school);
    }

    pub fn toggle_raw_data(&mut self) {
        self.show_raw_data = !self.show_raw_data;
    }

    /// Profile for the selected school, `None` when nothing is selected.
    pub fn selected_profile(&self) -> Option<Result<SchoolProfile, LookupError>> {
        let dataset = self.dataset.as_ref()?;
        let school = self.selected_school.as_ref()?;
        Some(school_profile(dataset, school))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    const HEADER: &str = "school,conference,year,bpm,sec_duration,spotify_id,fight,victory,win_won,rah,nonsense,colors,men,opponents,spelling";

    fn config(path: &Path, school: &str) -> AppConfig {
        AppConfig::parse_from([
            "fight-song-dna",
            path.to_str().unwrap(),
            "--school",
            school,
        ])
    }

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fight-songs.csv");
        fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
        path
    }

    #[test]
    fn startup_fails_on_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        assert!(matches!(
            AppState::startup(&config(&path, "Iowa")),
            Err(PrepareError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn startup_fails_on_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fight-songs.csv");
        fs::write(&path, "school,conference,year\nIowa,Big Ten,1911\n").unwrap();
        match AppState::startup(&config(&path, "Iowa")) {
            Err(PrepareError::Schema { missing }) => {
                assert!(missing.contains(&"bpm".to_string()));
            }
            Err(other) => panic!("expected schema error, got {other}"),
            Ok(_) => panic!("startup succeeded without required columns"),
        }
    }

    #[test]
    fn startup_loads_dataset_through_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Iowa,Big Ten,1911,140,80,,Yes,No,No,No,No,No,No,No,No\n");
        let mut state = AppState::startup(&config(&path, "Iowa")).unwrap();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
        assert_eq!(state.selected_school.as_deref(), Some("Iowa"));
        assert!(state.status_message.is_none());

        state.load(&path);
        assert_eq!(state.cache.stats(), (1, 1));
    }

    #[test]
    fn preferred_school_is_selected_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Purdue,Big Ten,1912,150,70,,Yes,No,No,No,No,No,No,No,No\n\
             Ohio State,Big Ten,1915,120,90,abc,Yes,Yes,No,Yes,No,Yes,No,Yes,Yes\n",
        );
        let mut state = AppState::new(&config(&path, "Ohio State"));
        state.load(&path);

        assert_eq!(state.selected_school.as_deref(), Some("Ohio State"));
        let profile = state.selected_profile().unwrap().unwrap();
        assert_eq!(profile.axes[0], Some(3.0));
    }

    #[test]
    fn falls_back_to_first_school_alphabetically() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Purdue,Big Ten,1912,150,70,,Yes,No,No,No,No,No,No,No,No\n\
             Iowa,Big Ten,1911,140,80,,Yes,No,No,No,No,No,No,No,No\n",
        );
        let mut state = AppState::new(&config(&path, "Ohio State"));
        state.load(&path);
        assert_eq!(state.selected_school.as_deref(), Some("Iowa"));
    }

    #[test]
    fn unknown_selection_refuses_to_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Iowa,Big Ten,1911,140,80,,Yes,No,No,No,No,No,No,No,No\n");
        let mut state = AppState::new(&config(&path, "Iowa"));
        state.load(&path);

        state.select_school("Michigan".into());
        assert_eq!(
            state.selected_profile(),
            Some(Err(LookupError::SchoolNotFound("Michigan".into())))
        );
    }

    #[test]
    fn failed_load_clears_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Iowa,Big Ten,1911,140,80,,Yes,No,No,No,No,No,No,No,No\n");
        let mut state = AppState::new(&config(&path, "Iowa"));
        state.load(&path);
        assert!(state.dataset.is_some());

        state.load(&dir.path().join("missing.csv"));
        assert!(state.dataset.is_none());
        assert!(state.views.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn reload_prepares_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Iowa,Big Ten,1911,140,80,,Yes,No,No,No,No,No,No,No,No\n");
        let mut state = AppState::new(&config(&path, "Iowa"));
        state.load(&path);
        state.load(&path);
        assert_eq!(state.cache.stats(), (1, 1));

        state.reload();
        assert_eq!(state.cache.stats(), (1, 2));
    }
}
