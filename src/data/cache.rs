use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use log::debug;

use super::error::PrepareError;
use super::model::PreparedDataset;
use super::prepare::prepare;

/// Identity of a source file at one point in time. A rewritten file gets
/// a new key, which is what invalidates a cached dataset implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceKey {
    pub fn for_path(path: &Path) -> Result<Self, PrepareError> {
        let unavailable = |source| PrepareError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let canonical = path.canonicalize().map_err(unavailable)?;
        let meta = std::fs::metadata(&canonical).map_err(unavailable)?;
        Ok(SourceKey {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoizes prepared datasets per source file.
///
/// Owned by whoever needs it (the app state, a test) rather than living in
/// a global, so every session decides its own sharing.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, (SourceKey, Arc<PreparedDataset>)>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, preparing it on first access
    /// or when the file changed since it was cached.
    pub fn get_or_prepare(&mut self, path: &Path) -> Result<Arc<PreparedDataset>, PrepareError> {
        self.get_or_prepare_with(path, prepare)
    }

    /// [`get_or_prepare`](Self::get_or_prepare) with a custom preparation step.
    pub fn get_or_prepare_with<F>(
        &mut self,
        path: &Path,
        prepare: F,
    ) -> Result<Arc<PreparedDataset>, PrepareError>
    where
        F: FnOnce(&Path) -> Result<PreparedDataset, PrepareError>,
    {
        let key = SourceKey::for_path(path)?;

        if let Some((cached_key, dataset)) = self.entries.get(&key.path) {
            if *cached_key == key {
                self.hits += 1;
                debug!("Dataset cache hit for {}", key.path.display());
                return Ok(Arc::clone(dataset));
            }
            debug!("{} changed on disk, preparing again", key.path.display());
        }

        self.misses += 1;
        debug!("Dataset cache miss for {}", key.path.display());
        let dataset = Arc::new(prepare(&key.path)?);
        self.entries
            .insert(key.path.clone(), (key, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the entry for `path`. Returns whether one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&canonical).is_some()
    }

    /// Drop every cached dataset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;

    use super::*;

    const CSV: &str = "school,conference,year,bpm,sec_duration,spotify_id,fight,victory,win_won,rah,nonsense,colors,men,opponents,spelling\n\
                       A,SEC,1900,100,60,,Yes,No,No,No,No,No,No,No,No\n";

    #[test]
    fn repeated_access_returns_the_same_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fight-songs.csv");
        fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new();
        let a = cache.get_or_prepare(&path).unwrap();
        let b = cache.get_or_prepare(&path).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn changed_file_is_prepared_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fight-songs.csv");
        fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new();
        let a = cache.get_or_prepare(&path).unwrap();

        fs::write(&path, format!("{CSV}B,ACC,1920,120,90,,No,No,No,No,No,No,No,No,No\n")).unwrap();
        let b = cache.get_or_prepare(&path).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_preparation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fight-songs.csv");
        fs::write(&path, CSV).unwrap();

        let calls = Cell::new(0);
        let counting = |p: &Path| {
            calls.set(calls.get() + 1);
            prepare(p)
        };

        let mut cache = DatasetCache::new();
        cache.get_or_prepare_with(&path, counting).unwrap();
        cache.get_or_prepare_with(&path, counting).unwrap();
        assert_eq!(calls.get(), 1);

        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        cache.get_or_prepare_with(&path, counting).unwrap();
        assert_eq!(calls.get(), 2);

        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_prepare_with(&path, counting).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn failed_preparation_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, "school,conference\nA,SEC\n").unwrap();

        let mut cache = DatasetCache::new();
        assert!(matches!(
            cache.get_or_prepare(&path),
            Err(PrepareError::Schema { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new();
        assert!(matches!(
            cache.get_or_prepare(&dir.path().join("missing.csv")),
            Err(PrepareError::SourceUnavailable { .. })
        ));
    }
}
