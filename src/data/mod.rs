/// Data layer: loading, preparation, caching and view projections.
///
/// Architecture:
/// ```text
///  data/fight-songs.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header + records, schema check
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prepare  │  flags → 0/1, scores, is_big_ten, year imputation
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ PreparedDataset  │  immutable, shared via Arc (cache)
///   └─────────────────┘
///        │
///        ▼
///   ┌─────────────────────┐
///   │ projection / profile │  conference groups, spotlight, raw table,
///   └─────────────────────┘  school profile
/// ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod model;
pub mod prepare;
pub mod profile;
pub mod projection;
pub mod stats;
