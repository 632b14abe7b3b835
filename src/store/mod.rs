//! Read-only access to the maze grid document.
//!
//! `GridStore` wraps an injected [`GridSource`] and answers the four grid
//! queries. Every query either fully succeeds or fails with a [`StoreError`].
//! Authoring problems inside single grids are logged and the document is still
//! served. With [`ReloadPolicy::EveryRequest`] the source is read and validated
//! on each query; with [`ReloadPolicy::OnChange`] the parsed document is cached
//! until the source's modification stamp moves.

pub mod error;
pub mod model;
pub mod source;
pub mod validate;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;

use log::{debug, info, warn};
use tokio::sync::Mutex;

pub use error::{LoadError, Missing, Result, StoreError};
pub use model::{DifficultyGrids, Grid, GridDocument, GridWithSettings, Settings};
pub use source::{FileSource, GridSource, MemorySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Read the source on every query.
    #[default]
    EveryRequest,
    /// Keep the parsed document until the source stamp changes.
    OnChange,
}

impl FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every-request" => Ok(ReloadPolicy::EveryRequest),
            "on-change" => Ok(ReloadPolicy::OnChange),
            other => Err(format!("unknown reload policy '{}'", other)),
        }
    }
}

impl fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReloadPolicy::EveryRequest => "every-request",
            ReloadPolicy::OnChange => "on-change",
        })
    }
}

struct CachedDocument {
    modified: SystemTime,
    document: Arc<GridDocument>,
}

pub struct GridStore<S> {
    source: S,
    policy: ReloadPolicy,
    // Held across the reload so concurrent first accesses share one read.
    cache: Mutex<Option<CachedDocument>>,
}

impl<S: GridSource> GridStore<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, ReloadPolicy::default())
    }

    pub fn with_policy(source: S, policy: ReloadPolicy) -> Self {
        Self {
            source,
            policy,
            cache: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// The full document, unchanged.
    pub async fn get_all(&self) -> Result<GridDocument> {
        let document = self.document().await?;
        Ok(Arc::unwrap_or_clone(document))
    }

    /// Every grid of one difficulty, with that difficulty's settings.
    pub async fn get_by_difficulty(&self, label: &str) -> Result<DifficultyGrids> {
        let document = self.document().await?;
        let grids = document
            .grids
            .get(label)
            .ok_or_else(|| StoreError::not_found(Missing::Difficulty, label))?;
        let settings = settings_for(&document, label)?;
        Ok(DifficultyGrids {
            grids: grids.clone(),
            settings: settings.clone(),
        })
    }

    /// Scan every difficulty in declaration order for the grid with `id`.
    /// The first match wins; load validation rejects duplicate ids.
    pub async fn get_by_id(&self, id: &str) -> Result<GridWithSettings> {
        let document = self.document().await?;
        let (label, grid) = document
            .grids
            .iter()
            .find_map(|(label, grids)| grids.iter().find(|g| g.id == id).map(|g| (label, g)))
            .ok_or_else(|| StoreError::not_found(Missing::Grid, id))?;
        let settings = settings_for(&document, label)?;
        Ok(GridWithSettings {
            grid: grid.clone(),
            settings: settings.clone(),
        })
    }

    pub async fn get_settings(&self, label: &str) -> Result<Settings> {
        let document = self.document().await?;
        settings_for(&document, label).cloned()
    }

    async fn document(&self) -> Result<Arc<GridDocument>> {
        match self.policy {
            ReloadPolicy::EveryRequest => Ok(Arc::new(self.load().await?)),
            ReloadPolicy::OnChange => self.cached_document().await,
        }
    }

    async fn cached_document(&self) -> Result<Arc<GridDocument>> {
        let mut cache = self.cache.lock().await;
        let modified = self.source.modified().await.map_err(LoadError::from)?;

        if let (Some(stamp), Some(cached)) = (modified, &*cache) {
            if cached.modified == stamp {
                return Ok(Arc::clone(&cached.document));
            }
        }

        // A failed load leaves the previous entry in place.
        let document = Arc::new(self.load().await?);
        match modified {
            Some(stamp) => {
                info!(
                    "[GridStore] Cached {} grids from {}",
                    document.grid_count(),
                    self.source.describe()
                );
                *cache = Some(CachedDocument {
                    modified: stamp,
                    document: Arc::clone(&document),
                });
            }
            None => *cache = None,
        }
        Ok(document)
    }

    async fn load(&self) -> std::result::Result<GridDocument, LoadError> {
        let bytes = self.source.read().await?;
        let document: GridDocument = serde_json::from_slice(&bytes)?;
        validate::validate(&document)?;
        for issue in validate::lint(&document) {
            warn!("[GridStore] {} in {}", issue, self.source.describe());
        }
        debug!(
            "[GridStore] Loaded {} difficulties / {} grids from {}",
            document.grids.len(),
            document.grid_count(),
            self.source.describe()
        );
        Ok(document)
    }
}

fn settings_for<'a>(document: &'a GridDocument, label: &str) -> Result<&'a Settings> {
    document
        .difficulty_settings
        .get(label)
        .ok_or_else(|| StoreError::not_found(Missing::Settings, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn grid(id: &str, path_len: u32) -> serde_json::Value {
        json!({
            "id": id,
            "size": { "width": 5, "height": 5 },
            "start": { "x": 0, "y": 0 },
            "end": { "x": 4, "y": 4 },
            "walls": [{ "x": 2, "y": 2 }],
            "optimalPathLength": path_len
        })
    }

    fn fixture() -> serde_json::Value {
        json!({
            "grids": {
                "easy": [grid("e1", 8), grid("e2", 10)],
                "medium": [grid("m1", 12)],
                "hard": [grid("h1", 16), grid("h2", 18), grid("h3", 20)]
            },
            "difficultySettings": {
                "easy": { "timeLimit": 120, "hintsAllowed": 3, "fogOfWar": false },
                "medium": {
                    "timeLimit": 90, "hintsAllowed": 2, "fogOfWar": true, "visibilityRadius": 3
                },
                "hard": {
                    "timeLimit": 60.5, "hintsAllowed": 0, "fogOfWar": true, "movingObstacles": true
                }
            }
        })
    }

    fn memory_store() -> GridStore<MemorySource> {
        GridStore::new(MemorySource::new(fixture().to_string()))
    }

    /// Source whose content and stamp can be swapped, counting reads.
    struct SwappableSource {
        state: StdMutex<(Vec<u8>, Option<SystemTime>)>,
        reads: AtomicUsize,
    }

    impl SwappableSource {
        fn new(body: &serde_json::Value, stamp: Option<SystemTime>) -> Self {
            Self {
                state: StdMutex::new((body.to_string().into_bytes(), stamp)),
                reads: AtomicUsize::new(0),
            }
        }

        fn swap(&self, body: Vec<u8>, stamp: Option<SystemTime>) {
            *self.state.lock().unwrap() = (body, stamp);
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl GridSource for SwappableSource {
        async fn read(&self) -> io::Result<Vec<u8>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(self.state.lock().unwrap().0.clone())
        }

        async fn modified(&self) -> io::Result<Option<SystemTime>> {
            Ok(self.state.lock().unwrap().1)
        }

        fn describe(&self) -> String {
            "<swappable>".to_string()
        }
    }

    fn on_change_store(stamp: Option<SystemTime>) -> GridStore<SwappableSource> {
        GridStore::with_policy(SwappableSource::new(&fixture(), stamp), ReloadPolicy::OnChange)
    }

    fn stamp(secs: u64) -> Option<SystemTime> {
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[tokio::test]
    async fn test_every_difficulty_returns_grids_and_settings() {
        let store = memory_store();
        let all = store.get_all().await.unwrap();

        for (label, grids) in &all.grids {
            let found = store.get_by_difficulty(label).await.unwrap();
            assert!(!found.grids.is_empty());
            assert_eq!(&found.grids, grids);
            assert_eq!(found.settings, all.difficulty_settings[label]);
        }
    }

    #[tokio::test]
    async fn test_every_id_returns_grid_and_owning_settings() {
        let store = memory_store();
        let all = store.get_all().await.unwrap();

        for (label, grids) in &all.grids {
            for grid in grids {
                let found = store.get_by_id(&grid.id).await.unwrap();
                assert_eq!(&found.grid, grid);
                assert_eq!(found.settings, all.difficulty_settings[label]);
            }
        }
    }

    #[tokio::test]
    async fn test_get_all_returns_document_unchanged() {
        let store = memory_store();
        let all = store.get_all().await.unwrap();
        assert_eq!(serde_json::to_value(&all).unwrap(), fixture());
        assert_eq!(all.grid_count(), 6);
    }

    #[tokio::test]
    async fn test_unknown_keys_are_not_found() {
        let store = memory_store();

        let err = store.get_by_difficulty("nonexistent").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: Missing::Difficulty, .. }));

        let err = store.get_settings("nonexistent").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: Missing::Settings, .. }));

        let err = store.get_by_id("nonexistent").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { kind: Missing::Grid, ref key } if key == "nonexistent"
        ));
    }

    #[tokio::test]
    async fn test_get_settings_matches_document() {
        let store = memory_store();
        let hard = store.get_settings("hard").await.unwrap();
        assert_eq!(hard.time_limit_secs(), Some(60.5));
        assert_eq!(hard.moving_obstacles, Some(true));

        let medium = store.get_settings("medium").await.unwrap();
        assert_eq!(medium.visibility_radius(), Some(3.0));
    }

    #[tokio::test]
    async fn test_single_easy_grid_scenario() {
        let doc = json!({
            "grids": { "easy": [grid("e1", 8)] },
            "difficultySettings": {
                "easy": { "timeLimit": 60, "hintsAllowed": 3, "fogOfWar": false }
            }
        });
        let store = GridStore::new(MemorySource::new(doc.to_string()));

        let found = store.get_by_id("e1").await.unwrap();
        assert_eq!(found.grid.id, "e1");
        assert_eq!(
            serde_json::to_value(&found.settings).unwrap(),
            json!({ "timeLimit": 60, "hintsAllowed": 3, "fogOfWar": false })
        );
    }

    #[tokio::test]
    async fn test_malformed_and_invalid_documents_are_load_errors() {
        let store = GridStore::new(MemorySource::new("{ not json"));
        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Load(LoadError::Parse(_))));

        let mut doc = fixture();
        doc["difficultySettings"].as_object_mut().unwrap().remove("hard");
        let store = GridStore::new(MemorySource::new(doc.to_string()));
        // Even a lookup unrelated to the broken bucket fails.
        let err = store.get_by_id("e1").await.unwrap_err();
        assert!(matches!(err, StoreError::Load(LoadError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_badly_authored_grid_is_still_served() {
        let mut doc = fixture();
        doc["grids"]["easy"][0]["walls"] = json!([{ "x": 0, "y": 0 }, { "x": 9, "y": 9 }]);
        doc["grids"]["medium"][0]["size"] = json!({ "width": 0, "height": 0 });
        let store = GridStore::new(MemorySource::new(doc.to_string()));

        let easy = store.get_settings("easy").await.unwrap();
        assert_eq!(easy.hints_allowed, 3);
        assert_eq!(store.get_by_id("e1").await.unwrap().grid.walls.len(), 2);
        assert_eq!(store.get_by_difficulty("medium").await.unwrap().grids.len(), 1);
        assert_eq!(serde_json::to_value(store.get_all().await.unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_policy_is_reported() {
        assert_eq!(memory_store().policy(), ReloadPolicy::EveryRequest);
        assert_eq!(on_change_store(None).policy(), ReloadPolicy::OnChange);
    }

    #[tokio::test]
    async fn test_every_request_policy_reads_each_time() {
        let source = SwappableSource::new(&fixture(), stamp(1));
        let store = GridStore::new(source);

        store.get_all().await.unwrap();
        store.get_settings("easy").await.unwrap();
        assert_eq!(store.source().reads(), 2);
    }

    #[tokio::test]
    async fn test_on_change_policy_caches_until_stamp_moves() {
        let store = on_change_store(stamp(1));

        store.get_all().await.unwrap();
        store.get_by_id("h2").await.unwrap();
        assert_eq!(store.source().reads(), 1);

        let updated = json!({
            "grids": { "easy": [grid("e9", 4)] },
            "difficultySettings": {
                "easy": { "timeLimit": 30, "hintsAllowed": 1, "fogOfWar": false }
            }
        });
        store.source().swap(updated.to_string().into_bytes(), stamp(2));

        assert!(store.get_by_id("h2").await.unwrap_err().is_not_found());
        assert_eq!(store.get_by_id("e9").await.unwrap().grid.optimal_path_length, 4);
        assert_eq!(store.source().reads(), 2);
    }

    #[tokio::test]
    async fn test_on_change_policy_without_stamp_always_reloads() {
        let store = on_change_store(None);
        store.get_all().await.unwrap();
        store.get_all().await.unwrap();
        assert_eq!(store.source().reads(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_loads_once() {
        let store = on_change_store(stamp(1));

        let (a, b, c) = tokio::join!(
            store.get_all(),
            store.get_by_difficulty("easy"),
            store.get_settings("hard")
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(store.source().reads(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_cache() {
        let store = on_change_store(stamp(1));
        store.get_all().await.unwrap();

        store.source().swap(b"{ broken".to_vec(), stamp(2));
        assert!(matches!(store.get_all().await, Err(StoreError::Load(_))));

        // Reverting to the cached stamp serves the cached document without a read.
        let reads = store.source().reads();
        store.source().swap(b"{ broken".to_vec(), stamp(1));
        assert_eq!(store.get_by_difficulty("hard").await.unwrap().grids.len(), 3);
        assert_eq!(store.source().reads(), reads);
    }

    #[test]
    fn test_reload_policy_parsing() {
        assert_eq!("on-change".parse::<ReloadPolicy>(), Ok(ReloadPolicy::OnChange));
        assert_eq!(" Every-Request ".parse::<ReloadPolicy>(), Ok(ReloadPolicy::EveryRequest));
        assert!("sometimes".parse::<ReloadPolicy>().is_err());
        assert!("always".parse::<ReloadPolicy>().is_err());
        assert_eq!(ReloadPolicy::OnChange.to_string(), "on-change");
    }
}
