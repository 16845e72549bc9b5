//! Visitor progress record
//!
//! One JSON object under a fixed key, always read and written whole.

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_json, save_json};
use crate::consts::LADDER_STEPS;
use crate::error::StorageError;

/// Storage key for the progress record
pub const PROGRESS_KEY: &str = "birthday_room_progress";

/// What the visitor has done so far
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// Ladder step reached (0 = not started)
    pub current_step: u32,
    /// Unix timestamp (ms) when the ladder was finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<f64>,
    pub cake_cut: bool,
    pub candles_blown: bool,
    /// Ids of opened gifts, in opening order
    pub gifts_opened: Vec<String>,
}

/// Partial update merged over the stored record
#[derive(Debug, Clone, Default)]
pub struct ProgressPatch {
    pub current_step: Option<u32>,
    pub completed_at: Option<f64>,
    pub cake_cut: Option<bool>,
    pub candles_blown: Option<bool>,
    pub gifts_opened: Option<Vec<String>>,
}

impl Progress {
    /// Stored progress, or defaults when missing or corrupt
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json(store, PROGRESS_KEY) {
            Some(progress) => {
                log::info!("Loaded progress");
                progress
            }
            None => Self::default(),
        }
    }

    /// Merge `patch` over the stored record and write it back
    pub fn save(store: &mut impl KeyValueStore, patch: ProgressPatch) -> Result<Self, StorageError> {
        let mut progress = Self::load(store);
        progress.apply(patch);
        if let Err(e) = save_json(store, PROGRESS_KEY, &progress) {
            log::error!("Failed to save progress: {}", e);
            return Err(e);
        }
        Ok(progress)
    }

    /// Forget all progress
    pub fn reset(store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.remove(PROGRESS_KEY).inspect_err(|e| {
            log::error!("Failed to reset progress: {}", e);
        })?;
        log::info!("Progress reset");
        Ok(())
    }

    pub fn mark_step_complete(store: &mut impl KeyValueStore, step: u32) -> Result<Self, StorageError> {
        Self::save(
            store,
            ProgressPatch {
                current_step: Some(step),
                ..Default::default()
            },
        )
    }

    /// Record the finished ladder at `now_ms`
    pub fn mark_game_complete(store: &mut impl KeyValueStore, now_ms: f64) -> Result<Self, StorageError> {
        Self::save(
            store,
            ProgressPatch {
                current_step: Some(LADDER_STEPS),
                completed_at: Some(now_ms),
                ..Default::default()
            },
        )
    }

    /// Remember an opened gift; returns true the first time `id` is opened
    pub fn open_gift(store: &mut impl KeyValueStore, id: &str) -> Result<bool, StorageError> {
        let progress = Self::load(store);
        if progress.has_opened(id) {
            return Ok(false);
        }
        let mut gifts = progress.gifts_opened;
        gifts.push(id.to_string());
        Self::save(
            store,
            ProgressPatch {
                gifts_opened: Some(gifts),
                ..Default::default()
            },
        )?;
        Ok(true)
    }

    pub fn apply(&mut self, patch: ProgressPatch) {
        if let Some(step) = patch.current_step {
            self.current_step = step;
        }
        if let Some(at) = patch.completed_at {
            self.completed_at = Some(at);
        }
        if let Some(cut) = patch.cake_cut {
            self.cake_cut = cut;
        }
        if let Some(blown) = patch.candles_blown {
            self.candles_blown = blown;
        }
        if let Some(gifts) = patch.gifts_opened {
            self.gifts_opened = gifts;
        }
    }

    pub fn has_opened(&self, id: &str) -> bool {
        self.gifts_opened.iter().any(|g| g == id)
    }

    pub fn is_complete(&self) -> bool {
        self.current_step >= LADDER_STEPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_loads_defaults() {
        let store = MemoryStore::new();
        let progress = Progress::load(&store);
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.current_step, 0);
        assert!(progress.gifts_opened.is_empty());
    }

    #[test]
    fn test_corrupt_loads_defaults() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "[1, 2").unwrap();
        assert_eq!(Progress::load(&store), Progress::default());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, r#"{"currentStep": 7}"#).unwrap();
        let progress = Progress::load(&store);
        assert_eq!(progress.current_step, 7);
        assert!(!progress.cake_cut);
    }

    #[test]
    fn test_save_merges_over_stored() {
        let mut store = MemoryStore::new();
        Progress::mark_step_complete(&mut store, 4).unwrap();
        Progress::save(
            &mut store,
            ProgressPatch {
                cake_cut: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let progress = Progress::load(&store);
        assert_eq!(progress.current_step, 4);
        assert!(progress.cake_cut);
        assert!(!progress.candles_blown);
    }

    #[test]
    fn test_camel_case_on_disk() {
        let mut store = MemoryStore::new();
        Progress::save(
            &mut store,
            ProgressPatch {
                candles_blown: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        let json = store.get(PROGRESS_KEY).unwrap().unwrap();
        assert!(json.contains("\"candlesBlown\":true"));
        assert!(json.contains("\"giftsOpened\":[]"));
        assert!(!json.contains("completedAt"));
    }

    #[test]
    fn test_game_complete() {
        let mut store = MemoryStore::new();
        let progress = Progress::mark_game_complete(&mut store, 1_700_000_000_000.0).unwrap();
        assert!(progress.is_complete());
        assert_eq!(progress.completed_at, Some(1_700_000_000_000.0));
        assert_eq!(Progress::load(&store), progress);
    }

    #[test]
    fn test_open_gift_once() {
        let mut store = MemoryStore::new();
        assert!(Progress::open_gift(&mut store, "letter").unwrap());
        assert!(!Progress::open_gift(&mut store, "letter").unwrap());
        assert!(Progress::open_gift(&mut store, "playlist").unwrap());
        assert_eq!(Progress::load(&store).gifts_opened, vec!["letter", "playlist"]);
    }

    #[test]
    fn test_reset() {
        let mut store = MemoryStore::new();
        Progress::mark_step_complete(&mut store, 12).unwrap();
        Progress::reset(&mut store).unwrap();
        assert!(store.is_empty());
        assert_eq!(Progress::load(&store).current_step, 0);
    }

    #[test]
    fn test_unavailable_store() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(Progress::load(&store), Progress::default());
        assert!(matches!(
            Progress::mark_step_complete(&mut store, 1),
            Err(StorageError::Unavailable)
        ));
    }
}
