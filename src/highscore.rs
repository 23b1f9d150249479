//! Durable high-score storage
//!
//! One integer under a fixed key. Storage failures are tolerated: reads fall
//! back to 0 and writes are discarded with a warning; the simulation never
//! sees an error.

/// Storage key for the persisted high score
pub const STORAGE_KEY: &str = "highScore";

/// A durable store for the single high-score integer
pub trait ScoreStore {
    /// Stored high score, 0 when absent or unavailable
    fn read(&self) -> u32;
    /// Persist a new high score
    fn write(&mut self, score: u32);
}

/// In-memory store for tests and the native headless runner
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl ScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn write(&mut self, score: u32) {
        self.value = Some(score);
    }
}

/// LocalStorage-backed store (wasm32 only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn read(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score defaults to 0");
            return 0;
        };
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                log::warn!("unparseable stored high score {raw:?}, defaulting to 0");
                0
            }),
            _ => 0,
        }
    }

    fn write(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score {score} not saved");
            return;
        };
        if storage.set_item(STORAGE_KEY, &score.to_string()).is_err() {
            log::warn!("failed to persist high score {score}");
        } else {
            log::info!("high score saved ({score})");
        }
    }
}
