//! Persistent progression
//!
//! Everything that survives a page reload: best score, the star wallet,
//! unlock sets, and the selected cosmetics. Stored as one JSON blob in
//! LocalStorage on the web build; native builds keep it in memory only.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::shop::{DEFAULT_BACKDROPS, DEFAULT_CHARACTERS};

/// Cross-session player progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Highest floored score across all runs
    pub best: u32,
    /// Star wallet balance
    pub wallet_stars: u32,
    pub unlocked_characters: BTreeSet<String>,
    pub selected_character: String,
    pub colour: String,
    pub backdrop: String,
    pub unlocked_backdrops: BTreeSet<String>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            best: 0,
            wallet_stars: 0,
            unlocked_characters: DEFAULT_CHARACTERS.iter().map(|s| s.to_string()).collect(),
            selected_character: "orb".to_string(),
            colour: "blue".to_string(),
            backdrop: "default".to_string(),
            unlocked_backdrops: DEFAULT_BACKDROPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "star_dodge_progress";

    /// The free unlocks must always be present, whatever an old or edited
    /// save says.
    pub fn ensure_defaults(&mut self) {
        for id in DEFAULT_CHARACTERS {
            self.unlocked_characters.insert(id.to_string());
        }
        for id in DEFAULT_BACKDROPS {
            self.unlocked_backdrops.insert(id.to_string());
        }
    }

    pub fn is_character_unlocked(&self, id: &str) -> bool {
        self.unlocked_characters.contains(id)
    }

    pub fn unlock_character(&mut self, id: &str) {
        self.unlocked_characters.insert(id.to_string());
    }

    pub fn is_backdrop_unlocked(&self, id: &str) -> bool {
        self.unlocked_backdrops.contains(id)
    }

    pub fn unlock_backdrop(&mut self, id: &str) {
        self.unlocked_backdrops.insert(id.to_string());
    }

    /// Load progression from LocalStorage (WASM only). Missing or corrupt
    /// saves fall back to the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut progress) = serde_json::from_str::<Progress>(&json) {
                    progress.ensure_defaults();
                    log::info!(
                        "Loaded progression (best {}, {} stars)",
                        progress.best,
                        progress.wallet_stars
                    );
                    return progress;
                }
                log::warn!("Stored progression was unreadable, starting fresh");
            }
        }

        Self::default()
    }

    /// Save progression to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_free_unlocks() {
        let progress = Progress::default();
        assert!(progress.is_character_unlocked("orb"));
        assert!(progress.is_character_unlocked("hex"));
        assert!(!progress.is_character_unlocked("rocket"));
        assert!(progress.is_backdrop_unlocked("default"));
    }

    #[test]
    fn test_ensure_defaults_repairs_stripped_save() {
        let mut progress = Progress::default();
        progress.unlocked_characters.clear();
        progress.unlocked_backdrops.clear();

        progress.ensure_defaults();
        assert!(progress.is_character_unlocked("triangle"));
        assert!(progress.is_backdrop_unlocked("default"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut progress = Progress::default();
        progress.best = 1234;
        progress.wallet_stars = 88;
        progress.unlock_character("ghost");
        progress.selected_character = "ghost".to_string();
        progress.backdrop = "nebula".to_string();

        let json = serde_json::to_string(&progress).unwrap();
        let back: Progress = serde_json::from_str(&json).unwrap();

        assert_eq!(back.best, 1234);
        assert_eq!(back.wallet_stars, 88);
        assert!(back.is_character_unlocked("ghost"));
        assert_eq!(back.selected_character, "ghost");
        assert_eq!(back.backdrop, "nebula");
    }
}
