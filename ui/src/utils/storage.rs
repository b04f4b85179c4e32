//! Filter and sort preferences kept in eframe's app storage.

use slotboard_business::prefs::{ALL_KEYS, PreferenceStore};
use slotboard_business::MemoryPreferences;

/// [`PreferenceStore`] view of the eframe storage.
pub struct EframePreferences<'a> {
    storage: &'a mut dyn eframe::Storage,
}

impl<'a> EframePreferences<'a> {
    pub fn new(storage: &'a mut dyn eframe::Storage) -> Self {
        Self { storage }
    }
}

impl PreferenceStore for EframePreferences<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_string(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.storage.set_string(key, value);
    }
}

/// Reads every known preference out of the storage eframe restored at startup.
pub fn read_preferences(storage: &dyn eframe::Storage) -> MemoryPreferences {
    let mut prefs = MemoryPreferences::new();
    for key in ALL_KEYS {
        if let Some(value) = storage.get_string(key) {
            prefs.set(key, value);
        }
    }
    prefs
}

/// Copies `from` into `to`, key by key.
pub fn copy_preferences(from: &dyn PreferenceStore, to: &mut dyn PreferenceStore) {
    for key in ALL_KEYS {
        if let Some(value) = from.get(key) {
            to.set(key, value);
        }
    }
}
