//! Key/value storage for filter and sort preferences.

use std::collections::HashMap;

pub const FILTER: &str = "filterPreference";
pub const CATEGORY: &str = "categoryPreference";
pub const SORT_COLUMN: &str = "sortColumn";
pub const SORT_DIRECTION: &str = "sortDirection";
pub const LOANER_FILTER: &str = "loanerFilterPreference";
pub const LOANER_SORT_COLUMN: &str = "loanerSortColumn";
pub const LOANER_SORT_DIRECTION: &str = "loanerSortDirection";

pub const ALL_KEYS: [&str; 7] = [
    FILTER,
    CATEGORY,
    SORT_COLUMN,
    SORT_DIRECTION,
    LOANER_FILTER,
    LOANER_SORT_COLUMN,
    LOANER_SORT_DIRECTION,
];

/// Where table preferences are kept between runs.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Preferences kept in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}
