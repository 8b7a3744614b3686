//! Change set between the loaded mapping and the working copy

use serde::Serialize;
use std::collections::BTreeMap;

use super::ConfigMapping;
use crate::constants::format::NEW_VALUE_SENTINEL;

/// One changed setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Original value, or `"(new)"` when the key was not in the original
    pub old_value: String,
    pub new_value: String,
    /// Key was absent from the original (distinguishes a literal "(new)" value)
    pub added: bool,
}

impl ChangeRecord {
    pub fn modified(old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            old_value: old_value.into(),
            new_value: new_value.into(),
            added: false,
        }
    }

    pub fn added(new_value: impl Into<String>) -> Self {
        Self {
            old_value: NEW_VALUE_SENTINEL.to_string(),
            new_value: new_value.into(),
            added: true,
        }
    }
}

/// Changed keys, ordered by key
pub type Changes = BTreeMap<String, ChangeRecord>;

/// Compare `original` against `current`
///
/// Only keys present in `current` are considered; keys that exist only in
/// `original` are not reported. Values compare as exact strings, so
/// `"1.0"` and `"1.000000"` differ.
pub fn get_changes(original: &ConfigMapping, current: &ConfigMapping) -> Changes {
    current
        .iter()
        .filter_map(|(key, new_value)| {
            let record = match original.get(key) {
                Some(old_value) if old_value == new_value => return None,
                Some(old_value) => ChangeRecord::modified(old_value.as_str(), new_value.as_str()),
                None => ChangeRecord::added(new_value.as_str()),
            };
            Some((key.clone(), record))
        })
        .collect()
}
