//! Settings metadata catalog
//!
//! Immutable lookup table from setting key to display/validation metadata.
//! The built-in table is embedded JSON; tests build small fixture catalogs
//! with [`Catalog::from_entries`].

pub mod setting;

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::profsave::ConfigMapping;
pub use setting::{Category, SettingKind, SettingMetadata};

const BUILTIN_SETTINGS: &str = include_str!("../../data/settings.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to decode settings catalog: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid catalog entry {key}: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("duplicate catalog key {0}")]
    DuplicateKey(String),

    #[error("unknown category {0:?} (expected one of Graphics, Performance, Audio, Gameplay, Input)")]
    UnknownCategory(String),
}

/// Known settings in catalog order
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SettingMetadata>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Catalog shipped with the application
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SETTINGS)
    }

    /// Decode a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<SettingMetadata> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Build from entries, keeping their order
    pub fn from_entries(entries: Vec<SettingMetadata>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateKey(entry.key.clone()));
            }
        }
        debug!(entries = entries.len(), "settings catalog ready");
        Ok(Self { entries, index })
    }

    pub fn get(&self, key: &str) -> Option<&SettingMetadata> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingMetadata> {
        self.entries.iter()
    }

    /// Entries of one category, in catalog order
    pub fn by_category(&self, category: Category) -> Vec<&SettingMetadata> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }

    /// Categories that have at least one entry, sorted by name
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| self.entries.iter().any(|e| e.category == *c))
            .collect();
        categories.sort_by_key(|c| c.as_str());
        categories
    }

    /// Case-insensitive substring search over name, category, subcategory,
    /// key and aliases. A blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&SettingMetadata> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }

    /// Mapping keys the catalog knows nothing about, sorted
    pub fn unknown_keys<'a>(&self, mapping: &'a ConfigMapping) -> Vec<&'a str> {
        mapping
            .keys()
            .filter(|key| !self.contains(key))
            .map(String::as_str)
            .collect()
    }
}
