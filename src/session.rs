use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::presets::PresetBook;
use crate::profsave::{self, ChangeRecord, Changes, ConfigMapping};

/// Rejection of a file before anything is parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{file_name} does not look like a PROFSAVE_profile file (no GstRender./GstAudio./GstInput. settings found)")]
    UnrecognizedFormat { file_name: String },
}

/// Edit that would break the line format or the mapping invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("setting key is empty")]
    EmptyKey,

    #[error("setting key {0:?} contains whitespace")]
    KeyWhitespace(String),

    #[error("value for {0} is empty")]
    EmptyValue(String),

    #[error("value for {0} contains a line break")]
    MultilineValue(String),
}

/// Check that `key value` survives a serialize/parse round trip unchanged.
/// `value` is expected to be trimmed already.
pub fn check_entry(key: &str, value: &str) -> Result<(), EditError> {
    if key.is_empty() {
        return Err(EditError::EmptyKey);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(EditError::KeyWhitespace(key.to_string()));
    }
    if value.is_empty() {
        return Err(EditError::EmptyValue(key.to_string()));
    }
    if value.contains(['\n', '\r']) {
        return Err(EditError::MultilineValue(key.to_string()));
    }
    Ok(())
}

/// Editing state for one loaded file
///
/// `original` is the snapshot taken at load and never changes; `current` is
/// the working copy. Keys present in `original` are never removed from
/// `current`, so the diff only has to report additions and modifications.
#[derive(Debug, Clone)]
pub struct EditSession {
    file_name: String,
    source: Option<PathBuf>,
    original: ConfigMapping,
    current: ConfigMapping,
}

impl EditSession {
    /// Validate and parse file content. Nothing is loaded if the sniff fails.
    pub fn load(content: &str, file_name: impl Into<String>) -> Result<Self, LoadError> {
        let file_name = file_name.into();
        if !profsave::is_valid_config(content) {
            return Err(LoadError::UnrecognizedFormat { file_name });
        }

        let original = profsave::parse(content);
        info!(file = %file_name, settings = original.len(), "loaded config");
        Ok(Self {
            file_name,
            source: None,
            current: original.clone(),
            original,
        })
    }

    /// Read a file from disk and load it
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        // The game writes ASCII; anything else is replaced rather than rejected
        let content = String::from_utf8_lossy(&bytes);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut session = Self::load(&content, file_name)?;
        session.source = Some(path.to_path_buf());
        Ok(session)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path the session was opened from, if it came from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn original(&self) -> &ConfigMapping {
        &self.original
    }

    pub fn current(&self) -> &ConfigMapping {
        &self.current
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.current.get(key).map(String::as_str)
    }

    pub fn original_value(&self, key: &str) -> Option<&str> {
        self.original.get(key).map(String::as_str)
    }

    /// Set one value in the working copy
    ///
    /// The value is trimmed. Keys with whitespace, empty values and values
    /// spanning lines are refused because they would not survive a
    /// serialize/parse round trip.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), EditError> {
        let value = value.trim();
        check_entry(key, value)?;

        debug!(key = %key, value = %value, "set value");
        self.current.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Overlay a preset; returns false if the id is unknown
    pub fn apply_preset(&mut self, presets: &PresetBook, id: &str) -> bool {
        if presets.get(id).is_none() {
            return false;
        }
        self.current = presets.apply(&self.current, id);
        info!(preset = %id, "applied preset");
        true
    }

    /// Discard every edit
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        info!("reset all settings to original");
    }

    /// Return one key to its loaded state
    ///
    /// A key that was not in the original file is dropped from the working
    /// copy again, which is the only way a key ever leaves `current`.
    pub fn reset_key(&mut self, key: &str) {
        match self.original.get(key) {
            Some(value) => {
                self.current.insert(key.to_string(), value.clone());
            }
            None => {
                self.current.remove(key);
            }
        }
    }

    pub fn changes(&self) -> Changes {
        profsave::get_changes(&self.original, &self.current)
    }

    pub fn change(&self, key: &str) -> Option<ChangeRecord> {
        self.changes().remove(key)
    }

    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }

    /// Serialized working copy
    pub fn export_text(&self) -> String {
        profsave::serialize(&self.current)
    }
}
