//! Timestamped copies of the game's settings file

use anyhow::{bail, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::config::{APP_DIR, BACKUP_DIR};
use crate::constants::export::{BACKUP_EXTENSION, BACKUP_PREFIX, BACKUP_TIMESTAMP_FORMAT};

/// Directory of backups
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/fieldtuner/backups`, or `./fieldtuner/backups` without a data dir
    pub fn default_location() -> Self {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(BACKUP_DIR);
        Self::new(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into the store and return the backup path
    pub fn create(&self, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create backup directory {}", self.dir.display()))?;

        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut path = self.dir.join(format!("{BACKUP_PREFIX}{stamp}.{BACKUP_EXTENSION}"));
        let mut attempt = 1;
        while path.exists() {
            path = self
                .dir
                .join(format!("{BACKUP_PREFIX}{stamp}_{attempt}.{BACKUP_EXTENSION}"));
            attempt += 1;
        }

        fs::copy(source, &path).with_context(|| {
            format!("Failed to back up {} to {}", source.display(), path.display())
        })?;
        info!(source = %source.display(), backup = %path.display(), "created backup");
        Ok(path)
    }

    /// Backups oldest first
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read backup directory {}", self.dir.display()))?
        {
            let path = entry?.path();
            let is_backup = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(BACKUP_PREFIX))
                && path.extension().and_then(|e| e.to_str()) == Some(BACKUP_EXTENSION);
            if is_backup {
                backups.push(path);
            }
        }
        // Timestamps sort lexically; the collision suffix sorts after its base name
        backups.sort_by_key(|p| backup_sort_key(p));
        Ok(backups)
    }

    pub fn latest(&self) -> Result<Option<PathBuf>> {
        Ok(self.list()?.pop())
    }

    /// Copy `backup` over `target`
    pub fn restore(&self, backup: &Path, target: &Path) -> Result<()> {
        if !backup.is_file() {
            bail!("Backup {} does not exist", backup.display());
        }
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                warn!(dir = %parent.display(), "restore target directory missing, creating it");
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::copy(backup, target).with_context(|| {
            format!("Failed to restore {} to {}", backup.display(), target.display())
        })?;
        info!(backup = %backup.display(), target = %target.display(), "restored backup");
        Ok(())
    }

    /// Restore the newest backup onto `target`, returning which one was used
    pub fn restore_latest(&self, target: &Path) -> Result<PathBuf> {
        let Some(latest) = self.latest()? else {
            bail!("No backups found in {}", self.dir.display());
        };
        self.restore(&latest, target)?;
        Ok(latest)
    }
}

/// (timestamp, collision counter) parsed from a backup file name
fn backup_sort_key(path: &Path) -> (String, u32) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_prefix(BACKUP_PREFIX))
        .unwrap_or_default();
    // YYYYMMDD_HHMMSS is 15 chars; anything after is "_<n>"
    let (stamp, suffix) = stem.split_at(stem.len().min(15));
    let counter = suffix.trim_start_matches('_').parse().unwrap_or(0);
    (stamp.to_string(), counter)
}
