//! Writing edited configs back to disk
//!
//! Exports get a timestamped `PROFSAVE_profile_<YYYYMMDD>_<HHMM>` name so
//! they never clobber the game's own file; in-place writes back up the
//! target first.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backup::BackupStore;
use crate::constants::export::{FILE_PREFIX, TIMESTAMP_FORMAT};
use crate::profsave::{self, ConfigMapping};

/// `YYYYMMDD_HHMM`, zero-padded
pub fn timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `PROFSAVE_profile_<YYYYMMDD>_<HHMM>`
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("{FILE_PREFIX}{}", timestamp(now))
}

/// Export file name for the local wall-clock time
pub fn export_file_name_now() -> String {
    export_file_name(Local::now().naive_local())
}

/// Serialize `mapping` into `dir` under a fresh export name
pub fn write_export(dir: &Path, mapping: &ConfigMapping) -> Result<PathBuf> {
    write_export_named(dir, &export_file_name_now(), &profsave::serialize(mapping))
}

/// Write already-serialized `text` to `dir/name`, creating `dir` if needed
///
/// An existing file is never replaced: `name_1`, `name_2`, ... are tried
/// until a free name is found.
pub fn write_export_named(dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let mut path = dir.join(name);
    let mut attempt = 1;
    let mut file = loop {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => break file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                path = dir.join(format!("{name}_{attempt}"));
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()));
            }
        }
    };
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "exported config");
    Ok(path)
}

/// Overwrite `target` with `text`, backing up the old content first when a
/// store is given
///
/// Returns the backup path when one was made.
pub fn write_in_place(
    target: &Path,
    text: &str,
    backups: Option<&BackupStore>,
) -> Result<Option<PathBuf>> {
    let backup = match backups {
        Some(store) if target.exists() => Some(store.create(target)?),
        _ => None,
    };

    fs::write(target, text).with_context(|| format!("Failed to write {}", target.display()))?;
    info!(path = %target.display(), backup = ?backup, "wrote config in place");
    Ok(backup)
}
