//! Command-line interface
//!
//! Argument definitions live here; the handlers are in [`commands`] and
//! all text formatting is in [`render`].

pub mod commands;
pub mod render;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backup::BackupStore;
use crate::catalog::{Catalog, Category};
use crate::config::AppConfig;
use crate::locate;
use crate::presets::PresetBook;

#[derive(Debug, Parser)]
#[command(name = "fieldtuner")]
#[command(about = "Inspect and edit Battlefield 6 PROFSAVE_profile settings files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Application config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a file looks like a settings profile
    Check {
        /// Settings file (auto-detected when omitted)
        file: Option<PathBuf>,
    },

    /// Show known settings and their current values
    ///
    /// With --preset or --set the edits are previewed and changed settings
    /// are marked with `*`; nothing is written.
    Show {
        /// Settings file (auto-detected when omitted)
        file: Option<PathBuf>,

        /// Only show one category
        #[arg(long, short)]
        category: Option<Category>,

        /// Only show settings matching this text
        #[arg(long, short)]
        search: Option<String>,

        /// List settings the catalog does not describe instead
        #[arg(long, conflicts_with_all = ["category", "search"])]
        unknown: bool,

        /// Preview a value; may be given more than once
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        sets: Vec<(String, String)>,

        /// Preview a preset before any --set values; may be given more than once
        #[arg(long = "preset", value_name = "ID")]
        presets: Vec<String>,
    },

    /// Search the settings catalog
    Search {
        /// Text to look for in names, keys, categories and aliases
        query: Option<String>,
    },

    /// List available presets
    Presets,

    /// Compare two settings files
    Diff {
        original: PathBuf,
        modified: PathBuf,
    },

    /// Apply presets and values, then export or write back
    Edit {
        /// Settings file (auto-detected when omitted)
        file: Option<PathBuf>,

        /// Set a value; may be given more than once
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        sets: Vec<(String, String)>,

        /// Apply a preset before any --set values; may be given more than once
        #[arg(long = "preset", value_name = "ID")]
        presets: Vec<String>,

        /// Export directory (defaults to the configured one)
        #[arg(long, value_name = "DIR", conflicts_with = "in_place")]
        out: Option<PathBuf>,

        /// Overwrite the input file, backing it up first
        #[arg(long)]
        in_place: bool,

        /// Print the changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List backups made by in-place writes
    Backups,

    /// Restore a backup over a settings file
    Restore {
        /// Backup to restore (the most recent one when omitted)
        #[arg(long)]
        backup: Option<PathBuf>,

        /// Settings file (auto-detected when omitted)
        file: Option<PathBuf>,
    },

    /// Print the detected settings file location
    Detect,
}

/// `KEY=VALUE`, split at the first `=`
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {arg:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in {arg:?}"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Everything a command needs, built once from the app config
pub struct App {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub presets: PresetBook,
    pub backups: BackupStore,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let catalog = Catalog::builtin()?;
        let presets = PresetBook::builtin()?.with_custom(config.presets.iter().cloned());
        debug!(settings = catalog.len(), presets = presets.len(), "application data loaded");
        Ok(Self {
            config,
            catalog,
            presets,
            backups: BackupStore::default_location(),
        })
    }

    /// Explicit argument, then the configured file, then auto-detection
    pub fn resolve_file(&self, arg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.config.game_config {
            debug!(path = %path.display(), "using configured game settings file");
            return Ok(path.clone());
        }
        match locate::detect() {
            Some(path) => Ok(path),
            None => bail!(
                "No settings file given and none found in the usual locations; pass a path or set game_config in {}",
                AppConfig::path().display()
            ),
        }
    }

    pub fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Check { file } => commands::check(self, file.as_deref()),
            Command::Show { file, category, search, unknown, sets, presets } => commands::show(
                self,
                commands::ShowArgs {
                    file,
                    category,
                    search,
                    unknown,
                    sets,
                    presets,
                },
            ),
            Command::Search { query } => commands::search(self, query.as_deref().unwrap_or("")),
            Command::Presets => commands::presets(self),
            Command::Diff { original, modified } => commands::diff(self, &original, &modified),
            Command::Edit { file, sets, presets, out, in_place, dry_run } => commands::edit(
                self,
                commands::EditArgs {
                    file,
                    sets,
                    presets,
                    out,
                    in_place,
                    dry_run,
                },
            ),
            Command::Backups => commands::backups(self),
            Command::Restore { backup, file } => {
                commands::restore(self, backup.as_deref(), file.as_deref())
            }
            Command::Detect => commands::detect(),
        }
    }
}
