//! Command handlers

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{render, App};
use crate::catalog::{Catalog, Category, SettingMetadata};
use crate::export;
use crate::locate;
use crate::presets::PresetBook;
use crate::profsave;
use crate::session::EditSession;

pub fn check(app: &App, file: Option<&Path>) -> Result<()> {
    let path = app.resolve_file(file)?;
    let content = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content = String::from_utf8_lossy(&content);

    if !profsave::is_valid_config(&content) {
        bail!("{} is not a recognized settings file", path.display());
    }
    let mapping = profsave::parse(&content);
    let unknown = app.catalog.unknown_keys(&mapping).len();
    println!(
        "{}: {} settings ({} known, {} unrecognized)",
        path.display(),
        mapping.len(),
        mapping.len() - unknown,
        unknown
    );
    Ok(())
}

#[derive(Debug, Default)]
pub struct ShowArgs {
    pub file: Option<PathBuf>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub unknown: bool,
    pub sets: Vec<(String, String)>,
    pub presets: Vec<String>,
}

pub fn show(app: &App, args: ShowArgs) -> Result<()> {
    print!("{}", show_text(app, &args)?);
    Ok(())
}

/// Output of `show`, with any previewed edits applied to the working copy
pub fn show_text(app: &App, args: &ShowArgs) -> Result<String> {
    let path = app.resolve_file(args.file.as_deref())?;
    let mut session = EditSession::open(&path)?;
    apply_edits(&mut session, &app.catalog, &app.presets, &args.presets, &args.sets)?;

    if args.unknown {
        return Ok(render::unknown(&app.catalog, session.current()));
    }

    let entries = select(&app.catalog, args.category, args.search.as_deref());
    Ok(render::settings(&entries, session.current(), session.original()))
}

/// Catalog entries narrowed by category and search text, in catalog order
pub fn select<'a>(
    catalog: &'a Catalog,
    category: Option<Category>,
    search: Option<&str>,
) -> Vec<&'a SettingMetadata> {
    catalog
        .search(search.unwrap_or(""))
        .into_iter()
        .filter(|entry| category.is_none_or(|c| entry.category == c))
        .collect()
}

pub fn search(app: &App, query: &str) -> Result<()> {
    print!("{}", render::catalog_entries(&app.catalog.search(query)));
    Ok(())
}

pub fn presets(app: &App) -> Result<()> {
    print!("{}", render::presets(&app.presets));
    Ok(())
}

pub fn diff(app: &App, original: &Path, modified: &Path) -> Result<()> {
    let original = EditSession::open(original)?;
    let modified = EditSession::open(modified)?;
    let changes = profsave::get_changes(original.original(), modified.original());
    print!("{}", render::changes(&app.catalog, &changes));
    Ok(())
}

#[derive(Debug, Default)]
pub struct EditArgs {
    pub file: Option<PathBuf>,
    pub sets: Vec<(String, String)>,
    pub presets: Vec<String>,
    pub out: Option<PathBuf>,
    pub in_place: bool,
    pub dry_run: bool,
}

/// Apply presets in order, then individual values
///
/// Unknown presets and values outside the catalog's range are reported and
/// skipped or kept respectively; input that cannot be encoded for a known
/// setting is an error.
pub fn apply_edits(
    session: &mut EditSession,
    catalog: &Catalog,
    presets: &PresetBook,
    preset_ids: &[String],
    sets: &[(String, String)],
) -> Result<()> {
    for id in preset_ids {
        if !session.apply_preset(presets, id) {
            warn!(preset = %id, "unknown preset, skipping");
        }
    }

    for (key, input) in sets {
        let value = match catalog.get(key) {
            Some(meta) => {
                let value = meta
                    .kind
                    .encode_input(input)
                    .with_context(|| format!("Invalid value for {} ({key})", meta.name))?;
                if let Err(e) = meta.kind.check(&value) {
                    warn!(key = %key, "{e}");
                }
                value
            }
            None => {
                warn!(key = %key, "setting not in catalog, storing value as given");
                input.clone()
            }
        };
        session.set(key, &value)?;
    }
    Ok(())
}

pub fn edit(app: &App, args: EditArgs) -> Result<()> {
    let path = app.resolve_file(args.file.as_deref())?;
    let mut session = EditSession::open(&path)?;

    apply_edits(&mut session, &app.catalog, &app.presets, &args.presets, &args.sets)?;

    let changes = session.changes();
    print!("{}", render::changes(&app.catalog, &changes));

    if args.dry_run {
        info!("dry run, nothing written");
        return Ok(());
    }
    if changes.is_empty() {
        println!("Nothing written");
        return Ok(());
    }

    let text = session.export_text();
    if args.in_place {
        let backups = app.config.backup_on_write.then_some(&app.backups);
        let backup = export::write_in_place(&path, &text, backups)?;
        println!("Wrote {}", path.display());
        if let Some(backup) = backup {
            println!("Backup: {}", backup.display());
        }
    } else {
        let dir = args.out.unwrap_or_else(|| app.config.export_dir_or_cwd());
        let written = export::write_export_named(&dir, &export::export_file_name_now(), &text)?;
        println!("Exported {}", written.display());
    }
    Ok(())
}

pub fn backups(app: &App) -> Result<()> {
    let list = app.backups.list()?;
    if list.is_empty() {
        println!("No backups in {}", app.backups.dir().display());
    }
    for backup in list {
        println!("{}", backup.display());
    }
    Ok(())
}

pub fn restore(app: &App, backup: Option<&Path>, file: Option<&Path>) -> Result<()> {
    let target = app.resolve_file(file)?;
    let used = match backup {
        Some(backup) => {
            app.backups.restore(backup, &target)?;
            backup.to_path_buf()
        }
        None => app.backups.restore_latest(&target)?,
    };
    println!("Restored {} from {}", target.display(), used.display());
    Ok(())
}

pub fn detect() -> Result<()> {
    match locate::detect() {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("No settings file found. Looked in:");
            for candidate in locate::candidate_paths() {
                println!("  {}", candidate.display());
            }
        }
    }
    Ok(())
}
