//! Plain-text rendering for command output

use crate::catalog::{Catalog, SettingMetadata};
use crate::presets::PresetBook;
use crate::profsave::{Changes, ConfigMapping};

/// Placeholder for a known setting the file does not contain
const NOT_SET: &str = "-";

/// Lines joined with a trailing newline each
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Known settings with their values from `mapping`
///
/// Settings whose value differs from `original` are marked with `*`.
pub fn settings(entries: &[&SettingMetadata], mapping: &ConfigMapping, original: &ConfigMapping) -> String {
    if entries.is_empty() {
        return "No matching settings\n".to_string();
    }

    let mut lines = Vec::new();
    let mut last_group: Option<(String, String)> = None;

    for entry in entries {
        let group = (entry.category.to_string(), entry.subcategory.clone());
        if last_group.as_ref() != Some(&group) {
            lines.push(format!("[{} / {}]", group.0, group.1));
            last_group = Some(group);
        }

        let value = match mapping.get(&entry.key) {
            Some(raw) => format!("{} ({raw})", entry.kind.display(raw)),
            None => NOT_SET.to_string(),
        };
        let marker = match mapping.get(&entry.key) {
            Some(raw) if original.get(&entry.key) != Some(raw) => " *",
            _ => "",
        };
        lines.push(format!("  {:<32} {:<20}{marker}  {}", entry.name, value, entry.key));
    }
    join_lines(lines)
}

/// Keys the catalog has no entry for, with raw values
pub fn unknown(catalog: &Catalog, mapping: &ConfigMapping) -> String {
    let keys = catalog.unknown_keys(mapping);
    let mut lines = vec![format!("Unrecognized settings ({}):", keys.len())];
    lines.extend(keys.into_iter().map(|key| format!("  {key} {}", mapping[key])));
    join_lines(lines)
}

/// Change list with human-readable values where metadata exists
pub fn changes(catalog: &Catalog, changes: &Changes) -> String {
    if changes.is_empty() {
        return "No modifications\n".to_string();
    }

    let mut lines: Vec<String> = changes
        .iter()
        .map(|(key, record)| {
            let meta = catalog.get(key);
            let show = |raw: &str| match meta {
                Some(meta) if !(record.added && raw == record.old_value) => meta.kind.display(raw),
                _ => raw.to_string(),
            };
            match meta {
                Some(meta) => format!(
                    "  {}: {} -> {}  ({key})",
                    meta.name,
                    show(&record.old_value),
                    show(&record.new_value)
                ),
                None => format!("  {key}: {} -> {}", record.old_value, record.new_value),
            }
        })
        .collect();

    let count = changes.len();
    lines.push(format!("{count} parameter{} modified", if count == 1 { "" } else { "s" }));
    join_lines(lines)
}

pub fn presets(book: &PresetBook) -> String {
    let mut lines = Vec::new();
    for preset in book.iter() {
        let icon = if preset.icon.is_empty() { String::new() } else { format!("{} ", preset.icon) };
        lines.push(format!(
            "{:<12} {icon}{} ({} settings)",
            preset.id,
            preset.name,
            preset.settings.len()
        ));
        if !preset.description.is_empty() {
            lines.push(format!("             {}", preset.description));
        }
    }
    join_lines(lines)
}

/// One line per catalog entry: key, type, name
pub fn catalog_entries(entries: &[&SettingMetadata]) -> String {
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{:<48} {:<5} {} [{} / {}]",
                entry.key,
                entry.kind.type_name(),
                entry.name,
                entry.category,
                entry.subcategory
            )
        })
        .collect();
    lines.push(format!("{} setting(s)", entries.len()));
    join_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, SettingKind};
    use crate::profsave::{get_changes, parse};
    use std::collections::BTreeMap;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            SettingMetadata {
                key: "GstRender.VSyncMode".to_string(),
                name: "V-Sync".to_string(),
                category: Category::Performance,
                subcategory: "Frame Sync".to_string(),
                kind: SettingKind::Bool { default: false },
                tooltip: String::new(),
                search_aliases: vec![],
            },
            SettingMetadata {
                key: "GstRender.FullscreenMode".to_string(),
                name: "Fullscreen Mode".to_string(),
                category: Category::Graphics,
                subcategory: "Display".to_string(),
                kind: SettingKind::Int {
                    default: 1,
                    range: 0..=2,
                    options: Some(BTreeMap::from([
                        (0, "Windowed".to_string()),
                        (1, "Borderless".to_string()),
                        (2, "Fullscreen".to_string()),
                    ])),
                },
                tooltip: String::new(),
                search_aliases: vec![],
            },
            SettingMetadata {
                key: "GstAudio.Volume".to_string(),
                name: "Master Volume".to_string(),
                category: Category::Audio,
                subcategory: "Volume".to_string(),
                kind: SettingKind::Float { default: 1.0, range: 0.0..=1.0 },
                tooltip: String::new(),
                search_aliases: vec![],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_changes_formats_known_values() {
        let original = parse("GstRender.VSyncMode 0\nGstRender.FullscreenMode 1\n");
        let current = parse("GstRender.VSyncMode 1\nGstRender.FullscreenMode 2\nGstAudio.Volume 0.5\nGstKeyBinding.version 3\n");
        let text = changes(&catalog(), &get_changes(&original, &current));

        assert!(text.contains("  Master Volume: (new) -> 0.50  (GstAudio.Volume)\n"));
        assert!(text.contains("  Fullscreen Mode: Borderless -> Fullscreen  (GstRender.FullscreenMode)\n"));
        assert!(text.contains("  V-Sync: OFF -> ON  (GstRender.VSyncMode)\n"));
        assert!(text.contains("  GstKeyBinding.version: (new) -> 3\n"));
        assert!(text.ends_with("4 parameters modified\n"));
    }

    #[test]
    fn test_changes_empty() {
        assert_eq!(changes(&catalog(), &Changes::new()), "No modifications\n");
    }

    #[test]
    fn test_settings_marks_modified_and_missing() {
        let catalog = catalog();
        let original = parse("GstRender.VSyncMode 0\nGstRender.FullscreenMode 1\n");
        let current = parse("GstRender.VSyncMode 1\nGstRender.FullscreenMode 1\n");
        let entries: Vec<&SettingMetadata> = catalog.iter().collect();
        let text = settings(&entries, &current, &original);

        assert!(text.contains("[Performance / Frame Sync]"));
        let vsync = text.lines().find(|l| l.contains("GstRender.VSyncMode")).unwrap();
        assert!(vsync.contains("ON (1)"));
        assert!(vsync.contains(" *"));
        let fullscreen = text.lines().find(|l| l.contains("GstRender.FullscreenMode")).unwrap();
        assert!(fullscreen.contains("Borderless (1)"));
        assert!(!fullscreen.contains(" *"));
        let volume = text.lines().find(|l| l.contains("GstAudio.Volume")).unwrap();
        assert!(volume.contains(" - "));
    }

    #[test]
    fn test_settings_empty_selection() {
        assert_eq!(settings(&[], &ConfigMapping::new(), &ConfigMapping::new()), "No matching settings\n");
    }

    #[test]
    fn test_unknown_lists_raw_values() {
        let mapping = parse("GstRender.VSyncMode 0\nGstRender.HUD-Accent -493867777\n");
        assert_eq!(
            unknown(&catalog(), &mapping),
            "Unrecognized settings (1):\n  GstRender.HUD-Accent -493867777\n"
        );
    }

    #[test]
    fn test_catalog_entries_lists_and_counts() {
        let catalog = catalog();
        let text = catalog_entries(&catalog.search("volume"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("GstAudio.Volume"));
        assert!(lines[0].ends_with("Master Volume [Audio / Volume]"));
        assert_eq!(lines[1], "1 setting(s)");
    }

    #[test]
    fn test_presets_lists_builtin() {
        let text = presets(&PresetBook::builtin().unwrap());
        assert!(text.lines().next().unwrap().starts_with("esports"));
        assert!(text.contains("Balanced"));
    }
}
