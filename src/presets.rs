//! Named bulk-settings presets
//!
//! A preset is a partial mapping overlaid on the working copy: it adds or
//! overwrites keys, never removes them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::profsave::ConfigMapping;
use crate::session::{check_entry, EditError};

const BUILTIN_PRESETS: &str = include_str!("../data/presets.json");

/// Preset card metadata plus the settings it applies
///
/// Deserialized presets have trimmed values and are checked with the same
/// rules as a single edit, so overlaying one cannot break the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPreset")]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    pub settings: ConfigMapping,
}

#[derive(Deserialize)]
struct RawPreset {
    id: String,
    name: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    description: String,
    settings: ConfigMapping,
}

impl TryFrom<RawPreset> for Preset {
    type Error = EditError;

    fn try_from(raw: RawPreset) -> Result<Self, Self::Error> {
        let preset = Preset {
            id: raw.id,
            name: raw.name,
            icon: raw.icon,
            color: raw.color,
            description: raw.description,
            settings: raw
                .settings
                .into_iter()
                .map(|(key, value)| (key, value.trim().to_string()))
                .collect(),
        };
        preset.validate()?;
        Ok(preset)
    }
}

impl Preset {
    /// Every setting must be a key/value pair `EditSession::set` would accept
    pub fn validate(&self) -> Result<(), EditError> {
        self.settings
            .iter()
            .try_for_each(|(key, value)| check_entry(key, value))
    }
}

/// Ordered collection of presets
#[derive(Debug, Clone, Default)]
pub struct PresetBook {
    presets: Vec<Preset>,
}

impl PresetBook {
    /// Presets shipped with the application, in display order
    pub fn builtin() -> Result<Self> {
        let presets: Vec<Preset> =
            serde_json::from_str(BUILTIN_PRESETS).context("Failed to decode built-in presets")?;
        Ok(Self { presets })
    }

    pub fn from_presets(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Overlay user presets: an existing id is replaced in place, new ids are appended.
    /// Presets with settings that fail [`Preset::validate`] are skipped.
    pub fn with_custom(mut self, custom: impl IntoIterator<Item = Preset>) -> Self {
        for preset in custom {
            if let Err(e) = preset.validate() {
                warn!(id = %preset.id, "skipping custom preset: {e}");
                continue;
            }
            match self.presets.iter_mut().find(|p| p.id == preset.id) {
                Some(existing) => {
                    info!(id = %preset.id, "custom preset overrides built-in");
                    *existing = preset;
                }
                None => self.presets.push(preset),
            }
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// `current` with the preset's settings overlaid (preset wins on collision).
    /// An unknown id returns `current` unchanged.
    pub fn apply(&self, current: &ConfigMapping, id: &str) -> ConfigMapping {
        let Some(preset) = self.get(id) else {
            debug!(id = %id, "unknown preset, leaving config unchanged");
            return current.clone();
        };

        let mut merged = current.clone();
        merged.extend(
            preset
                .settings
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        debug!(id = %id, keys = preset.settings.len(), "applied preset");
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> ConfigMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn preset(id: &str, settings: &[(&str, &str)]) -> Preset {
        Preset {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: String::new(),
            color: String::new(),
            description: String::new(),
            settings: mapping(settings),
        }
    }

    #[test]
    fn test_builtin_presets() {
        let book = PresetBook::builtin().unwrap();
        let ids: Vec<&str> = book.ids().collect();
        assert_eq!(ids, ["esports", "competitive", "balanced", "quality", "ultra"]);

        let esports = book.get("esports").unwrap();
        assert_eq!(esports.name, "Esports Pro");
        assert_eq!(esports.settings["GstRender.VSyncMode"], "0");
        assert_eq!(esports.settings["GstInput.MouseRawInput"], "1");
    }

    #[test]
    fn test_apply_preserves_untouched_keys() {
        let book = PresetBook::from_presets(vec![preset("p", &[("B", "2")])]);
        let result = book.apply(&mapping(&[("A", "1")]), "p");
        assert_eq!(result, mapping(&[("A", "1"), ("B", "2")]));
    }

    #[test]
    fn test_apply_preset_wins_on_collision() {
        let book = PresetBook::from_presets(vec![preset("p", &[("A", "9"), ("B", "2")])]);
        let result = book.apply(&mapping(&[("A", "1"), ("C", "3")]), "p");
        assert_eq!(result, mapping(&[("A", "9"), ("B", "2"), ("C", "3")]));
    }

    #[test]
    fn test_apply_unknown_preset_is_noop() {
        let book = PresetBook::from_presets(vec![preset("p", &[("B", "2")])]);
        let current = mapping(&[("A", "1")]);
        assert_eq!(book.apply(&current, "nonexistent"), current);
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let book = PresetBook::builtin().unwrap();
        let current = mapping(&[("GstRender.VSyncMode", "1")]);
        let result = book.apply(&current, "esports");
        assert_eq!(current["GstRender.VSyncMode"], "1");
        assert_eq!(result["GstRender.VSyncMode"], "0");
    }

    #[test]
    fn test_with_custom_replaces_and_appends() {
        let book = PresetBook::from_presets(vec![preset("a", &[("X", "1")]), preset("b", &[])])
            .with_custom(vec![preset("a", &[("X", "2")]), preset("mine", &[("Y", "3")])]);

        let ids: Vec<&str> = book.ids().collect();
        assert_eq!(ids, ["a", "b", "mine"]);
        assert_eq!(book.get("a").unwrap().settings["X"], "2");
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_decode_trims_values() {
        let preset: Preset = serde_json::from_str(
            r#"{ "id": "p", "name": "P", "settings": { "GstRender.VSyncMode": " 1 " } }"#,
        )
        .unwrap();
        assert_eq!(preset.settings["GstRender.VSyncMode"], "1");
        assert_eq!(preset.icon, "");
    }

    #[test]
    fn test_decode_rejects_settings_that_break_the_file() {
        for settings in [
            r#"{ "GstAudio.Empty": "" }"#,
            r#"{ "GstAudio.Blank": "   " }"#,
            r#"{ "GstRender.Inject": "1\nGstRender.Evil 9" }"#,
            r#"{ "GstRender.Carriage": "1\r2" }"#,
            r#"{ "Bad Key": "1" }"#,
            r#"{ "": "1" }"#,
        ] {
            let json = format!(r#"{{ "id": "p", "name": "P", "settings": {settings} }}"#);
            assert!(serde_json::from_str::<Preset>(&json).is_err(), "accepted {settings}");
        }
    }

    #[test]
    fn test_with_custom_skips_invalid_preset() {
        let book = PresetBook::from_presets(vec![preset("a", &[("X", "1")])]).with_custom(vec![
            preset("a", &[("X", "1\nGstRender.Evil 9")]),
            preset("bad", &[("Bad Key", "1")]),
            preset("good", &[("Y", "2")]),
        ]);

        let ids: Vec<&str> = book.ids().collect();
        assert_eq!(ids, ["a", "good"]);
        assert_eq!(book.get("a").unwrap().settings["X"], "1");
    }

    #[test]
    fn test_applied_custom_preset_round_trips() {
        let custom: Vec<Preset> = serde_json::from_str(
            r#"[{ "id": "mine", "name": "Mine", "settings": { "GstRender.Dx12Enabled": " 0", "GstAudio.Volume": "0.5" } }]"#,
        )
        .unwrap();
        let book = PresetBook::builtin().unwrap().with_custom(custom);
        let current = book.apply(&mapping(&[("GstRender.VSyncMode", "1")]), "mine");

        assert_eq!(crate::profsave::parse(&crate::profsave::serialize(&current)), current);
        assert_eq!(current["GstRender.Dx12Enabled"], "0");
    }
}
