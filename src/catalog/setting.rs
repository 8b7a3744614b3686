//! Setting metadata types
//!
//! Catalog entries are decoded from a flat JSON record and checked into a
//! tagged [`SettingKind`], so every consumer matches on the logical type
//! instead of probing optional fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::CatalogError;

/// Top-level grouping of settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Graphics,
    Performance,
    Audio,
    Gameplay,
    Input,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Graphics,
        Category::Performance,
        Category::Audio,
        Category::Gameplay,
        Category::Input,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Graphics => "Graphics",
            Category::Performance => "Performance",
            Category::Audio => "Audio",
            Category::Gameplay => "Gameplay",
            Category::Input => "Input",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Logical type of a setting with its type-specific constraints
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind {
    /// Toggle stored as `1`/`0`
    Bool { default: bool },
    /// Integer, optionally restricted to a labelled set of codes
    Int {
        default: i64,
        range: RangeInclusive<i64>,
        options: Option<BTreeMap<i64, String>>,
    },
    /// Float slider
    Float {
        default: f64,
        range: RangeInclusive<f64>,
    },
}

impl SettingKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingKind::Bool { .. } => "bool",
            SettingKind::Int { .. } => "int",
            SettingKind::Float { .. } => "float",
        }
    }
}

/// Display and validation metadata for one known key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSetting")]
pub struct SettingMetadata {
    pub key: String,
    pub name: String,
    pub category: Category,
    pub subcategory: String,
    pub kind: SettingKind,
    pub tooltip: String,
    pub search_aliases: Vec<String>,
}

impl SettingMetadata {
    /// Whether the lowercase `needle` occurs in any searchable field
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [
            self.name.as_str(),
            self.category.as_str(),
            self.subcategory.as_str(),
            self.key.as_str(),
        ]
        .into_iter()
        .chain(self.search_aliases.iter().map(String::as_str))
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawType {
    Bool,
    Int,
    Float,
}

/// Record as stored in the catalog JSON
#[derive(Debug, Deserialize)]
struct RawSetting {
    key: String,
    name: String,
    category: Category,
    subcategory: String,
    #[serde(rename = "type")]
    kind: RawType,
    default: f64,
    range: [f64; 2],
    #[serde(default)]
    options: Option<BTreeMap<String, String>>,
    #[serde(default)]
    tooltip: String,
    #[serde(default)]
    search_aliases: Vec<String>,
}

fn integral(key: &str, field: &'static str, value: f64) -> Result<i64, CatalogError> {
    if value.fract() == 0.0 && value.is_finite() {
        Ok(value as i64)
    } else {
        Err(CatalogError::InvalidEntry {
            key: key.to_string(),
            reason: format!("{field} must be an integer, got {value}"),
        })
    }
}

impl TryFrom<RawSetting> for SettingMetadata {
    type Error = CatalogError;

    fn try_from(raw: RawSetting) -> Result<Self, Self::Error> {
        let invalid = |reason: String| CatalogError::InvalidEntry {
            key: raw.key.clone(),
            reason,
        };

        let [min, max] = raw.range;
        if min > max {
            return Err(invalid(format!("range [{min}, {max}] is inverted")));
        }
        if raw.options.is_some() && !matches!(raw.kind, RawType::Int) {
            return Err(invalid("options are only allowed on int settings".to_string()));
        }

        let kind = match raw.kind {
            RawType::Bool => {
                if raw.range != [0.0, 1.0] {
                    return Err(invalid(format!("bool range must be [0, 1], got [{min}, {max}]")));
                }
                SettingKind::Bool {
                    default: raw.default != 0.0,
                }
            }
            RawType::Int => {
                let options = match &raw.options {
                    Some(options) => {
                        let mut codes = BTreeMap::new();
                        for (code, label) in options {
                            let code = code
                                .trim()
                                .parse::<i64>()
                                .map_err(|_| invalid(format!("option code {code:?} is not an integer")))?;
                            codes.insert(code, label.clone());
                        }
                        Some(codes)
                    }
                    None => None,
                };
                SettingKind::Int {
                    default: integral(&raw.key, "default", raw.default)?,
                    range: integral(&raw.key, "range min", min)?..=integral(&raw.key, "range max", max)?,
                    options,
                }
            }
            RawType::Float => SettingKind::Float {
                default: raw.default,
                range: min..=max,
            },
        };

        Ok(SettingMetadata {
            key: raw.key,
            name: raw.name,
            category: raw.category,
            subcategory: raw.subcategory,
            kind,
            tooltip: raw.tooltip,
            search_aliases: raw.search_aliases,
        })
    }
}
