//! Logical-type interpretation of raw wire values
//!
//! The codec keeps every value as a string. Everything that needs to know
//! whether a value is a toggle, a choice or a number goes through here:
//! rendering, diff display, advisory range checks and turning user input
//! into the string the game expects.

use thiserror::Error;

use crate::catalog::SettingKind;
use crate::constants::value::{BOOL_OFF, BOOL_ON, FLOAT_DISPLAY_DECIMALS, FLOAT_WIRE_DECIMALS};

/// Typed view of a raw value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Choice { code: i64, label: Option<String> },
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("{0:?} is not an integer")]
    NotAnInteger(String),

    #[error("{0:?} is not a boolean (expected 1/0, on/off, true/false, yes/no)")]
    NotABoolean(String),

    #[error("{value} is outside the range {min} to {max}")]
    OutOfRange { value: String, min: String, max: String },

    #[error("{input:?} is not one of: {choices}")]
    UnknownOption { input: String, choices: String },

    #[error("value is empty")]
    Empty,
}

/// Integer reading of a raw value; accepts a float spelling and truncates it
fn parse_int_lenient(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Wire spelling of a float (the game writes six decimals)
pub fn format_float(value: f64) -> String {
    format!("{value:.prec$}", prec = FLOAT_WIRE_DECIMALS)
}

impl SettingKind {
    /// Typed reading of `raw`, or None if it does not parse as this type
    pub fn interpret(&self, raw: &str) -> Option<SettingValue> {
        match self {
            SettingKind::Bool { .. } => {
                // Anything numeric other than 1 reads as off
                let raw = raw.trim();
                if raw == "1" {
                    Some(SettingValue::Bool(true))
                } else {
                    parse_float(raw).map(|_| SettingValue::Bool(false))
                }
            }
            SettingKind::Int { options: Some(options), .. } => {
                parse_int_lenient(raw).map(|code| SettingValue::Choice {
                    code,
                    label: options.get(&code).cloned(),
                })
            }
            SettingKind::Int { options: None, .. } => parse_int_lenient(raw).map(SettingValue::Int),
            SettingKind::Float { .. } => parse_float(raw).map(SettingValue::Float),
        }
    }

    /// Human-readable rendering of `raw`; falls back to the raw text
    pub fn display(&self, raw: &str) -> String {
        match self.interpret(raw) {
            Some(SettingValue::Bool(true)) => BOOL_ON.to_string(),
            Some(SettingValue::Bool(false)) => BOOL_OFF.to_string(),
            Some(SettingValue::Choice { label: Some(label), .. }) => label,
            Some(SettingValue::Float(f)) => format!("{f:.prec$}", prec = FLOAT_DISPLAY_DECIMALS),
            Some(SettingValue::Int(_)) | Some(SettingValue::Choice { label: None, .. }) | None => {
                raw.to_string()
            }
        }
    }

    /// Default value in wire form
    pub fn default_wire(&self) -> String {
        match self {
            SettingKind::Bool { default } => (if *default { "1" } else { "0" }).to_string(),
            SettingKind::Int { default, .. } => default.to_string(),
            SettingKind::Float { default, .. } => format_float(*default),
        }
    }

    /// Type and range check of a stored value
    pub fn check(&self, raw: &str) -> Result<(), ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        match self {
            SettingKind::Bool { .. } => match trimmed {
                "0" | "1" => Ok(()),
                _ => Err(ValueError::NotABoolean(raw.to_string())),
            },
            SettingKind::Int { range, options, .. } => {
                let value = trimmed
                    .parse::<i64>()
                    .map_err(|_| ValueError::NotAnInteger(raw.to_string()))?;
                if let Some(options) = options {
                    if !options.contains_key(&value) {
                        return Err(ValueError::UnknownOption {
                            input: raw.to_string(),
                            choices: describe_options(options),
                        });
                    }
                } else if !range.contains(&value) {
                    return Err(ValueError::OutOfRange {
                        value: value.to_string(),
                        min: range.start().to_string(),
                        max: range.end().to_string(),
                    });
                }
                Ok(())
            }
            SettingKind::Float { range, .. } => {
                let value = parse_float(trimmed).ok_or_else(|| ValueError::NotANumber(raw.to_string()))?;
                if range.contains(&value) {
                    Ok(())
                } else {
                    Err(ValueError::OutOfRange {
                        value: trimmed.to_string(),
                        min: range.start().to_string(),
                        max: range.end().to_string(),
                    })
                }
            }
        }
    }

    /// Turn user input into the wire string for this type
    ///
    /// Range is not enforced here; see [`SettingKind::check`].
    pub fn encode_input(&self, input: &str) -> Result<String, ValueError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValueError::Empty);
        }
        match self {
            SettingKind::Bool { .. } => match input.to_ascii_lowercase().as_str() {
                "1" | "on" | "true" | "yes" => Ok("1".to_string()),
                "0" | "off" | "false" | "no" => Ok("0".to_string()),
                _ => Err(ValueError::NotABoolean(input.to_string())),
            },
            SettingKind::Int { options: Some(options), .. } => {
                if let Ok(code) = input.parse::<i64>() {
                    return Ok(code.to_string());
                }
                options
                    .iter()
                    .find(|(_, label)| label.eq_ignore_ascii_case(input))
                    .map(|(code, _)| code.to_string())
                    .ok_or_else(|| ValueError::UnknownOption {
                        input: input.to_string(),
                        choices: describe_options(options),
                    })
            }
            SettingKind::Int { options: None, .. } => input
                .parse::<i64>()
                .map(|v| v.to_string())
                .map_err(|_| ValueError::NotAnInteger(input.to_string())),
            SettingKind::Float { .. } => parse_float(input)
                .map(format_float)
                .ok_or_else(|| ValueError::NotANumber(input.to_string())),
        }
    }
}

fn describe_options(options: &std::collections::BTreeMap<i64, String>) -> String {
    options
        .iter()
        .map(|(code, label)| format!("{code} ({label})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn toggle() -> SettingKind {
        SettingKind::Bool { default: true }
    }

    fn fullscreen() -> SettingKind {
        SettingKind::Int {
            default: 1,
            range: 0..=2,
            options: Some(BTreeMap::from([
                (0, "Windowed".to_string()),
                (1, "Borderless".to_string()),
                (2, "Fullscreen".to_string()),
            ])),
        }
    }

    fn counter() -> SettingKind {
        SettingKind::Int { default: 0, range: -10..=10, options: None }
    }

    fn volume() -> SettingKind {
        SettingKind::Float { default: 1.0, range: 0.0..=1.0 }
    }

    #[test]
    fn test_interpret() {
        assert_eq!(toggle().interpret("1"), Some(SettingValue::Bool(true)));
        assert_eq!(toggle().interpret("0"), Some(SettingValue::Bool(false)));
        assert_eq!(toggle().interpret("2"), Some(SettingValue::Bool(false)));
        assert_eq!(toggle().interpret("(new)"), None);
        assert_eq!(
            fullscreen().interpret("2"),
            Some(SettingValue::Choice { code: 2, label: Some("Fullscreen".into()) })
        );
        assert_eq!(fullscreen().interpret("7"), Some(SettingValue::Choice { code: 7, label: None }));
        assert_eq!(counter().interpret("3.9"), Some(SettingValue::Int(3)));
        assert_eq!(volume().interpret("0.500000"), Some(SettingValue::Float(0.5)));
        assert_eq!(volume().interpret("loud"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(toggle().display("1"), "ON");
        assert_eq!(toggle().display("0"), "OFF");
        assert_eq!(fullscreen().display("0"), "Windowed");
        // Unlabelled code shows as written
        assert_eq!(fullscreen().display("9"), "9");
        assert_eq!(counter().display("-4"), "-4");
        assert_eq!(volume().display("0.021000"), "0.02");
        assert_eq!(volume().display("1.000000"), "1.00");
        // Diff sentinel passes through
        assert_eq!(volume().display("(new)"), "(new)");
        assert_eq!(fullscreen().display("(new)"), "(new)");
    }

    #[test]
    fn test_default_wire() {
        assert_eq!(toggle().default_wire(), "1");
        assert_eq!(fullscreen().default_wire(), "1");
        assert_eq!(volume().default_wire(), "1.000000");
    }

    #[test]
    fn test_check() {
        assert!(toggle().check("1").is_ok());
        assert_eq!(toggle().check("2"), Err(ValueError::NotABoolean("2".into())));
        assert!(fullscreen().check("2").is_ok());
        assert!(matches!(fullscreen().check("3"), Err(ValueError::UnknownOption { .. })));
        assert!(counter().check("-10").is_ok());
        assert!(matches!(counter().check("11"), Err(ValueError::OutOfRange { .. })));
        assert_eq!(counter().check("1.5"), Err(ValueError::NotAnInteger("1.5".into())));
        assert!(volume().check("0.250000").is_ok());
        assert!(matches!(volume().check("1.5"), Err(ValueError::OutOfRange { .. })));
        assert_eq!(volume().check("   "), Err(ValueError::Empty));
    }

    #[test]
    fn test_encode_input_bool() {
        assert_eq!(toggle().encode_input("on").unwrap(), "1");
        assert_eq!(toggle().encode_input("TRUE").unwrap(), "1");
        assert_eq!(toggle().encode_input("no").unwrap(), "0");
        assert_eq!(toggle().encode_input(" 0 ").unwrap(), "0");
        assert!(toggle().encode_input("maybe").is_err());
    }

    #[test]
    fn test_encode_input_choice_by_code_or_label() {
        assert_eq!(fullscreen().encode_input("2").unwrap(), "2");
        assert_eq!(fullscreen().encode_input("borderless").unwrap(), "1");
        let err = fullscreen().encode_input("exclusive").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"exclusive\" is not one of: 0 (Windowed), 1 (Borderless), 2 (Fullscreen)"
        );
    }

    #[test]
    fn test_encode_input_numbers() {
        assert_eq!(counter().encode_input("-7").unwrap(), "-7");
        assert!(counter().encode_input("seven").is_err());
        assert_eq!(volume().encode_input("0.5").unwrap(), "0.500000");
        assert_eq!(volume().encode_input("1").unwrap(), "1.000000");
        assert!(volume().encode_input("NaN").is_err());
        assert_eq!(volume().encode_input(""), Err(ValueError::Empty));
    }
}
