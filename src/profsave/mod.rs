//! PROFSAVE_profile text format
//!
//! The game stores its settings as one `Key value` pair per line. This module
//! provides two pieces:
//! - **codec**: text to mapping and back, plus the format sniff
//! - **diff**: change set between the loaded mapping and the edited one

pub mod codec;
pub mod diff;

use std::collections::BTreeMap;

/// Setting key to raw wire value. Values are never type-coerced here.
pub type ConfigMapping = BTreeMap<String, String>;

pub use codec::{is_valid_config, parse, serialize};
pub use diff::{get_changes, ChangeRecord, Changes};
