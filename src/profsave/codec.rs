//! Line codec for PROFSAVE_profile files

use tracing::{debug, trace};

use super::ConfigMapping;
use crate::constants::format::{KNOWN_PREFIXES, SEPARATOR};

/// Parse raw file content into a mapping
///
/// Accepts LF, CRLF and lone CR line endings. Lines without a separator or
/// without a value after trimming are skipped silently; duplicate keys keep
/// the last value.
pub fn parse(content: &str) -> ConfigMapping {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut mapping = ConfigMapping::new();
    let mut skipped = 0usize;

    for line in normalized.split('\n') {
        // Only trailing whitespace goes; leading content stays as written
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(SEPARATOR) else {
            trace!(line = %line, "skipping line without separator");
            skipped += 1;
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            trace!(key = %key, "skipping key without value");
            skipped += 1;
            continue;
        }

        mapping.insert(key.to_string(), value.to_string());
    }

    debug!(entries = mapping.len(), skipped, "parsed config");
    mapping
}

/// Serialize a mapping back to file content
///
/// Keys come out in ascending code-point order, one `key value` per line,
/// LF only, with a single trailing LF. An empty mapping yields `""`.
pub fn serialize(mapping: &ConfigMapping) -> String {
    // BTreeMap<String, _> iterates in byte order, which for UTF-8 is code-point order
    let mut out = String::new();
    for (key, value) in mapping {
        out.push_str(key);
        out.push(SEPARATOR);
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Cheap format sniff: true if any known key prefix occurs anywhere in the text
pub fn is_valid_config(content: &str) -> bool {
    KNOWN_PREFIXES.iter().any(|prefix| content.contains(prefix))
}
