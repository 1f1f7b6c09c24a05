//! Debian `control` file parsing.
//!
//! The control file is a list of `Key: value` lines. A line that begins with
//! a space continues the value of the previous key; its trimmed text is
//! appended after a newline. Keys are case-insensitive and stored lower-cased.
//!
//! ```text
//! Package: demo
//! Description: line one
//!  line two continuation
//! ```

use std::collections::HashMap;

use super::error::{DebError, Result};

/// Fields every binary package must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "package",
    "version",
    "architecture",
    "maintainer",
    "description",
];

/// Key/value record parsed from a control file.
///
/// Arbitrary extra fields are kept verbatim. The required-field contract is
/// checked separately by [`ControlMetadata::validate_required`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlMetadata {
    fields: HashMap<String, String>,
}

impl ControlMetadata {
    pub fn parse(text: &str) -> Self {
        let mut control = Self::default();
        control.merge_text(text);
        control
    }

    /// Fold `text` into this record.
    ///
    /// An empty value never replaces one that is already set, so for a
    /// repeated key the first non-empty value wins unless a later line also
    /// carries a value. Continuation lines are dropped while no key with a
    /// value is current.
    pub fn merge_text(&mut self, text: &str) {
        let mut current: Option<String> = None;

        for line in text.split('\n') {
            if line.trim().is_empty() {
                continue;
            }

            if line.starts_with(' ') {
                if let Some(value) = current.as_ref().and_then(|k| self.fields.get_mut(k)) {
                    if !value.is_empty() {
                        value.push('\n');
                        value.push_str(line.trim());
                    }
                }
                continue;
            }

            // A colon at position 0 gives no key; such lines are ignored like
            // any other line without one.
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let value = value.trim();
            if !value.is_empty() {
                self.fields.insert(key.clone(), value.to_string());
            }
            current = Some(key);
        }
    }

    /// Field names from [`REQUIRED_FIELDS`] that are absent or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|key| self.get(key).is_none_or(str::is_empty))
            .collect()
    }

    pub fn validate_required(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DebError::MissingRequiredMetadata(missing))
        }
    }

    /// Look up a field; `key` is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(v) => Some(v.as_str()),
            None => self.fields.get(&key.to_lowercase()).map(String::as_str),
        }
    }

    pub fn package(&self) -> &str {
        self.get("package").unwrap_or_default()
    }

    pub fn version(&self) -> &str {
        self.get("version").unwrap_or_default()
    }

    pub fn architecture(&self) -> &str {
        self.get("architecture").unwrap_or_default()
    }

    pub fn maintainer(&self) -> &str {
        self.get("maintainer").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.get("description").unwrap_or_default()
    }

    /// Iterate fields sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<_> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by_key(|(k, _)| *k);
        pairs.into_iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.fields
    }
}
