//! Read-only etymology index: character → [`Etymology`].
//!
//! An [`EtymologyIndex`] is produced once by
//! [`EtymologyBuilder::finalize`](crate::builder::EtymologyBuilder::finalize)
//! and never changes afterwards, so the lookup layer can share it freely.
//! Keys are NFC-normalized unless the builder was configured otherwise.
//! CJK compatibility ideographs are left as written: NFC would fold them
//! onto their unified counterparts, which are distinct characters here.

use std::collections::{BTreeMap, HashMap};

use unicode_normalization::UnicodeNormalization;

use crate::entry::Etymology;

fn is_compatibility_ideograph(c: char) -> bool {
    matches!(c, '\u{F900}'..='\u{FAFF}' | '\u{2F800}'..='\u{2FA1F}')
}

/// Normalize a registry key.
pub(crate) fn normalize_key(character: &str, normalize: bool) -> String {
    if !normalize {
        return character.to_string();
    }
    let mut key = String::with_capacity(character.len());
    let mut run_start = 0;
    for (i, c) in character.char_indices() {
        if is_compatibility_ideograph(c) {
            key.extend(character[run_start..i].nfc());
            key.push(c);
            run_start = i + c.len_utf8();
        }
    }
    key.extend(character[run_start..].nfc());
    key
}

/// Frozen mapping from character to etymology.
#[derive(Clone, Default)]
pub struct EtymologyIndex {
    entries: HashMap<String, Etymology>,
    normalize_keys: bool,
}

impl EtymologyIndex {
    pub(crate) fn new(entries: HashMap<String, Etymology>, normalize_keys: bool) -> Self {
        Self {
            entries,
            normalize_keys,
        }
    }

    /// Look up the etymology of `character`.
    pub fn get(&self, character: &str) -> Option<&Etymology> {
        self.entries
            .get(&normalize_key(character, self.normalize_keys))
    }

    pub fn contains(&self, character: &str) -> bool {
        self.get(character).is_some()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Etymology)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All registered characters, sorted.
    pub fn characters(&self) -> Vec<&str> {
        let mut chars: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        chars.sort_unstable();
        chars
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Pretty JSON object of every entry, keys sorted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let sorted: BTreeMap<&str, &Etymology> = self.iter().collect();
        serde_json::to_string_pretty(&sorted)
    }

    /// JSON value of a single entry.
    pub fn entry_json(&self, character: &str) -> Option<serde_json::Result<serde_json::Value>> {
        self.get(character).map(serde_json::to_value)
    }
}

impl std::fmt::Debug for EtymologyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtymologyIndex")
            .field("count", &self.len())
            .finish()
    }
}
