//! Translation table
//!
//! Immutable mapping from lowercase language code to greeting text, built
//! once at configuration time and shared read-only by every request.
//!
//! The definitions source is line-oriented: the first whitespace-delimited
//! token on a line is the language code, the remainder up to the line
//! terminator is the greeting text.
//!
//! ```text
//! en hello world
//! es hola mundo
//! fr bonjour monde
//! ```

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Maximum number of definition bytes parsed. Longer sources are silently
/// truncated, not rejected.
pub const MAX_SOURCE_BYTES: usize = 2048;

/// Maximum number of entries accepted at build time.
pub const MAX_ENTRIES: usize = 256;

/// Immutable code -> greeting mapping
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Build a table from raw definition bytes.
    ///
    /// Input is truncated to [`MAX_SOURCE_BYTES`] before parsing. Codes are
    /// lowercased before insertion; a duplicate code overwrites the earlier
    /// entry (last write wins). A trailing code with no paired text is
    /// ignored.
    pub fn from_bytes(source: &[u8]) -> Result<Self> {
        let source = &source[..source.len().min(MAX_SOURCE_BYTES)];
        let text = String::from_utf8_lossy(source);

        let mut entries = HashMap::new();
        for line in text.lines() {
            // Leading whitespace is not significant; the code is the first
            // whitespace-delimited token on the line.
            let Some((code, greeting)) = line.trim_start().split_once(char::is_whitespace)
            else {
                continue;
            };

            let code = code.to_ascii_lowercase();
            if entries.len() >= MAX_ENTRIES && !entries.contains_key(&code) {
                return Err(Error::TableFull { limit: MAX_ENTRIES });
            }
            entries.insert(code, greeting.to_string());
        }

        Ok(Self { entries })
    }

    /// Build a table from a definitions file.
    ///
    /// An unreadable source is a configuration-load failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::SourceUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Built-in default greetings, used when no definitions file is
    /// configured.
    pub fn builtin() -> Self {
        let entries = [
            ("en", "hello world"),
            ("es", "hola mundo"),
            ("fr", "bonjour monde"),
            ("in", "namaste duniya"),
        ]
        .into_iter()
        .map(|(code, text)| (code.to_string(), text.to_string()))
        .collect();

        Self { entries }
    }

    /// Look up a greeting by language code (case-insensitive).
    ///
    /// Absence is not an error; O(1) expected; never mutates the table.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries
            .get(&code.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether a code has a translation (case-insensitive).
    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
