//! Service configuration
//!
//! Optionally point at a translation definitions file and name a default
//! language, then build the immutable table the handler serves from.
//! Build failures are configuration-load failures; a server must refuse
//! to start (or to reload) with a configuration whose table cannot be
//! built.

use crate::{Error, Result, TranslationTable};
use std::path::PathBuf;

/// Greeting service configuration
#[derive(Debug, Clone, Default)]
pub struct GreetingConfig {
    /// Language that must be present in the table (directive validation)
    pub default_language: Option<String>,
    /// Definitions file; the builtin greetings are used when unset
    pub translations: Option<PathBuf>,
}

impl GreetingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    pub fn translations(mut self, path: impl Into<PathBuf>) -> Self {
        self.translations = Some(path.into());
        self
    }

    /// Build the translation table this configuration describes.
    ///
    /// Fails when the definitions file cannot be read, the table exceeds
    /// its capacity, or the configured default language has no
    /// translation.
    pub fn build_table(&self) -> Result<TranslationTable> {
        let table = match &self.translations {
            Some(path) => TranslationTable::from_file(path)?,
            None => TranslationTable::builtin(),
        };

        if let Some(code) = &self.default_language {
            if !table.contains(code) {
                return Err(Error::UnknownLanguage(code.clone()));
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_when_no_file() {
        let table = GreetingConfig::new().build_table().unwrap();
        assert_eq!(table.lookup("es"), Some("hola mundo"));
    }

    #[test]
    fn test_default_language_validated() {
        let config = GreetingConfig::new().default_language("fr");
        assert!(config.build_table().is_ok());

        let config = GreetingConfig::new().default_language("xx");
        match config.build_table() {
            Err(Error::UnknownLanguage(code)) => assert_eq!(code, "xx"),
            other => panic!("expected UnknownLanguage, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_fails_build() {
        let config = GreetingConfig::new().translations("/nonexistent/greetings.txt");
        assert!(matches!(
            config.build_table(),
            Err(Error::SourceUnreadable { .. })
        ));
    }
}
