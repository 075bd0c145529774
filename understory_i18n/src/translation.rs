// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation tables and the per-language registry.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// One language's string table.
///
/// This is also the exchanged file shape:
///
/// ```json
/// { "lang": "french", "authors": ["..."], "strings": { "greeting": "Bonjour ${name}" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Language identifier; registry key.
    pub lang: String,
    /// Optional credits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Flat key to template map.
    pub strings: HashMap<String, String>,
}

impl Translation {
    /// Creates an empty table for `lang`.
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            authors: Vec::new(),
            strings: HashMap::new(),
        }
    }

    /// Adds (or replaces) one string.
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Parses a translation file.
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        serde_json::from_str(json).map_err(|source| I18nError::InvalidTranslation { source })
    }

    /// Looks up `key` in this table only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

/// All registered tables, keyed by language.
///
/// Registering a table for a language that already has one replaces it
/// wholesale; tables are never merged.
#[derive(Clone, Debug, Default)]
pub struct TranslationRegistry {
    tables: HashMap<String, Translation>,
}

impl TranslationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `translation`, returning the table it replaced.
    pub fn insert(&mut self, translation: Translation) -> Option<Translation> {
        self.tables.insert(translation.lang.clone(), translation)
    }

    /// The table for `lang`.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&Translation> {
        self.tables.get(lang)
    }

    /// Looks up `key` in the table for `lang`.
    #[must_use]
    pub fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.get(lang).and_then(|t| t.get(key))
    }

    /// Registered languages, in no particular order.
    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.keys().map(String::as_str)
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no table is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Translation, TranslationRegistry};
    use crate::error::I18nError;

    #[test]
    fn parses_file_shape() {
        let t = Translation::from_json(
            r#"{ "lang": "french", "strings": { "greeting": "Bonjour ${name}" } }"#,
        )
        .unwrap();
        assert_eq!(t.lang, "french");
        assert!(t.authors.is_empty());
        assert_eq!(t.get("greeting"), Some("Bonjour ${name}"));
        assert_eq!(t.get("missing"), None);
    }

    #[test]
    fn rejects_nested_strings() {
        let err = Translation::from_json(r#"{ "lang": "en", "strings": { "a": { "b": "c" } } }"#)
            .unwrap_err();
        assert!(matches!(err, I18nError::InvalidTranslation { .. }));
    }

    #[test]
    fn later_table_replaces_earlier() {
        let mut registry = TranslationRegistry::new();
        registry.insert(Translation::new("en").with_string("a", "1").with_string("b", "2"));
        let old = registry.insert(Translation::new("en").with_string("a", "3"));
        assert_eq!(old.map(|t| t.strings.len()), Some(2));
        assert_eq!(registry.lookup("en", "a"), Some("3"));
        assert_eq!(registry.lookup("en", "b"), None);
        assert_eq!(registry.len(), 1);
    }
}
