// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors surfaced by the i18n engine.
///
/// Missing keys and unknown attributes are not errors; only structured data
/// that fails to parse is reported.
#[derive(Debug)]
pub enum I18nError {
    /// A structured binding attribute (`data-i18n-json`, `data-i18n-values`)
    /// holds malformed JSON.
    MalformedJson {
        /// The attribute that failed to parse.
        attribute: &'static str,
        /// The underlying parse error.
        source: serde_json::Error,
    },
    /// A translation file does not match the `{ lang, authors?, strings }` shape.
    InvalidTranslation {
        /// The underlying parse error.
        source: serde_json::Error,
    },
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { attribute, source } => {
                write!(f, "malformed JSON in `{attribute}`: {source}")
            }
            Self::InvalidTranslation { source } => write!(f, "invalid translation file: {source}"),
        }
    }
}

impl core::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MalformedJson { source, .. } | Self::InvalidTranslation { source } => Some(source),
        }
    }
}
