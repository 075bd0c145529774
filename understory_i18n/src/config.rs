// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::translation::Translation;

/// Language used for both slots until the host picks one.
pub const DEFAULT_LANG: &str = "en";

/// Engine tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct I18nConfig {
    /// Quiet period of the refresh debounce, in milliseconds.
    pub debounce_ms: u64,
    /// Class that marks attribute-bound elements.
    pub class_name: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            class_name: "i18n".to_owned(),
        }
    }
}

impl I18nConfig {
    /// Sets the debounce delay.
    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Sets the marker class.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// Bulk setup accepted by `set_options`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct I18nOptions {
    /// Tables to register, in order.
    pub translations: Vec<Translation>,
    /// Current language, if it should change.
    pub lang: Option<String>,
    /// Fallback language, if it should change.
    pub default_lang: Option<String>,
}

impl I18nOptions {
    /// Options registering `translations` only.
    #[must_use]
    pub fn with_translations(translations: impl IntoIterator<Item = Translation>) -> Self {
        Self {
            translations: translations.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Also switches the current language.
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Also switches the fallback language.
    #[must_use]
    pub fn default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = Some(lang.into());
        self
    }
}
