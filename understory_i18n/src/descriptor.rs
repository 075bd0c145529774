// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured per-element bindings.
//!
//! An [`I18nDescriptor`] names, for each text-bearing field of an element,
//! the translation key that fills it, plus the substitution values shared by
//! those keys. Descriptors are edited with [`DescriptorPatch`]es whose fields
//! are tri-state: absent keeps the current binding, `null` clears it, and a
//! string rebinds it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::I18nError;
use crate::format::Values;

/// A text-bearing field of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Markup content.
    InnerHtml,
    /// Plain text content.
    InnerText,
    /// The `placeholder` attribute.
    Placeholder,
    /// The `title` attribute.
    Title,
    /// The `label` attribute.
    Label,
}

impl TextField {
    /// Every field, in the order bindings are written.
    pub const ALL: [Self; 5] = [
        Self::InnerHtml,
        Self::InnerText,
        Self::Placeholder,
        Self::Title,
        Self::Label,
    ];

    /// The markup attribute that binds this field on class-marked elements.
    #[must_use]
    pub fn binding_attribute(self) -> &'static str {
        match self {
            Self::InnerHtml => "data-i18n-html",
            Self::InnerText => "data-i18n",
            Self::Placeholder => "data-i18n-placeholder",
            Self::Title => "data-i18n-title",
            Self::Label => "data-i18n-label",
        }
    }

    /// The field's key in a JSON descriptor.
    #[must_use]
    pub fn descriptor_key(self) -> &'static str {
        match self {
            Self::InnerHtml => "innerHTML",
            Self::InnerText => "innerText",
            Self::Placeholder => "placeholder",
            Self::Title => "title",
            Self::Label => "label",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::InnerHtml => 0,
            Self::InnerText => 1,
            Self::Placeholder => 2,
            Self::Title => 3,
            Self::Label => 4,
        }
    }
}

/// Translation keys bound to one element's fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct I18nDescriptor {
    /// Key for [`TextField::InnerHtml`].
    #[serde(rename = "innerHTML", default, skip_serializing_if = "Option::is_none")]
    pub inner_html: Option<String>,
    /// Key for [`TextField::InnerText`].
    #[serde(rename = "innerText", default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,
    /// Key for [`TextField::Placeholder`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Key for [`TextField::Title`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Key for [`TextField::Label`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Substitution values for every bound key.
    #[serde(default, skip_serializing_if = "Values::is_empty")]
    pub values: Values,
}

impl I18nDescriptor {
    /// A descriptor binding only the inner text.
    #[must_use]
    pub fn text(key: impl Into<String>) -> Self {
        Self {
            inner_text: Some(key.into()),
            ..Self::default()
        }
    }

    /// The key bound to `field`.
    #[must_use]
    pub fn field(&self, field: TextField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Binds (or with `None`, unbinds) `field`.
    pub fn set_field(&mut self, field: TextField, key: Option<String>) {
        *self.slot_mut(field) = key;
    }

    /// Bound fields with their keys, in [`TextField::ALL`] order.
    pub fn bindings(&self) -> impl Iterator<Item = (TextField, &str)> + '_ {
        TextField::ALL
            .into_iter()
            .filter_map(|field| self.field(field).map(|key| (field, key)))
    }

    /// Returns `true` if no field is bound.
    #[must_use]
    pub fn is_unbound(&self) -> bool {
        self.bindings().next().is_none()
    }

    /// Merges `patch` into this descriptor.
    pub fn apply(&mut self, patch: &DescriptorPatch) {
        for field in TextField::ALL {
            if let Some(change) = &patch.fields[field.index()] {
                self.set_field(field, change.clone());
            }
        }
        match &patch.values {
            None => {}
            Some(None) => self.values.clear(),
            Some(Some(changes)) => {
                for (name, value) in changes {
                    if value.is_null() {
                        self.values.remove(name);
                    } else {
                        self.values.insert(name.clone(), value.clone());
                    }
                }
            }
        }
    }

    fn slot(&self, field: TextField) -> &Option<String> {
        match field {
            TextField::InnerHtml => &self.inner_html,
            TextField::InnerText => &self.inner_text,
            TextField::Placeholder => &self.placeholder,
            TextField::Title => &self.title,
            TextField::Label => &self.label,
        }
    }

    fn slot_mut(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::InnerHtml => &mut self.inner_html,
            TextField::InnerText => &mut self.inner_text,
            TextField::Placeholder => &mut self.placeholder,
            TextField::Title => &mut self.title,
            TextField::Label => &mut self.label,
        }
    }
}

/// A partial descriptor update.
///
/// Each field is `None` (keep), `Some(None)` (clear) or `Some(Some(key))`
/// (bind). `values` entries are merged per name; a `null` entry removes that
/// name, and a `null` `values` clears them all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescriptorPatch {
    fields: [Option<Option<String>>; 5],
    values: Option<Option<Values>>,
}

impl DescriptorPatch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to `key`.
    #[must_use]
    pub fn bind(mut self, field: TextField, key: impl Into<String>) -> Self {
        self.fields[field.index()] = Some(Some(key.into()));
        self
    }

    /// Clears `field`.
    #[must_use]
    pub fn clear(mut self, field: TextField) -> Self {
        self.fields[field.index()] = Some(None);
        self
    }

    /// Sets one substitution value; `Value::Null` removes it.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let values = self.values.get_or_insert(Some(Values::new()));
        values
            .get_or_insert_with(Values::new)
            .insert(name.into(), value.into());
        self
    }

    /// Clears every substitution value.
    #[must_use]
    pub fn clear_values(mut self) -> Self {
        self.values = Some(None);
        self
    }

    /// The change this patch makes to `field`.
    #[must_use]
    pub fn field(&self, field: TextField) -> Option<Option<&str>> {
        self.fields[field.index()]
            .as_ref()
            .map(|change| change.as_deref())
    }

    /// Returns `true` if applying this patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(Option::is_none) && self.values.is_none()
    }
}

#[derive(Deserialize)]
struct RawPatch {
    #[serde(rename = "innerHTML", default, deserialize_with = "tri_state")]
    inner_html: Option<Option<String>>,
    #[serde(rename = "innerText", default, deserialize_with = "tri_state")]
    inner_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "tri_state")]
    placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "tri_state")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "tri_state")]
    label: Option<Option<String>>,
    #[serde(default, deserialize_with = "tri_state")]
    values: Option<Option<Values>>,
}

/// Distinguishes a present `null` from an absent field.
fn tri_state<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl<'de> Deserialize<'de> for DescriptorPatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPatch::deserialize(deserializer)?;
        Ok(Self {
            fields: [
                raw.inner_html,
                raw.inner_text,
                raw.placeholder,
                raw.title,
                raw.label,
            ],
            values: raw.values,
        })
    }
}

impl From<&I18nDescriptor> for DescriptorPatch {
    /// A patch that binds every field `descriptor` binds and sets its values.
    fn from(descriptor: &I18nDescriptor) -> Self {
        let mut patch = Self::new();
        for (field, key) in descriptor.bindings() {
            patch = patch.bind(field, key);
        }
        if !descriptor.values.is_empty() {
            patch.values = Some(Some(descriptor.values.clone()));
        }
        patch
    }
}

/// What `add_i18n_element` does to an element's descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorUpdate {
    /// Merge a patch, creating the descriptor if needed.
    Patch(DescriptorPatch),
    /// Shorthand for binding the inner text to a key.
    Key(String),
    /// Drop the whole descriptor.
    Remove,
}

impl DescriptorUpdate {
    /// Parses a JSON descriptor: an object is a patch, a string is a key,
    /// and `null` removes.
    ///
    /// `attribute` names the source in the returned error.
    pub fn from_json(attribute: &'static str, json: &str) -> Result<Self, I18nError> {
        let malformed = |source| I18nError::MalformedJson { attribute, source };
        let value: Value = serde_json::from_str(json).map_err(malformed)?;
        match value {
            Value::Null => Ok(Self::Remove),
            Value::String(key) => Ok(Self::Key(key)),
            other => DescriptorPatch::deserialize(other)
                .map(Self::Patch)
                .map_err(malformed),
        }
    }

    /// Applies this update to an optional descriptor slot.
    pub fn apply_to(&self, slot: &mut Option<I18nDescriptor>) {
        match self {
            Self::Patch(patch) => slot.get_or_insert_with(I18nDescriptor::default).apply(patch),
            Self::Key(key) => {
                slot.get_or_insert_with(I18nDescriptor::default).inner_text = Some(key.clone());
            }
            Self::Remove => *slot = None,
        }
    }
}

impl From<DescriptorPatch> for DescriptorUpdate {
    fn from(patch: DescriptorPatch) -> Self {
        Self::Patch(patch)
    }
}

impl From<&str> for DescriptorUpdate {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for DescriptorUpdate {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<Option<DescriptorPatch>> for DescriptorUpdate {
    fn from(patch: Option<DescriptorPatch>) -> Self {
        patch.map_or(Self::Remove, Self::Patch)
    }
}
