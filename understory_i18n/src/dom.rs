// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element surface the engine reads and writes.

use core::fmt::Debug;
use core::hash::Hash;

use crate::descriptor::TextField;

/// Attributes whose changes re-resolve an element.
pub const OBSERVED_ATTRIBUTES: [&str; 8] = [
    "class",
    "data-i18n",
    "data-i18n-html",
    "data-i18n-title",
    "data-i18n-placeholder",
    "data-i18n-label",
    "data-i18n-values",
    "data-i18n-json",
];

/// Attribute holding substitution values as a JSON object.
pub const VALUES_ATTRIBUTE: &str = "data-i18n-values";

/// Attribute holding a whole JSON descriptor.
pub const DESCRIPTOR_ATTRIBUTE: &str = "data-i18n-json";

/// Returns `true` if a change to `name` can affect an element's bindings.
#[must_use]
pub fn is_observed_attribute(name: &str) -> bool {
    OBSERVED_ATTRIBUTES.contains(&name)
}

/// Host element tree, as seen by the engine.
///
/// Node handles are plain copyable keys. The engine stores them but never
/// keeps a node alive: anything [`I18nDom::is_alive`] rejects is treated as
/// gone. Live but detached nodes keep their bindings and are only skipped
/// until they are attached again.
pub trait I18nDom {
    /// Node handle.
    type Node: Copy + Eq + Hash + Debug;

    /// Returns `true` while `node` still exists, attached or not.
    fn is_alive(&self, node: Self::Node) -> bool;

    /// Parent of `node` within its own tree. `None` for documents, shadow
    /// roots and detached subtree tops.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns `true` if `node` is alive and attached to a document, directly
    /// or through shadow-root hosts.
    fn is_connected(&self, node: Self::Node) -> bool;

    /// Returns `true` if `node` is an element (not text, not a root).
    fn is_element(&self, node: Self::Node) -> bool;

    /// Value of attribute `name` on `node`.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Returns `true` if `node`'s `class` list contains `class`.
    fn has_class(&self, node: Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Appends every descendant element of `root` carrying `class` to `out`,
    /// in document order. `root` itself is not included.
    fn query_class(&self, root: Self::Node, class: &str, out: &mut Vec<Self::Node>);

    /// Writes `text` into `field` of `node`.
    fn set_text(&mut self, node: Self::Node, field: TextField, text: &str);
}
