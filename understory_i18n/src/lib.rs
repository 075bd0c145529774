// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_i18n --heading-base-level=0

//! Understory i18n: translation tables bound to element text.
//!
//! This crate keeps a registry of per-language string tables and writes the
//! resolved strings into host elements. It does not own a document: the host
//! implements [`I18nDom`] over its own element tree (or uses [`MemoryDom`]),
//! forwards mutation-observer records, and drives the debounce clock.
//!
//! ## Resolution
//!
//! [`I18n::get_string`] looks a key up in the current language, then in the
//! fallback language, and finally returns the key itself (logging a warning)
//! so there is always something to show. [`I18n::format_string`] then
//! replaces `${name}` placeholders from a [`Values`] map; placeholders with no
//! value stay in the output.
//!
//! ## Bindings
//!
//! - Elements with the marker class (`i18n` by default) bind fields through
//!   attributes: `data-i18n` (inner text), `data-i18n-html`,
//!   `data-i18n-title`, `data-i18n-placeholder`, `data-i18n-label`, with
//!   `data-i18n-values` holding a JSON object of values and `data-i18n-json`
//!   holding a whole JSON descriptor that overrides the individual attributes.
//! - Any element can instead be registered with [`I18n::add_i18n_element`],
//!   which merges a [`DescriptorPatch`] into a side table.
//!
//! ## Refresh protocol
//!
//! Language switches and translation updates call [`I18n::request_refresh`],
//! which coalesces bursts into one pass after [`I18nConfig::debounce_ms`].
//! The host calls [`I18n::poll`] at or after [`I18n::next_deadline`]. Mutation
//! records are handled synchronously by [`I18n::on_mutations`], which only
//! resolves the affected elements.
//!
//! ```rust
//! use understory_i18n::{I18n, I18nOptions, MemoryDom, TextField, Translation};
//! use understory_timing::ManualClock;
//!
//! let clock = ManualClock::new();
//! let mut i18n = I18n::new(clock.clone());
//! i18n.set_options(I18nOptions::with_translations([
//!     Translation::new("en").with_string("title", "Settings"),
//!     Translation::new("french").with_string("title", "Paramètres"),
//! ]));
//!
//! let mut dom = MemoryDom::new();
//! let doc = dom.document();
//! let heading = dom.create_element("h1");
//! dom.set_attribute(heading, "class", "i18n");
//! dom.set_attribute(heading, "data-i18n", "title");
//! dom.append_child(doc, heading);
//!
//! i18n.start(doc);
//! clock.advance(100);
//! assert!(i18n.poll(&mut dom).unwrap());
//! assert_eq!(dom.text(heading, TextField::InnerText), Some("Settings"));
//!
//! i18n.set_lang("french");
//! clock.advance(100);
//! i18n.poll(&mut dom).unwrap();
//! assert_eq!(dom.text(heading, TextField::InnerText), Some("Paramètres"));
//! ```
//!
//! The engine is single-threaded: it is a plain value owned by the host and
//! listeners are not `Send`. Hosts that share it across threads wrap it in
//! their own lock.

mod config;
mod descriptor;
mod dom;
mod engine;
mod error;
mod events;
mod format;
mod memory;
mod mutation;
mod translation;

pub use config::{DEFAULT_LANG, I18nConfig, I18nOptions};
pub use descriptor::{DescriptorPatch, DescriptorUpdate, I18nDescriptor, TextField};
pub use dom::{
    DESCRIPTOR_ATTRIBUTE, I18nDom, OBSERVED_ATTRIBUTES, VALUES_ATTRIBUTE, is_observed_attribute,
};
pub use engine::I18n;
pub use error::I18nError;
pub use events::{EventKinds, I18nEvent, SubscriptionId};
pub use format::{Values, format_template};
pub use memory::{MemoryDom, NodeId};
pub use mutation::MutationRecord;
pub use translation::{Translation, TranslationRegistry};
