// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The i18n engine.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use understory_timing::{Clock, Debouncer, RequestOutcome, SystemClock};

use crate::config::{DEFAULT_LANG, I18nConfig, I18nOptions};
use crate::descriptor::{DescriptorUpdate, I18nDescriptor, TextField};
use crate::dom::{DESCRIPTOR_ATTRIBUTE, I18nDom, VALUES_ATTRIBUTE, is_observed_attribute};
use crate::error::I18nError;
use crate::events::{EventKinds, I18nEvent, Listeners, SubscriptionId};
use crate::format::{Values, format_template};
use crate::mutation::MutationRecord;
use crate::translation::{Translation, TranslationRegistry};

/// Translation registry plus element bindings for one host.
///
/// `N` is the host's node handle and `C` the clock driving the refresh
/// debounce. The engine never owns host nodes: it keeps handles in its
/// observed-root list and descriptor side table, and drops any handle the
/// host reports as no longer alive during a refresh. Detached nodes keep
/// their entries; they are skipped by refreshes and resolved again once a
/// mutation record reports them attached.
///
/// Elements are bound in two independent ways, both resolved by
/// [`I18n::refresh`]:
///
/// - **Attributes**: elements carrying the marker class (default `i18n`)
///   inside an observed root are found by query on every pass, and their
///   `data-i18n*` attributes name the keys.
/// - **Descriptors**: elements registered with [`I18n::add_i18n_element`]
///   are kept in a side table until removed or disconnected.
///
/// When an element has both, the descriptor is written last.
#[derive(Debug)]
pub struct I18n<N, C = SystemClock> {
    config: I18nConfig,
    registry: TranslationRegistry,
    lang: String,
    default_lang: String,
    roots: Vec<N>,
    descriptors: HashMap<N, I18nDescriptor>,
    debounce: Debouncer,
    clock: C,
    listeners: Listeners,
}

impl<N, C> Default for I18n<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clock + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<N, C> I18n<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clock,
{
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_config(I18nConfig::default(), clock)
    }

    /// Creates an engine with `config`.
    #[must_use]
    pub fn with_config(config: I18nConfig, clock: C) -> Self {
        Self {
            debounce: Debouncer::new(config.debounce_ms),
            config,
            registry: TranslationRegistry::new(),
            lang: DEFAULT_LANG.to_owned(),
            default_lang: DEFAULT_LANG.to_owned(),
            roots: Vec::new(),
            descriptors: HashMap::new(),
            clock,
            listeners: Listeners::default(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// The clock driving the debounce.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Registered translation tables.
    #[must_use]
    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }

    /// Current language.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Fallback language.
    #[must_use]
    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    // -------------------------------------------------------------------------
    // Registry and languages
    // -------------------------------------------------------------------------

    /// Registers every table in `options`, then applies its language choices.
    pub fn set_options(&mut self, options: I18nOptions) {
        for translation in options.translations {
            self.add_translation(translation);
        }
        if let Some(lang) = options.default_lang {
            self.set_default_lang(lang);
        }
        if let Some(lang) = options.lang {
            self.set_lang(lang);
        }
    }

    /// Registers `translation`, replacing any table for the same language.
    ///
    /// A refresh is scheduled when the table can change displayed text, i.e.
    /// when it is the current or the fallback language.
    pub fn add_translation(&mut self, translation: Translation) {
        let lang = translation.lang.clone();
        let count = translation.strings.len();
        let replaced = self.registry.insert(translation).is_some();
        log::debug!("registered {count} strings for `{lang}` (replaced: {replaced})");
        let visible = lang == self.lang || lang == self.default_lang;
        self.listeners
            .emit(&I18nEvent::TranslationsUpdated { lang });
        if visible {
            self.request_refresh();
        }
    }

    /// Switches the current language. Returns `false` if it was already
    /// `lang`.
    pub fn set_lang(&mut self, lang: impl Into<String>) -> bool {
        let lang = lang.into();
        if lang == self.lang {
            return false;
        }
        let old = core::mem::replace(&mut self.lang, lang);
        log::debug!("language changed from `{old}` to `{}`", self.lang);
        self.listeners.emit(&I18nEvent::LangChanged {
            old,
            new: self.lang.clone(),
        });
        self.request_refresh();
        true
    }

    /// Switches the fallback language. Returns `false` if it was already
    /// `lang`.
    pub fn set_default_lang(&mut self, lang: impl Into<String>) -> bool {
        let lang = lang.into();
        if lang == self.default_lang {
            return false;
        }
        let old = core::mem::replace(&mut self.default_lang, lang);
        log::debug!("fallback language changed from `{old}` to `{}`", self.default_lang);
        self.listeners.emit(&I18nEvent::DefaultLangChanged {
            old,
            new: self.default_lang.clone(),
        });
        self.request_refresh();
        true
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolves `key` in the current language, then the fallback language.
    ///
    /// A key found in neither is logged as a warning and returned as is, so
    /// the caller always has something to display.
    pub fn get_string<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(s) = self.registry.lookup(&self.lang, key) {
            return s;
        }
        if let Some(s) = self.registry.lookup(&self.default_lang, key) {
            return s;
        }
        log::warn!(
            target: "understory_i18n",
            "no translation for `{key}` in `{}` or fallback `{}`",
            self.lang,
            self.default_lang
        );
        key
    }

    /// Resolves `key` and substitutes `${name}` placeholders from `values`.
    ///
    /// See [`format_template`] for the substitution rules.
    pub fn format_string(&self, key: &str, values: &Values) -> String {
        format_template(self.get_string(key), values)
    }

    // -------------------------------------------------------------------------
    // Roots and descriptors
    // -------------------------------------------------------------------------

    /// Adds `root` to the observed roots. Returns `false` if it already was.
    ///
    /// A newly observed root gets a refresh scheduled so that its existing
    /// content is resolved.
    pub fn observe_element(&mut self, root: N) -> bool {
        if self.roots.contains(&root) {
            return false;
        }
        log::trace!("observing {root:?}");
        self.roots.push(root);
        self.request_refresh();
        true
    }

    /// Removes `root` from the observed roots.
    pub fn unobserve_element(&mut self, root: N) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| *r != root);
        self.roots.len() != before
    }

    /// Observed roots, in registration order.
    #[must_use]
    pub fn observed_roots(&self) -> &[N] {
        &self.roots
    }

    /// Observes `root` and schedules a refresh.
    pub fn start(&mut self, root: N) {
        if !self.observe_element(root) {
            self.request_refresh();
        }
    }

    /// Creates, merges or removes the descriptor of `node`, then schedules a
    /// refresh.
    ///
    /// Accepts a [`DescriptorPatch`](crate::DescriptorPatch), a key (binds
    /// the inner text), or `None::<DescriptorPatch>` to remove the entry.
    pub fn add_i18n_element(&mut self, node: N, update: impl Into<DescriptorUpdate>) {
        let update = update.into();
        let mut slot = self.descriptors.remove(&node);
        update.apply_to(&mut slot);
        if let Some(descriptor) = slot {
            self.descriptors.insert(node, descriptor);
        }
        self.request_refresh();
    }

    /// The descriptor registered for `node`.
    #[must_use]
    pub fn descriptor(&self, node: N) -> Option<&I18nDescriptor> {
        self.descriptors.get(&node)
    }

    /// Drops everything the engine holds for `node`, without scheduling.
    ///
    /// Hosts whose handles cannot report liveness call this when a node is
    /// destroyed; otherwise the next refresh prunes it.
    pub fn forget_element(&mut self, node: N) -> bool {
        let had_descriptor = self.descriptors.remove(&node).is_some();
        self.unobserve_element(node) || had_descriptor
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    /// Requests a full refresh after the debounce delay.
    ///
    /// Requests made while one is pending are coalesced into it; requests
    /// made while a refresh is running are dropped.
    pub fn request_refresh(&mut self) -> RequestOutcome {
        let outcome = self.debounce.request(self.clock.now_ms());
        log::trace!("refresh requested: {outcome:?}");
        outcome
    }

    /// When the pending refresh is due, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.debounce.deadline()
    }

    /// Returns `true` while a refresh is pending.
    #[must_use]
    pub fn is_refresh_pending(&self) -> bool {
        self.debounce.deadline().is_some()
    }

    /// Runs the pending refresh if its deadline has passed.
    ///
    /// Returns whether a refresh ran.
    pub fn poll<D>(&mut self, dom: &mut D) -> Result<bool, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        if !self.debounce.begin(self.clock.now_ms()) {
            return Ok(false);
        }
        self.run_refresh(dom).map(|_| true)
    }

    /// Resolves every binding now, absorbing any pending request.
    ///
    /// Returns the number of elements written. A refresh requested while
    /// another is running does nothing and returns `0`.
    ///
    /// Malformed JSON in a structured attribute aborts the pass and is
    /// returned; elements resolved before it keep their new text.
    pub fn refresh<D>(&mut self, dom: &mut D) -> Result<usize, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        if !self.debounce.begin_now() {
            log::debug!("refresh already running; request dropped");
            return Ok(0);
        }
        self.run_refresh(dom)
    }

    fn run_refresh<D>(&mut self, dom: &mut D) -> Result<usize, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        let result = self.refresh_pass(dom);
        self.debounce.finish();
        let nodes = result?;
        log::debug!("refreshed {nodes} elements in `{}`", self.lang);
        self.listeners.emit(&I18nEvent::Refreshed { nodes });
        Ok(nodes)
    }

    fn refresh_pass<D>(&mut self, dom: &mut D) -> Result<usize, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        self.roots.retain(|root| dom.is_alive(*root));
        self.descriptors.retain(|node, _| dom.is_alive(*node));

        let mut written = HashSet::new();
        let mut found = Vec::new();
        for &root in &self.roots {
            if !dom.is_connected(root) {
                continue;
            }
            found.clear();
            dom.query_class(root, &self.config.class_name, &mut found);
            for &node in &found {
                if self.resolve_attributes(dom, node)? {
                    written.insert(node);
                }
            }
        }
        for (&node, descriptor) in &self.descriptors {
            if !dom.is_connected(node) {
                continue;
            }
            if self.write_descriptor(dom, node, descriptor) {
                written.insert(node);
            }
        }
        Ok(written.len())
    }

    // -------------------------------------------------------------------------
    // Incremental resolution
    // -------------------------------------------------------------------------

    /// Resolves the attribute and descriptor bindings of one node.
    ///
    /// Returns whether anything was written.
    pub fn resolve_node<D>(&self, dom: &mut D, node: N) -> Result<bool, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        let mut wrote = false;
        if dom.is_element(node) && dom.has_class(node, &self.config.class_name) {
            wrote |= self.resolve_attributes(dom, node)?;
        }
        if let Some(descriptor) = self.descriptors.get(&node) {
            wrote |= self.write_descriptor(dom, node, descriptor);
        }
        Ok(wrote)
    }

    /// Handles one batch of observer records for `root`.
    ///
    /// Added elements are resolved together with their marker-class
    /// descendants and any descendants holding a descriptor; elements whose
    /// binding attributes changed are resolved again. Records for roots that are not observed are ignored. Returns
    /// the number of elements written.
    pub fn on_mutations<D>(
        &self,
        dom: &mut D,
        root: N,
        records: &[MutationRecord<N>],
    ) -> Result<usize, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        if !self.roots.contains(&root) {
            log::trace!("ignoring {} records for unobserved {root:?}", records.len());
            return Ok(0);
        }
        let mut targets = Vec::new();
        let mut seen = HashSet::new();
        let mut subtrees = HashSet::new();
        for record in records {
            match record {
                MutationRecord::ChildList { added } => {
                    for &node in added {
                        if !dom.is_element(node) {
                            continue;
                        }
                        subtrees.insert(node);
                        if seen.insert(node) {
                            targets.push(node);
                        }
                        let start = targets.len();
                        dom.query_class(node, &self.config.class_name, &mut targets);
                        let mut i = start;
                        while i < targets.len() {
                            if seen.insert(targets[i]) {
                                i += 1;
                            } else {
                                targets.remove(i);
                            }
                        }
                    }
                }
                MutationRecord::Attribute { target, name } => {
                    if is_observed_attribute(name) && seen.insert(*target) {
                        targets.push(*target);
                    }
                }
            }
        }
        if !subtrees.is_empty() {
            for &node in self.descriptors.keys() {
                if !seen.contains(&node) && within_any(dom, node, &subtrees) {
                    seen.insert(node);
                    targets.push(node);
                }
            }
        }
        let mut written = 0;
        for node in targets {
            if self.resolve_node(dom, node)? {
                written += 1;
            }
        }
        Ok(written)
    }

    fn resolve_attributes<D>(&self, dom: &mut D, node: N) -> Result<bool, I18nError>
    where
        D: I18nDom<Node = N>,
    {
        match attribute_descriptor(dom, node)? {
            Some(descriptor) => Ok(self.write_descriptor(dom, node, &descriptor)),
            None => Ok(false),
        }
    }

    fn write_descriptor<D>(&self, dom: &mut D, node: N, descriptor: &I18nDescriptor) -> bool
    where
        D: I18nDom<Node = N>,
    {
        let mut wrote = false;
        for (field, key) in descriptor.bindings() {
            let text = self.format_string(key, &descriptor.values);
            log::trace!("{node:?}.{field:?} <- `{key}`");
            dom.set_text(node, field, &text);
            wrote = true;
        }
        wrote
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Calls `listener` for every event whose kind is in `kinds`.
    pub fn subscribe(
        &mut self,
        kinds: EventKinds,
        listener: impl FnMut(&I18nEvent) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(kinds, Box::new(listener))
    }

    /// Removes a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

/// Returns `true` if `node` or one of its ancestors is in `tops`.
fn within_any<D: I18nDom>(dom: &D, node: D::Node, tops: &HashSet<D::Node>) -> bool {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if tops.contains(&n) {
            return true;
        }
        cur = dom.parent(n);
    }
    false
}

/// Reads the attribute bindings of a marker-class element.
///
/// Individual `data-i18n*` attributes are read first; a `data-i18n-json`
/// descriptor is then applied on top of them. Returns `None` when nothing is
/// bound.
fn attribute_descriptor<D: I18nDom>(
    dom: &D,
    node: D::Node,
) -> Result<Option<I18nDescriptor>, I18nError> {
    let mut descriptor = I18nDescriptor::default();
    for field in TextField::ALL {
        if let Some(key) = dom.attribute(node, field.binding_attribute()) {
            descriptor.set_field(field, Some(key.to_owned()));
        }
    }
    if let Some(json) = dom.attribute(node, VALUES_ATTRIBUTE) {
        descriptor.values =
            serde_json::from_str(json).map_err(|source| I18nError::MalformedJson {
                attribute: VALUES_ATTRIBUTE,
                source,
            })?;
    }
    if let Some(json) = dom.attribute(node, DESCRIPTOR_ATTRIBUTE) {
        match DescriptorUpdate::from_json(DESCRIPTOR_ATTRIBUTE, json)? {
            DescriptorUpdate::Patch(patch) => descriptor.apply(&patch),
            DescriptorUpdate::Key(key) => descriptor.inner_text = Some(key),
            DescriptorUpdate::Remove => {}
        }
    }
    Ok((!descriptor.is_unbound()).then_some(descriptor))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use understory_timing::{ManualClock, RequestOutcome};

    use super::I18n;
    use crate::config::I18nOptions;
    use crate::descriptor::{DescriptorPatch, TextField};
    use crate::dom::I18nDom;
    use crate::error::I18nError;
    use crate::events::{EventKinds, I18nEvent};
    use crate::format::Values;
    use crate::memory::{MemoryDom, NodeId};
    use crate::mutation::MutationRecord;
    use crate::translation::Translation;

    fn engine() -> (I18n<NodeId, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut i18n = I18n::new(clock.clone());
        i18n.set_options(
            I18nOptions::with_translations([
                Translation::new("en")
                    .with_string("hello", "Hello")
                    .with_string("greeting", "Hello ${name}")
                    .with_string("only.en", "English only"),
                Translation::new("fr")
                    .with_string("hello", "Bonjour")
                    .with_string("greeting", "Bonjour ${name}"),
            ])
            .lang("en")
            .default_lang("en"),
        );
        (i18n, clock)
    }

    fn bound(dom: &mut MemoryDom, attrs: &[(&str, &str)]) -> NodeId {
        let el = dom.create_element("span");
        dom.set_attribute(el, "class", "i18n");
        for (name, value) in attrs {
            dom.set_attribute(el, name, *value);
        }
        el
    }

    #[test]
    fn lookup_falls_back_then_echoes_key() {
        let (mut i18n, _) = engine();
        i18n.set_lang("fr");
        assert_eq!(i18n.get_string("hello"), "Bonjour");
        assert_eq!(i18n.get_string("only.en"), "English only");
        assert_eq!(i18n.get_string("missing.key"), "missing.key");
    }

    #[test]
    fn format_uses_current_language() {
        let (mut i18n, _) = engine();
        let mut values = Values::new();
        values.insert("name".into(), json!("Ada"));
        assert_eq!(i18n.format_string("greeting", &values), "Hello Ada");
        i18n.set_lang("fr");
        assert_eq!(i18n.format_string("greeting", &values), "Bonjour Ada");
        assert_eq!(i18n.format_string("greeting", &Values::new()), "Bonjour ${name}");
    }

    #[test]
    fn same_language_is_a_no_op() {
        let (mut i18n, clock) = engine();
        let mut dom = MemoryDom::new();
        clock.advance(1_000);
        i18n.refresh(&mut dom).unwrap();
        assert!(!i18n.set_lang("en"));
        assert!(!i18n.set_default_lang("en"));
        assert!(!i18n.is_refresh_pending());
        assert!(i18n.set_lang("fr"));
        assert_eq!(i18n.next_deadline(), Some(1_100));
    }

    #[test]
    fn refresh_resolves_attribute_bindings() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        let el = bound(
            &mut dom,
            &[
                ("data-i18n", "greeting"),
                ("data-i18n-title", "hello"),
                ("data-i18n-values", r#"{ "name": "Ada" }"#),
            ],
        );
        let plain = dom.create_element("span");
        dom.set_attribute(plain, "data-i18n", "hello");
        dom.append_child(doc, el);
        dom.append_child(doc, plain);
        i18n.start(doc);

        assert_eq!(i18n.refresh(&mut dom).unwrap(), 1);
        assert_eq!(dom.text(el, TextField::InnerText), Some("Hello Ada"));
        assert_eq!(dom.text(el, TextField::Title), Some("Hello"));
        assert_eq!(dom.text(plain, TextField::InnerText), None);
    }

    #[test]
    fn json_descriptor_overrides_attributes() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        let el = bound(
            &mut dom,
            &[
                ("data-i18n", "hello"),
                ("data-i18n-placeholder", "hello"),
                (
                    "data-i18n-json",
                    r#"{ "innerText": "greeting", "placeholder": null, "values": { "name": "Bo" } }"#,
                ),
            ],
        );
        dom.append_child(doc, el);
        i18n.start(doc);
        i18n.refresh(&mut dom).unwrap();
        assert_eq!(dom.text(el, TextField::InnerText), Some("Hello Bo"));
        assert_eq!(dom.text(el, TextField::Placeholder), None);
    }

    #[test]
    fn malformed_json_propagates_and_resets_state() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        let el = bound(&mut dom, &[("data-i18n-json", "{ not json")]);
        dom.append_child(doc, el);
        i18n.start(doc);

        let err = i18n.refresh(&mut dom).unwrap_err();
        assert!(matches!(err, I18nError::MalformedJson { attribute: "data-i18n-json", .. }));
        // The failed pass does not wedge the scheduler.
        assert_eq!(i18n.request_refresh(), RequestOutcome::Armed);

        dom.set_attribute(el, "data-i18n-values", "[1]");
        dom.remove_attribute(el, "data-i18n-json");
        let err = i18n.resolve_node(&mut dom, el).unwrap_err();
        assert!(matches!(err, I18nError::MalformedJson { attribute: "data-i18n-values", .. }));
    }

    #[test]
    fn descriptors_merge_and_resolve() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        let input = dom.create_element("input");
        dom.append_child(doc, input);

        i18n.add_i18n_element(input, "hello");
        i18n.add_i18n_element(
            input,
            DescriptorPatch::new()
                .bind(TextField::Placeholder, "greeting")
                .value("name", "Cy"),
        );
        assert_eq!(i18n.refresh(&mut dom).unwrap(), 1);
        assert_eq!(dom.text(input, TextField::InnerText), Some("Hello"));
        assert_eq!(dom.text(input, TextField::Placeholder), Some("Hello Cy"));

        i18n.add_i18n_element(input, DescriptorPatch::new().clear(TextField::InnerText));
        let d = i18n.descriptor(input).unwrap();
        assert_eq!(d.field(TextField::InnerText), None);
        assert_eq!(d.field(TextField::Placeholder), Some("greeting"));

        i18n.add_i18n_element(input, None::<DescriptorPatch>);
        assert!(i18n.descriptor(input).is_none());
    }

    #[test]
    fn refresh_prunes_destroyed_nodes() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        let host = dom.create_element("div");
        dom.append_child(doc, host);
        let shadow = dom.attach_shadow(host).unwrap();
        let el = dom.create_element("p");
        dom.append_child(doc, el);

        i18n.observe_element(doc);
        i18n.observe_element(shadow);
        i18n.add_i18n_element(el, "hello");
        assert_eq!(i18n.refresh(&mut dom).unwrap(), 1);

        dom.destroy(el);
        dom.remove(host);
        assert_eq!(i18n.refresh(&mut dom).unwrap(), 0);
        assert!(i18n.descriptor(el).is_none());
        // A detached shadow tree is still alive and stays observed.
        assert_eq!(i18n.observed_roots(), [doc, shadow]);

        dom.destroy(host);
        i18n.refresh(&mut dom).unwrap();
        assert_eq!(i18n.observed_roots(), [doc]);
    }

    #[test]
    fn detached_descriptors_survive_until_attached() {
        let (mut i18n, clock) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        i18n.observe_element(doc);
        let panel = dom.create_element("section");
        let label = dom.create_element("label");
        dom.append_child(panel, label);
        i18n.add_i18n_element(label, "hello");

        clock.advance(100);
        assert!(i18n.poll(&mut dom).unwrap());
        assert!(i18n.descriptor(label).is_some());
        assert_eq!(dom.text(label, TextField::InnerText), None);

        dom.append_child(doc, panel);
        let records = dom.take_records_for(doc);
        assert_eq!(i18n.on_mutations(&mut dom, doc, &records).unwrap(), 1);
        assert_eq!(dom.text(label, TextField::InnerText), Some("Hello"));

        // Moving the panel out and back keeps the binding.
        dom.remove(panel);
        i18n.set_lang("fr");
        clock.advance(100);
        assert!(i18n.poll(&mut dom).unwrap());
        assert!(i18n.descriptor(label).is_some());
        dom.append_child(doc, panel);
        let records = dom.take_records_for(doc);
        i18n.on_mutations(&mut dom, doc, &records).unwrap();
        assert_eq!(dom.text(label, TextField::InnerText), Some("Bonjour"));
    }

    #[test]
    fn mutations_resolve_added_subtrees_and_attribute_changes() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        i18n.observe_element(doc);
        i18n.refresh(&mut dom).unwrap();

        let wrapper = dom.create_element("section");
        let inner = bound(&mut dom, &[("data-i18n", "hello")]);
        dom.append_child(wrapper, inner);
        let text = dom.create_text("raw");
        dom.append_child(doc, wrapper);
        dom.append_child(doc, text);

        let records = dom.take_records_for(doc);
        assert_eq!(i18n.on_mutations(&mut dom, doc, &records).unwrap(), 1);
        assert_eq!(dom.text(inner, TextField::InnerText), Some("Hello"));

        dom.set_attribute(inner, "data-i18n", "greeting");
        dom.set_attribute(inner, "data-unrelated", "x");
        let records = dom.take_records_for(doc);
        assert_eq!(records.len(), 2);
        assert_eq!(i18n.on_mutations(&mut dom, doc, &records).unwrap(), 1);
        assert_eq!(dom.text(inner, TextField::InnerText), Some("Hello ${name}"));

        // Mutations are resolved synchronously; nothing was scheduled.
        assert!(!i18n.is_refresh_pending());
    }

    #[test]
    fn mutations_for_unobserved_roots_are_ignored() {
        let (i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let el = bound(&mut dom, &[("data-i18n", "hello")]);
        let doc = dom.document();
        let records = [MutationRecord::added(el)];
        assert_eq!(i18n.on_mutations(&mut dom, doc, &records).unwrap(), 0);
        assert!(!dom.is_connected(el));
    }

    #[test]
    fn events_reach_matching_subscribers() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = i18n.subscribe(EventKinds::all(), move |e| sink.borrow_mut().push(e.clone()));

        i18n.set_lang("fr");
        i18n.add_translation(Translation::new("de"));
        i18n.refresh(&mut dom).unwrap();
        assert!(i18n.unsubscribe(id));
        i18n.set_lang("de");

        assert_eq!(
            *seen.borrow(),
            [
                I18nEvent::LangChanged {
                    old: "en".into(),
                    new: "fr".into()
                },
                I18nEvent::TranslationsUpdated { lang: "de".into() },
                I18nEvent::Refreshed { nodes: 0 },
            ]
        );
    }

    #[test]
    fn unrelated_translation_does_not_schedule() {
        let (mut i18n, clock) = engine();
        let mut dom = MemoryDom::new();
        clock.advance(500);
        i18n.refresh(&mut dom).unwrap();
        i18n.add_translation(Translation::new("de").with_string("hello", "Hallo"));
        assert!(!i18n.is_refresh_pending());
        i18n.add_translation(Translation::new("en").with_string("hello", "Hi"));
        assert!(i18n.is_refresh_pending());
    }

    #[test]
    fn start_schedules_for_new_and_known_roots() {
        let (mut i18n, clock) = engine();
        let mut dom = MemoryDom::new();
        let doc = dom.document();
        clock.advance(500);
        i18n.refresh(&mut dom).unwrap();

        i18n.start(doc);
        assert_eq!(i18n.observed_roots(), [doc]);
        assert_eq!(i18n.next_deadline(), Some(600));

        i18n.refresh(&mut dom).unwrap();
        assert!(!i18n.is_refresh_pending());
        i18n.start(doc);
        assert_eq!(i18n.observed_roots(), [doc]);
        assert_eq!(i18n.next_deadline(), Some(600));
    }

    #[test]
    fn forget_element_drops_bindings() {
        let (mut i18n, _) = engine();
        let mut dom = MemoryDom::new();
        let el = dom.create_element("p");
        i18n.add_i18n_element(el, "hello");
        assert!(i18n.forget_element(el));
        assert!(!i18n.forget_element(el));
        assert!(i18n.descriptor(el).is_none());
    }
}
