// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory element tree implementing [`I18nDom`].
//!
//! [`MemoryDom`] is small enough to reason about in tests and complete enough
//! for headless hosts: it has a document, elements, text nodes and shadow
//! roots, generational handles that go stale when a node is destroyed, and a
//! mutation log shaped like the records a browser observer would deliver.

use smallvec::SmallVec;

use crate::descriptor::TextField;
use crate::dom::I18nDom;
use crate::mutation::MutationRecord;

/// Generational handle of a [`MemoryDom`] node.
///
/// Destroying a node frees its slot and bumps the slot's generation, so an
/// old handle never aliases a node created later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Document,
    ShadowRoot { host: NodeId },
    Element { tag: String },
    Text,
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    attributes: SmallVec<[(String, String); 4]>,
    fields: [Option<String>; 5],
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: SmallVec::new(),
            attributes: SmallVec::new(),
            fields: [const { None }; 5],
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

/// In-memory element tree with a mutation log.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    slots: Vec<Slot>,
    free: Vec<u32>,
    document: NodeId,
    records: Vec<(NodeId, MutationRecord<NodeId>)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates a tree containing only a document node.
    #[must_use]
    pub fn new() -> Self {
        let mut dom = Self {
            slots: Vec::new(),
            free: Vec::new(),
            document: NodeId(0, 0),
            records: Vec::new(),
        };
        dom.document = dom.alloc(NodeKind::Document);
        dom
    }

    /// The document node; always connected.
    #[must_use]
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element { tag: tag.into() })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeKind::Text);
        if let Some(node) = self.node_mut(id) {
            node.fields[TextField::InnerText.index()] = Some(text.into());
        }
        id
    }

    /// Attaches a shadow root to `host`.
    ///
    /// The root is connected whenever its host is. Returns `None` if `host`
    /// is not a live element.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        if !self.is_element(host) {
            return None;
        }
        Some(self.alloc(NodeKind::ShadowRoot { host }))
    }

    /// Tag name of an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    /// Children of `id`, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |node| node.children.as_slice())
    }

    /// Last value written into `field` of `id` (for text nodes, `InnerText`
    /// is the node's data).
    #[must_use]
    pub fn text(&self, id: NodeId, field: TextField) -> Option<&str> {
        self.node(id)?.fields[field.index()].as_deref()
    }

    /// Appends `child` to `parent`, detaching it from its old parent first.
    ///
    /// Returns `false` (and changes nothing) if either node is dead, `child`
    /// is a document or shadow root, or `child` is `parent` or one of its
    /// ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(child_node) = self.node(child) else {
            return false;
        };
        if matches!(child_node.kind, NodeKind::Document | NodeKind::ShadowRoot { .. })
            || !self.is_alive(parent)
            || self.is_inclusive_ancestor(child, parent)
        {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        self.record(parent, MutationRecord::added(child));
        true
    }

    /// Detaches `id` from its parent. The node stays alive.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Detaches `id` and frees it together with its subtree and any shadow
    /// root it hosts. Handles to freed nodes go stale.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.document {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.slots[next.idx()].node.take() else {
                continue;
            };
            stack.extend(node.children);
            stack.extend(self.shadow_roots_of(next));
            let slot = &mut self.slots[next.idx()];
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(next.0);
        }
    }

    /// Sets attribute `name`; records a mutation if the value changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(node) = self.node_mut(id) else {
            return;
        };
        match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, old)) if *old == value => return,
            Some((_, old)) => *old = value,
            None => node.attributes.push((name.to_owned(), value)),
        }
        self.record(id, MutationRecord::attribute(id, name));
    }

    /// Removes attribute `name`; records a mutation if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let before = node.attributes.len();
        node.attributes.retain(|(n, _)| n != name);
        if node.attributes.len() != before {
            self.record(id, MutationRecord::attribute(id, name));
        }
    }

    /// Drains the mutation log.
    ///
    /// Each record is paired with the tree root (document or shadow root)
    /// it happened under, which is what a per-root observer would see.
    /// Changes inside detached subtrees are not logged.
    pub fn take_records(&mut self) -> Vec<(NodeId, MutationRecord<NodeId>)> {
        core::mem::take(&mut self.records)
    }

    /// Drains the mutation log, keeping only records under `root`.
    pub fn take_records_for(&mut self, root: NodeId) -> Vec<MutationRecord<NodeId>> {
        self.take_records()
            .into_iter()
            .filter(|(r, _)| *r == root)
            .map(|(_, record)| record)
            .collect()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData::new(kind);
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.node = Some(data);
            NodeId(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                node: Some(data),
            });
            NodeId(idx, 0)
        }
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }

    fn shadow_roots_of(&self, host: NodeId) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot.node.as_ref()?.kind {
                NodeKind::ShadowRoot { host: h } if h == host => {
                    Some(NodeId(u32::try_from(idx).ok()?, slot.generation))
                }
                _ => None,
            })
            .collect()
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != id);
        }
    }

    /// Returns `true` if `ancestor` is `id` or one of its parents, stepping
    /// from shadow roots to their hosts.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            let Some(node) = self.node(id) else {
                return false;
            };
            match (&node.kind, node.parent) {
                (_, Some(parent)) => id = parent,
                (NodeKind::ShadowRoot { host }, None) => id = *host,
                (_, None) => return false,
            }
        }
    }

    /// The topmost parent of `id` within its own tree.
    fn tree_root(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    fn record(&mut self, at: NodeId, record: MutationRecord<NodeId>) {
        let root = self.tree_root(at);
        if matches!(
            self.node(root).map(|n| &n.kind),
            Some(NodeKind::Document | NodeKind::ShadowRoot { .. })
        ) {
            self.records.push((root, record));
        }
    }

    fn collect_class(&self, id: NodeId, class: &str, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            if self.is_element(child) && self.has_class(child, class) {
                out.push(child);
            }
            self.collect_class(child, class, out);
        }
    }
}

impl I18nDom for MemoryDom {
    type Node = NodeId;

    fn is_alive(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn is_connected(&self, mut node: NodeId) -> bool {
        loop {
            let Some(data) = self.node(node) else {
                return false;
            };
            match (&data.kind, data.parent) {
                (NodeKind::Document, _) => return true,
                (NodeKind::ShadowRoot { host }, _) => node = *host,
                (_, Some(parent)) => node = parent,
                (_, None) => return false,
            }
        }
    }

    fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.node(node).map(|n| &n.kind),
            Some(NodeKind::Element { .. })
        )
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn query_class(&self, root: NodeId, class: &str, out: &mut Vec<NodeId>) {
        self.collect_class(root, class, out);
    }

    fn set_text(&mut self, node: NodeId, field: TextField, text: &str) {
        if let Some(data) = self.node_mut(node) {
            data.fields[field.index()] = Some(text.to_owned());
        }
    }
}
