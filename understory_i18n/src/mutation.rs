// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

/// One change reported by the host's mutation observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationRecord<N> {
    /// Nodes were inserted somewhere in an observed subtree.
    ChildList {
        /// The inserted nodes (any kind; non-elements are skipped).
        added: SmallVec<[N; 2]>,
    },
    /// An attribute of `target` changed.
    Attribute {
        /// The element whose attribute changed.
        target: N,
        /// The attribute name.
        name: String,
    },
}

impl<N> MutationRecord<N> {
    /// A child-list record for a single inserted node.
    #[must_use]
    pub fn added(node: N) -> Self {
        let mut added = SmallVec::new();
        added.push(node);
        Self::ChildList { added }
    }

    /// An attribute record.
    #[must_use]
    pub fn attribute(target: N, name: impl Into<String>) -> Self {
        Self::Attribute {
            target,
            name: name.into(),
        }
    }
}
