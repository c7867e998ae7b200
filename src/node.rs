//! Prototype arcs and prototype nodes: the shared half of the encoding.

use std::hash::Hash;

use crate::reference::Sdd;
use crate::stack::Stack;
use crate::values::{Value, ValueSet};

/// One arc of a prototype node.
///
/// `current` holds the values of the top level shifted by the arc's
/// displacement; `values` and `successors` carry the per-level deltas relative
/// to the environment of the node, one entry per level with the current level
/// on top. Both stacks have length equal to the level of the arc's
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtoArc<V: Value> {
    pub current: ValueSet<V>,
    pub values: Stack<V>,
    pub successors: Stack<Sdd<V>>,
}

/// A non-terminal prototype node: an immutable, sorted vector of arcs.
///
/// Arcs are sorted by lexicographic `(current, values, successors)` and are
/// pairwise disjoint on `current`. Equality and hash are structural over the
/// arc vector; the unique table guarantees that two structurally equal
/// prototype nodes are the same allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ProtoNode<V: Value> {
    arcs: Box<[ProtoArc<V>]>,
}

impl<V: Value> ProtoNode<V> {
    /// Builds a prototype node from already-canonicalized arcs.
    ///
    /// The arcs must be sorted; `unify` is the only caller.
    pub(crate) fn new(arcs: Vec<ProtoArc<V>>) -> Self {
        debug_assert!(!arcs.is_empty(), "a prototype node has at least one arc");
        debug_assert!(arcs.windows(2).all(|w| w[0] <= w[1]), "arcs must be sorted");
        ProtoNode {
            arcs: arcs.into_boxed_slice(),
        }
    }

    /// The arcs, in canonical order.
    pub fn arcs(&self) -> &[ProtoArc<V>] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}
