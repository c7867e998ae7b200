//! Arc-view reconstruction: from `(env, proto)` back to concrete arcs.
//!
//! The algorithms of [`crate::ops`] never look at prototype arcs directly;
//! they iterate over the *concrete* arcs of a node at its top variable. This
//! module rebuilds those arcs on demand: each prototype arc's delta stacks are
//! rebuilt against the environment's stacks, the head of each rebuilt stack
//! yields the current level's displacement and successor, and the arc's
//! shifted values are translated back. Reconstruction is memoized per
//! `(env, proto)` identity, so repeated requests share one materialized
//! vector.

use std::rc::Rc;

use crate::env::Env;
use crate::manager::SddManager;
use crate::node::ProtoNode;
use crate::reference::Sdd;
use crate::values::{Value, ValueSet};

/// A concrete arc: a set of values at the current level and the successor
/// diagram one level down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SddArc<V: Value> {
    pub values: ValueSet<V>,
    pub successor: Sdd<V>,
}

/// Materializes the concrete arcs of `(env, proto)`.
///
/// Guarantee: for any builder `B` accepted by `unify`,
/// `materialize(unify(B)) == B` as multisets of `(values, successor)`.
pub(crate) fn materialize<V: Value>(
    mgr: &SddManager<V>,
    env: &Env<V>,
    proto: &Rc<ProtoNode<V>>,
) -> Vec<SddArc<V>> {
    debug_assert!(!env.level().is_terminal(), "view of a terminal environment");

    let mut arcs = Vec::with_capacity(proto.len());
    for proto_arc in proto.arcs() {
        // Rebuild the stacks needed to reconstruct this arc.
        let mut values_stack = proto_arc.values.clone();
        values_stack.rebuild(env.values(), |v, c| v.rebuild(*c));

        let mut succs_stack = proto_arc.successors.clone();
        succs_stack.rebuild(env.successors(), |s, c| {
            if c.is_zero() {
                s.clone()
            } else {
                c.clone()
            }
        });

        // The head elements belong to the current level: the displacement of
        // the arc's values and the successor handle. The successor carries its
        // own interned environment, which is exactly what popping the rebuilt
        // stacks one level down would produce.
        let k = *values_stack.head();
        let successor = succs_stack.head().clone();
        debug_assert!(!successor.is_zero(), "reduced nodes have no ⊥ successor");
        debug_assert_eq!(successor.top_level(), env.level().down());

        let values = mgr.values(proto_arc.current.iter().map(|v| v.rebuild(k)));
        arcs.push(SddArc { values, successor });
    }
    arcs
}
