//! Enumeration of the tuples encoded by a diagram.
//!
//! The iterator walks the diagram depth-first with an explicit frame stack,
//! expanding each arc's value set one value at a time. Tuples come out with
//! the top variable first; their length equals the top level of the root.
//!
//! The number of tuples can be exponential in the depth (that is the point of
//! the encoding), so prefer [`SddManager::count_paths`] when only the
//! cardinality is needed.

use std::rc::Rc;

use crate::manager::SddManager;
use crate::reference::Sdd;
use crate::values::Value;
use crate::view::SddArc;

/// One level of the depth-first descent.
struct Frame<V: Value> {
    arcs: Rc<Vec<SddArc<V>>>,
    /// Current arc.
    arc: usize,
    /// Current value within the arc.
    value: usize,
    /// A child frame and one prefix value are on the stacks for the current
    /// `(arc, value)` pair.
    descended: bool,
}

impl<V: Value> Frame<V> {
    fn new(arcs: Rc<Vec<SddArc<V>>>) -> Self {
        Frame {
            arcs,
            arc: 0,
            value: 0,
            descended: false,
        }
    }

    fn advance(&mut self) {
        self.value += 1;
        if self.value == self.arcs[self.arc].values.len() {
            self.value = 0;
            self.arc += 1;
        }
    }
}

/// A restartable iterator over the tuples of a diagram.
///
/// Created by [`SddManager::paths`].
pub struct Paths<'a, V: Value> {
    mgr: &'a SddManager<V>,
    stack: Vec<Frame<V>>,
    prefix: Vec<V>,
    /// The root is `⊤`: one empty tuple remains to be emitted.
    emit_empty: bool,
}

impl<'a, V: Value> Paths<'a, V> {
    pub(crate) fn new(mgr: &'a SddManager<V>, root: &Sdd<V>) -> Self {
        let mut paths = Paths {
            mgr,
            stack: Vec::new(),
            prefix: Vec::new(),
            emit_empty: root.is_one(),
        };
        if let Sdd::Node { .. } = root {
            paths.stack.push(Frame::new(mgr.arcs(root)));
        }
        paths
    }
}

impl<V: Value> Iterator for Paths<'_, V> {
    type Item = Vec<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emit_empty {
            self.emit_empty = false;
            return Some(Vec::new());
        }

        loop {
            let top = self.stack.last_mut()?;

            if top.descended {
                // Back from the child of the current (arc, value) pair.
                top.descended = false;
                self.prefix.pop();
                top.advance();
                continue;
            }

            if top.arc == top.arcs.len() {
                self.stack.pop();
                continue;
            }

            let arc = &top.arcs[top.arc];
            let v = arc.values.as_slice()[top.value];
            let successor = arc.successor.clone();

            if successor.is_one() {
                let mut tuple = self.prefix.clone();
                tuple.push(v);
                top.advance();
                return Some(tuple);
            }

            debug_assert!(!successor.is_zero(), "reduced nodes have no ⊥ successor");
            top.descended = true;
            self.prefix.push(v);
            let child = Frame::new(self.mgr.arcs(&successor));
            self.stack.push(child);
        }
    }
}

impl<V: Value> SddManager<V> {
    /// Iterates over every tuple encoded by `x`, top variable first.
    pub fn paths<'a>(&'a self, x: &Sdd<V>) -> Paths<'a, V> {
        Paths::new(self, x)
    }
}
