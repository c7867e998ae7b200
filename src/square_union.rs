//! The square union: merging arcs that share a successor.

use std::collections::BTreeMap;

use crate::manager::SddManager;
use crate::reference::Sdd;
use crate::values::{Value, ValueSet};

/// Accumulates `successor → value set` pairs and groups them by successor.
///
/// After any number of [`SquareUnion::add`] calls, [`SquareUnion::into_arcs`]
/// yields one arc per distinct successor whose value set is the union of all
/// values added for it. The set operations arrange that values are already
/// disjoint per successor, so grouping is all that is needed here. Arcs with
/// an empty value set or a `⊥` successor are elided on the way in (the
/// reduction invariant).
pub struct SquareUnion<V: Value> {
    map: BTreeMap<Sdd<V>, ValueSet<V>>,
}

impl<V: Value> SquareUnion<V> {
    pub fn new() -> Self {
        SquareUnion {
            map: BTreeMap::new(),
        }
    }

    /// Adds `values` to the arc leading to `successor`.
    pub fn add(&mut self, mgr: &SddManager<V>, successor: Sdd<V>, values: ValueSet<V>) {
        if successor.is_zero() || values.is_empty() {
            return;
        }
        match self.map.remove(&successor) {
            Some(existing) => {
                let merged = mgr.values_union(&existing, &values);
                self.map.insert(successor, merged);
            }
            None => {
                self.map.insert(successor, values);
            }
        }
    }

    /// True when no arc survived reduction.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The accumulated `(values, successor)` arcs.
    pub fn into_arcs(self) -> Vec<(ValueSet<V>, Sdd<V>)> {
        self.map.into_iter().map(|(succ, vals)| (vals, succ)).collect()
    }
}

impl<V: Value> Default for SquareUnion<V> {
    fn default() -> Self {
        SquareUnion::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::SddManager;

    #[test]
    fn test_groups_by_successor() {
        let mgr = SddManager::<u32>::new();
        let s = mgr.node(1, mgr.values([0u32]), &mgr.one()).unwrap();

        let mut su = SquareUnion::new();
        su.add(&mgr, s.clone(), mgr.values([0u32]));
        su.add(&mgr, s.clone(), mgr.values([2u32]));

        let arcs = su.into_arcs();
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].0, mgr.values([0u32, 2]));
        assert_eq!(arcs[0].1, s);
    }

    #[test]
    fn test_elides_zero_successor_and_empty_values() {
        let mgr = SddManager::<u32>::new();
        let s = mgr.node(1, mgr.values([0u32]), &mgr.one()).unwrap();

        let mut su = SquareUnion::new();
        su.add(&mgr, mgr.zero(), mgr.values([0u32]));
        su.add(&mgr, s, mgr.values::<[u32; 0]>([]));
        assert!(su.is_empty());
    }

    #[test]
    fn test_distinct_successors_stay_apart() {
        let mgr = SddManager::<u32>::new();
        let s1 = mgr.node(1, mgr.values([0u32]), &mgr.one()).unwrap();
        let s2 = mgr.node(1, mgr.values([1u32]), &mgr.one()).unwrap();

        let mut su = SquareUnion::new();
        su.add(&mgr, s1, mgr.values([0u32]));
        su.add(&mgr, s2, mgr.values([1u32]));
        assert_eq!(su.into_arcs().len(), 2);
    }
}
