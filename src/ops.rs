//! The recursive set-algebraic operations: union, intersection, difference.
//!
//! All three share the same outer shape: dispatch on the handle tags, verify
//! that both operands live at the same level, consult the operation's cache,
//! then descend cooperatively through the materialized arc views of both
//! operands, combining value sets at the current level and recursing on the
//! successors. Results are assembled through the square union and re-interned,
//! so every intermediate node is canonical.
//!
//! # Failure semantics
//!
//! A single error kind, [`Error::IncompatibleLevels`], propagates unchanged
//! out of any recursive step. Nothing is inserted into the caches on a
//! failing path, and the unique tables stay consistent: every intermediate
//! interning either committed or never happened.

use log::debug;

use crate::error::Error;
use crate::manager::SddManager;
use crate::reference::Sdd;
use crate::square_union::SquareUnion;
use crate::types::Level;
use crate::values::Value;

/// Normalizes the key of a commutative binary step.
fn commutative_key<V: Value>(x: &Sdd<V>, y: &Sdd<V>) -> (Sdd<V>, Sdd<V>) {
    if x <= y {
        (x.clone(), y.clone())
    } else {
        (y.clone(), x.clone())
    }
}

impl<V: Value> SddManager<V> {
    /// Verifies the "top" condition: both operands are nodes at one level.
    ///
    /// Callers dispatch the terminal cases first, so any terminal reaching
    /// this point is incompatible with its peer.
    fn same_level(&self, x: &Sdd<V>, y: &Sdd<V>) -> Result<Level, Error> {
        match (x, y) {
            (Sdd::Node { env: ex, .. }, Sdd::Node { env: ey, .. })
                if ex.level() == ey.level() =>
            {
                Ok(ex.level())
            }
            _ => Err(Error::IncompatibleLevels {
                lhs: x.top_level(),
                rhs: y.top_level(),
            }),
        }
    }

    // ========================================================================
    // Union
    // ========================================================================

    /// The n-ary union of `operands`.
    ///
    /// Operands are deduplicated and sorted by handle identity, then folded
    /// left-to-right. An empty operand set yields `⊥`.
    pub fn union(&self, operands: &[Sdd<V>]) -> Result<Sdd<V>, Error> {
        let mut operands = operands.to_vec();
        operands.sort_unstable();
        operands.dedup();

        let mut acc = Sdd::Zero;
        for operand in &operands {
            acc = self.union2(&acc, operand)?;
        }
        Ok(acc)
    }

    fn union2(&self, x: &Sdd<V>, y: &Sdd<V>) -> Result<Sdd<V>, Error> {
        // Base cases: x ∪ x = x, ⊥ ∪ y = y, ⊤ ∪ ⊤ = ⊤.
        if x == y {
            return Ok(x.clone());
        }
        if x.is_zero() {
            return Ok(y.clone());
        }
        if y.is_zero() {
            return Ok(x.clone());
        }
        let level = self.same_level(x, y)?;

        let key = commutative_key(x, y);
        if let Some(result) = self.union_cache.get(&key) {
            debug!("cache: union({}, {}) -> {}", x, y, result);
            return Ok(result);
        }

        let lhs = self.arcs(x);
        let rhs = self.arcs(y);
        let mut su = SquareUnion::new();

        // The value space of each side, to extract the one-sided residues.
        let mut rhs_covered = self.values(std::iter::empty());
        for arc in rhs.iter() {
            rhs_covered = self.values_union(&rhs_covered, &arc.values);
        }
        let mut lhs_covered = self.values(std::iter::empty());
        for arc in lhs.iter() {
            lhs_covered = self.values_union(&lhs_covered, &arc.values);
        }

        for a in lhs.iter() {
            for b in rhs.iter() {
                let overlap = self.values_intersection(&a.values, &b.values);
                if !overlap.is_empty() {
                    let successor = self.union2(&a.successor, &b.successor)?;
                    su.add(self, successor, overlap);
                }
            }
            let only_a = self.values_difference(&a.values, &rhs_covered);
            su.add(self, a.successor.clone(), only_a);
        }
        for b in rhs.iter() {
            let only_b = self.values_difference(&b.values, &lhs_covered);
            su.add(self, b.successor.clone(), only_b);
        }

        let result = self.node_from_square_union(level, su)?;
        debug!("computed: union({}, {}) -> {}", x, y, result);
        self.union_cache.insert(key, result.clone());
        Ok(result)
    }

    // ========================================================================
    // Intersection
    // ========================================================================

    /// The n-ary intersection of `operands`.
    ///
    /// Operands are deduplicated and sorted by handle identity, then folded
    /// left-to-right, short-circuiting on `⊥`. An empty operand set yields
    /// `⊥`; a single operand is returned as-is.
    pub fn intersection(&self, operands: &[Sdd<V>]) -> Result<Sdd<V>, Error> {
        let mut operands = operands.to_vec();
        operands.sort_unstable();
        operands.dedup();

        let Some((first, rest)) = operands.split_first() else {
            return Ok(Sdd::Zero);
        };
        let mut acc = first.clone();
        for operand in rest {
            if acc.is_zero() {
                break;
            }
            acc = self.intersection2(&acc, operand)?;
        }
        Ok(acc)
    }

    fn intersection2(&self, x: &Sdd<V>, y: &Sdd<V>) -> Result<Sdd<V>, Error> {
        // Base cases: x ∩ x = x, ⊥ ∩ _ = ⊥, ⊤ ∩ ⊤ = ⊤.
        if x == y {
            return Ok(x.clone());
        }
        if x.is_zero() || y.is_zero() {
            return Ok(Sdd::Zero);
        }
        let level = self.same_level(x, y)?;

        let key = commutative_key(x, y);
        if let Some(result) = self.intersection_cache.get(&key) {
            debug!("cache: intersection({}, {}) -> {}", x, y, result);
            return Ok(result);
        }

        let lhs = self.arcs(x);
        let rhs = self.arcs(y);
        let mut su = SquareUnion::new();

        // Only the overlap arm contributes.
        for a in lhs.iter() {
            for b in rhs.iter() {
                let overlap = self.values_intersection(&a.values, &b.values);
                if !overlap.is_empty() {
                    let successor = self.intersection2(&a.successor, &b.successor)?;
                    su.add(self, successor, overlap);
                }
            }
        }

        let result = self.node_from_square_union(level, su)?;
        debug!("computed: intersection({}, {}) -> {}", x, y, result);
        self.intersection_cache.insert(key, result.clone());
        Ok(result)
    }

    // ========================================================================
    // Difference
    // ========================================================================

    /// The difference `lhs ∖ rhs`.
    pub fn difference(&self, lhs: &Sdd<V>, rhs: &Sdd<V>) -> Result<Sdd<V>, Error> {
        self.difference2(lhs, rhs)
    }

    fn difference2(&self, x: &Sdd<V>, y: &Sdd<V>) -> Result<Sdd<V>, Error> {
        // Base cases: x ∖ x = ⊥, ⊥ ∖ y = ⊥, x ∖ ⊥ = x, ⊤ ∖ ⊤ = ⊥.
        if x == y || x.is_zero() {
            return Ok(Sdd::Zero);
        }
        if y.is_zero() {
            return Ok(x.clone());
        }
        let level = self.same_level(x, y)?;

        let key = (x.clone(), y.clone());
        if let Some(result) = self.difference_cache.get(&key) {
            debug!("cache: difference({}, {}) -> {}", x, y, result);
            return Ok(result);
        }

        let lhs = self.arcs(x);
        let rhs = self.arcs(y);
        let mut su = SquareUnion::new();

        let mut rhs_covered = self.values(std::iter::empty());
        for arc in rhs.iter() {
            rhs_covered = self.values_union(&rhs_covered, &arc.values);
        }

        for a in lhs.iter() {
            for b in rhs.iter() {
                let overlap = self.values_intersection(&a.values, &b.values);
                if !overlap.is_empty() {
                    let successor = self.difference2(&a.successor, &b.successor)?;
                    su.add(self, successor, overlap);
                }
            }
            // The part of this arc no rhs arc talks about survives unchanged.
            let residual = self.values_difference(&a.values, &rhs_covered);
            su.add(self, a.successor.clone(), residual);
        }

        let result = self.node_from_square_union(level, su)?;
        debug!("computed: difference({}, {}) -> {}", x, y, result);
        self.difference_cache.insert(key, result.clone());
        Ok(result)
    }
}
