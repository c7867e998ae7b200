//! The SDD manager: unique tables, caches, and node construction.
//!
//! All diagrams go through the manager. It owns:
//! - the unique tables for value sets, environments and prototype nodes
//!   (hash consing; structural equality coincides with pointer equality),
//! - the per-operation caches and the arc-view cache,
//! - the cached level-0 environment shared by the terminals.
//!
//! # Design
//!
//! The manager is single-threaded: unique tables and caches sit behind
//! `RefCell`, handles behind `Rc`. Several managers can run in parallel on
//! independent data, but the entries of one manager must never be mixed with
//! another's.

use std::fmt::Debug;
use std::rc::Rc;

use log::debug;
use num_bigint::BigUint;

use crate::cache::{CacheStats, OpCache, ViewKey};
use crate::env::{Env, EnvData};
use crate::error::Error;
use crate::node::{ProtoArc, ProtoNode};
use crate::reference::Sdd;
use crate::square_union::SquareUnion;
use crate::stack;
use crate::table::UniqueTable;
use crate::types::Level;
use crate::values::{Value, ValueSet, ValueSetData};
use crate::view::{self, SddArc};

/// Initial size hints for the unique tables and operation caches.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial bucket count for the prototype-node unique table.
    pub sdd_unique_table_size: usize,
    /// Initial bucket count for the environment unique table.
    pub env_unique_table_size: usize,
    /// Initial bucket count for the value-set unique table.
    pub values_unique_table_size: usize,
    /// Capacity hint for the union cache.
    pub union_cache_size: usize,
    /// Capacity hint for the intersection cache.
    pub intersection_cache_size: usize,
    /// Capacity hint for the difference cache.
    pub difference_cache_size: usize,
    /// Capacity hint for the arc-view materialization cache.
    pub arc_view_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sdd_unique_table_size: 1 << 14,
            env_unique_table_size: 1 << 14,
            values_unique_table_size: 1 << 12,
            union_cache_size: 1 << 14,
            intersection_cache_size: 1 << 14,
            difference_cache_size: 1 << 14,
            arc_view_cache_size: 1 << 12,
        }
    }
}

/// A snapshot of the manager's tables and caches.
#[derive(Debug, Clone, Copy)]
pub struct Statistics {
    pub live_nodes: usize,
    pub live_envs: usize,
    pub live_values: usize,
    pub union_cache: CacheStats,
    pub intersection_cache: CacheStats,
    pub difference_cache: CacheStats,
    pub arc_view_cache: CacheStats,
}

/// The manager: owns all interned data and the operation caches.
pub struct SddManager<V: Value> {
    values_table: UniqueTable<ValueSetData<V>>,
    env_table: UniqueTable<EnvData<V>>,
    node_table: UniqueTable<ProtoNode<V>>,
    empty_env: Env<V>,
    pub(crate) union_cache: OpCache<(Sdd<V>, Sdd<V>), Sdd<V>>,
    pub(crate) intersection_cache: OpCache<(Sdd<V>, Sdd<V>), Sdd<V>>,
    pub(crate) difference_cache: OpCache<(Sdd<V>, Sdd<V>), Sdd<V>>,
    arcs_cache: OpCache<ViewKey, Rc<Vec<SddArc<V>>>>,
}

impl<V: Value> Default for SddManager<V> {
    fn default() -> Self {
        SddManager::new()
    }
}

impl<V: Value> Debug for SddManager<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SddManager")
            .field("live_nodes", &self.node_table.live())
            .field("live_envs", &self.env_table.live())
            .field("live_values", &self.values_table.live())
            .finish()
    }
}

impl<V: Value> SddManager<V> {
    /// Creates a manager with the default configuration.
    pub fn new() -> Self {
        SddManager::with_config(Config::default())
    }

    /// Creates a manager with explicit table and cache size hints.
    pub fn with_config(config: Config) -> Self {
        let env_table = UniqueTable::with_capacity(config.env_unique_table_size);
        let empty_env = Env::new(env_table.intern(EnvData::empty()));
        SddManager {
            values_table: UniqueTable::with_capacity(config.values_unique_table_size),
            env_table,
            node_table: UniqueTable::with_capacity(config.sdd_unique_table_size),
            empty_env,
            union_cache: OpCache::with_capacity(config.union_cache_size),
            intersection_cache: OpCache::with_capacity(config.intersection_cache_size),
            difference_cache: OpCache::with_capacity(config.difference_cache_size),
            arcs_cache: OpCache::with_capacity(config.arc_view_cache_size),
        }
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    /// The `⊥` terminal: the empty set of tuples.
    pub fn zero(&self) -> Sdd<V> {
        Sdd::Zero
    }

    /// The `⊤` terminal: the singleton containing the empty tuple.
    pub fn one(&self) -> Sdd<V> {
        Sdd::One
    }

    // ========================================================================
    // Value sets
    // ========================================================================

    /// Interns a set of values.
    pub fn values<I>(&self, values: I) -> ValueSet<V>
    where
        I: IntoIterator<Item = V>,
    {
        let data = ValueSetData::from_vec(values.into_iter().collect());
        ValueSet::new(self.values_table.intern(data))
    }

    /// `a ∪ b` over value sets.
    pub fn values_union(&self, a: &ValueSet<V>, b: &ValueSet<V>) -> ValueSet<V> {
        if a == b {
            return a.clone();
        }
        let mut out = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a.as_slice());
        out.extend_from_slice(b.as_slice());
        self.values(out)
    }

    /// `a ∩ b` over value sets.
    pub fn values_intersection(&self, a: &ValueSet<V>, b: &ValueSet<V>) -> ValueSet<V> {
        if a == b {
            return a.clone();
        }
        let out: Vec<V> = a.iter().filter(|v| b.contains(*v)).collect();
        self.values(out)
    }

    /// `a ∖ b` over value sets.
    pub fn values_difference(&self, a: &ValueSet<V>, b: &ValueSet<V>) -> ValueSet<V> {
        if a == b {
            return self.values(std::iter::empty());
        }
        let out: Vec<V> = a.iter().filter(|v| !b.contains(*v)).collect();
        self.values(out)
    }

    /// A copy of `a` with `v` inserted.
    pub fn values_insert(&self, a: &ValueSet<V>, v: V) -> ValueSet<V> {
        if a.contains(v) {
            return a.clone();
        }
        self.values(a.iter().chain(std::iter::once(v)))
    }

    /// A copy of `a` with `v` removed.
    pub fn values_erase(&self, a: &ValueSet<V>, v: V) -> ValueSet<V> {
        if !a.contains(v) {
            return a.clone();
        }
        self.values(a.iter().filter(|x| *x != v))
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// The environment of a handle; terminals report the cached level-0
    /// environment.
    pub(crate) fn env_of(&self, x: &Sdd<V>) -> Env<V> {
        match x {
            Sdd::Zero | Sdd::One => self.empty_env.clone(),
            Sdd::Node { env, .. } => env.clone(),
        }
    }

    /// Single-arc constructor: the diagram whose tuples start with one of
    /// `values` and continue with a tuple of `successor`.
    ///
    /// Returns `⊥` when `values` is empty or `successor` is `⊥` (reduction).
    /// Fails with [`Error::IncompatibleLevels`] when `level` is not one above
    /// the successor's top level.
    pub fn node(
        &self,
        level: impl Into<Level>,
        values: ValueSet<V>,
        successor: &Sdd<V>,
    ) -> Result<Sdd<V>, Error> {
        let level = level.into();
        if values.is_empty() || successor.is_zero() {
            return Ok(Sdd::Zero);
        }
        self.unify(level, vec![(values, successor.clone())])
    }

    /// Multi-arc constructor.
    ///
    /// Arcs with an empty value set or a `⊥` successor are elided; arcs with
    /// equal successors are merged; an empty builder collapses to `⊥`. Value
    /// sets of arcs with *distinct* successors must be pairwise disjoint
    /// (the partition invariant); this is not verified.
    pub fn node_from_arcs<I>(&self, level: impl Into<Level>, arcs: I) -> Result<Sdd<V>, Error>
    where
        I: IntoIterator<Item = (ValueSet<V>, Sdd<V>)>,
    {
        let mut su = SquareUnion::new();
        for (values, successor) in arcs {
            su.add(self, successor, values);
        }
        self.node_from_square_union(level.into(), su)
    }

    pub(crate) fn node_from_square_union(
        &self,
        level: Level,
        su: SquareUnion<V>,
    ) -> Result<Sdd<V>, Error> {
        if su.is_empty() {
            return Ok(Sdd::Zero);
        }
        self.unify(level, su.into_arcs())
    }

    /// Canonicalizes a non-empty builder into an interned `(env, proto)` pair.
    ///
    /// This is the heart of the prototype encoding: per-arc displacements are
    /// extracted, the commonalities of all arcs are factored into the
    /// environment, and the remaining environment-free arcs are sorted and
    /// interned. Reconstructing the arcs through the view yields the original
    /// builder back.
    pub(crate) fn unify(
        &self,
        level: Level,
        builder_arcs: Vec<(ValueSet<V>, Sdd<V>)>,
    ) -> Result<Sdd<V>, Error> {
        debug_assert!(!builder_arcs.is_empty());
        debug!("unify: {} arcs at {}", builder_arcs.len(), level);

        // All successors must live exactly one level below.
        for (_, successor) in &builder_arcs {
            if successor.top_level().up() != level {
                return Err(Error::IncompatibleLevels {
                    lhs: level,
                    rhs: successor.top_level().up(),
                });
            }
        }

        // Initialize the prototype arcs: extract each arc's displacement and
        // push the current level onto the successor's environment stacks.
        let mut arcs = Vec::with_capacity(builder_arcs.len());
        for (values, successor) in builder_arcs {
            let k = V::common(values.as_slice());
            let shifted = self.values(values.iter().map(|v| v.shift(k)));
            let succ_env = self.env_of(&successor);
            arcs.push(ProtoArc {
                current: shifted,
                values: succ_env.values().push(k),
                successors: succ_env.successors().push(successor),
            });
        }

        // Per-level commonalities over all arcs: the minimum displacement for
        // values, the shared successor (or ⊥ when the arcs disagree).
        let value_stacks: Vec<_> = arcs.iter().map(|a| &a.values).collect();
        let env_values = stack::common(&value_stacks, |xs| V::common(xs));

        let succ_stacks: Vec<_> = arcs.iter().map(|a| &a.successors).collect();
        let env_succs = stack::common(&succ_stacks, |xs: &[Sdd<V>]| {
            let first = &xs[0];
            if xs.iter().all(|s| s == first) {
                first.clone()
            } else {
                Sdd::Zero
            }
        });

        // Factor the commonalities out of every arc: values become relative
        // offsets, successor entries collapse to ⊥ where they coincide with
        // the common.
        for arc in &mut arcs {
            arc.values.shift(&env_values, |v, c| v.shift(*c));
            arc.successors.shift(&env_succs, |s, c| {
                if s == c {
                    Sdd::Zero
                } else {
                    s.clone()
                }
            });
        }

        // Canonical arc order, then intern both halves.
        arcs.sort_unstable();
        let proto = self.node_table.intern(ProtoNode::new(arcs));
        let env = Env::new(
            self.env_table
                .intern(EnvData::new(level, env_values, env_succs)),
        );
        Ok(Sdd::Node { env, proto })
    }

    // ========================================================================
    // Arc views
    // ========================================================================

    /// The concrete arcs of `x` at its top variable.
    ///
    /// Terminals have no arcs. Identical `(env, proto)` pairs share one
    /// materialized vector.
    pub fn arcs(&self, x: &Sdd<V>) -> Rc<Vec<SddArc<V>>> {
        let (env, proto) = match x {
            Sdd::Zero | Sdd::One => return Rc::new(Vec::new()),
            Sdd::Node { env, proto } => (env, proto),
        };
        let key: ViewKey = (env.addr(), Rc::as_ptr(proto) as usize);
        if let Some(arcs) = self.arcs_cache.get(&key) {
            return arcs;
        }
        let arcs = Rc::new(view::materialize(self, env, proto));
        self.arcs_cache.insert(key, Rc::clone(&arcs));
        arcs
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The number of distinct tuples encoded by `x`.
    pub fn count_paths(&self, x: &Sdd<V>) -> BigUint {
        let mut cache = std::collections::HashMap::new();
        self.count_paths_rec(x, &mut cache)
    }

    fn count_paths_rec(
        &self,
        x: &Sdd<V>,
        cache: &mut std::collections::HashMap<ViewKey, BigUint>,
    ) -> BigUint {
        match x {
            Sdd::Zero => BigUint::from(0u32),
            Sdd::One => BigUint::from(1u32),
            Sdd::Node { .. } => {
                let key = x.node_key().unwrap();
                if let Some(count) = cache.get(&key) {
                    return count.clone();
                }
                let mut total = BigUint::from(0u32);
                for arc in self.arcs(x).iter() {
                    total += BigUint::from(arc.values.len())
                        * self.count_paths_rec(&arc.successor, cache);
                }
                cache.insert(key, total.clone());
                total
            }
        }
    }

    /// The number of distinct non-terminal nodes reachable from `x`.
    pub fn node_count(&self, x: &Sdd<V>) -> usize {
        let mut visited = std::collections::HashSet::new();
        self.node_count_rec(x, &mut visited)
    }

    fn node_count_rec(
        &self,
        x: &Sdd<V>,
        visited: &mut std::collections::HashSet<ViewKey>,
    ) -> usize {
        let Some(key) = x.node_key() else { return 0 };
        if !visited.insert(key) {
            return 0;
        }
        let mut count = 1;
        for arc in self.arcs(x).iter() {
            count += self.node_count_rec(&arc.successor, visited);
        }
        count
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Drops all cache entries. Does not invalidate handles.
    pub fn clear_caches(&self) {
        self.union_cache.clear();
        self.intersection_cache.clear();
        self.difference_cache.clear();
        self.arcs_cache.clear();
    }

    /// Live prototype nodes in the unique table.
    pub fn live_nodes(&self) -> usize {
        self.node_table.live()
    }

    /// Live environments in the unique table, including the cached empty one.
    pub fn live_envs(&self) -> usize {
        self.env_table.live()
    }

    /// Live value sets in the unique table.
    pub fn live_values(&self) -> usize {
        self.values_table.live()
    }

    /// A snapshot of table sizes and cache counters.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            live_nodes: self.live_nodes(),
            live_envs: self.live_envs(),
            live_values: self.live_values(),
            union_cache: self.union_cache.stats(),
            intersection_cache: self.intersection_cache.stats(),
            difference_cache: self.difference_cache.stats(),
            arc_view_cache: self.arcs_cache.stats(),
        }
    }

    /// Tears the manager down.
    ///
    /// Clears all caches and drops the manager's own references; fails with
    /// [`Error::DanglingOnTeardown`] if externally held handles keep any
    /// unique-table entry alive.
    pub fn shutdown(self) -> Result<(), Error> {
        self.clear_caches();
        let SddManager {
            values_table,
            env_table,
            node_table,
            empty_env,
            union_cache,
            intersection_cache,
            difference_cache,
            arcs_cache,
        } = self;
        drop(union_cache);
        drop(intersection_cache);
        drop(difference_cache);
        drop(arcs_cache);
        drop(empty_env);

        let live_nodes = node_table.live();
        let live_envs = env_table.live();
        let live_values = values_table.live();
        if live_nodes + live_envs + live_values > 0 {
            return Err(Error::DanglingOnTeardown {
                live_nodes,
                live_envs,
                live_values,
            });
        }
        Ok(())
    }
}
