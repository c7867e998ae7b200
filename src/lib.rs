//! # sdd-rs: Hierarchical Set Decision Diagrams in Rust
//!
//! **`sdd-rs`** is a manager-centric library for **Set Decision Diagrams (SDDs)**
//! with a *prototype* (Σ-homomorphic) encoding. An SDD is a canonical,
//! maximally-shared representation of a very large set of tuples of values,
//! together with the set-algebraic operations (union, intersection, difference)
//! over those sets.
//!
//! ## What is a prototype SDD?
//!
//! A classical SDD node carries, per arc, a set of values and a successor.
//! The prototype encoding splits that data into a *prototype node* — the part
//! that is identical across translated copies of a node — and an
//! *environment* — the per-reference data (one value displacement and one
//! common successor per level) needed to reconstruct the concrete node. Two
//! nodes that only differ by a uniform translation of their values share the
//! same prototype allocation.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: all operations go through the
//!   [`SddManager`], which owns the unique tables (hash consing) and the
//!   operation caches.
//! - **Canonical**: structurally equal nodes, environments and value sets are
//!   interned, so semantic equality of diagrams is pointer equality of handles.
//! - **Cheap handles**: an [`Sdd`] is a tagged sum `{⊥, ⊤, (env, proto)}`
//!   holding two reference-counted pointers; cloning is O(1).
//! - **Memoized operations**: union, intersection and difference are recursive
//!   algorithms with per-operation caches keyed by the operand handles.
//!
//! ## Quick Start
//!
//! ```rust
//! use sdd_rs::manager::SddManager;
//!
//! // 1. Initialize the manager (for u32-valued variables).
//! let mgr = SddManager::<u32>::new();
//!
//! // 2. Encode two singleton sets of pairs: {(0, 0)} and {(1, 1)}.
//! let one = mgr.one();
//! let x = mgr.node(1, mgr.values([0u32]), &one).unwrap();
//! let a = mgr.node(2, mgr.values([0u32]), &x).unwrap();
//! let y = mgr.node(1, mgr.values([1u32]), &one).unwrap();
//! let b = mgr.node(2, mgr.values([1u32]), &y).unwrap();
//!
//! // 3. Combine them.
//! let both = mgr.union(&[a.clone(), b.clone()]).unwrap();
//! assert_eq!(mgr.count_paths(&both), 2u32.into());
//!
//! // 4. Canonicity: equality of handles is pointer equality.
//! let again = mgr.union(&[b, a]).unwrap();
//! assert_eq!(both, again);
//! ```
//!
//! ## Core Modules
//!
//! - [`manager`]: the [`SddManager`] — tables, caches, node construction.
//! - [`reference`]: the [`Sdd`] handle type.
//! - [`ops`]: the recursive set-algebraic operations.
//! - [`values`]: the [`Value`] trait and interned value sets.
//! - [`dot`]: Graphviz export through a visitor interface.
//! - [`paths`]: enumeration of the encoded tuples.
//!
//! [`SddManager`]: crate::manager::SddManager
//! [`Sdd`]: crate::reference::Sdd
//! [`Value`]: crate::values::Value

pub mod cache;
pub mod dot;
pub mod env;
pub mod error;
pub mod manager;
pub mod node;
pub mod ops;
pub mod paths;
pub mod reference;
pub mod square_union;
pub mod stack;
pub mod table;
pub mod types;
pub mod values;
pub mod view;

pub use crate::error::Error;
pub use crate::manager::{Config, SddManager};
pub use crate::reference::Sdd;
pub use crate::types::Level;
pub use crate::values::{Value, ValueSet};
