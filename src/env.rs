//! Environments: the per-reference half of the prototype encoding.
//!
//! An environment carries the level of a node together with two stacks of
//! per-level commonalities (one value displacement, one common successor per
//! level below). Combined with a prototype node it reconstructs the concrete
//! node. Environments are interned: canonical by pointer.

use std::hash::Hash;
use std::rc::Rc;

use crate::reference::Sdd;
use crate::stack::Stack;
use crate::types::Level;
use crate::values::Value;

/// The interned payload of an environment.
///
/// Invariant: `values.len() == successors.len() == level` — one entry per
/// level up to and including the node's own (the head entries belong to the
/// current level). Both stacks are empty for the level-0 environment of
/// terminals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvData<V: Value> {
    pub level: Level,
    pub values: Stack<V>,
    pub successors: Stack<Sdd<V>>,
}

impl<V: Value> EnvData<V> {
    pub(crate) fn new(level: Level, values: Stack<V>, successors: Stack<Sdd<V>>) -> Self {
        debug_assert_eq!(values.len(), successors.len());
        debug_assert_eq!(values.len() as u32, level.get());
        EnvData {
            level,
            values,
            successors,
        }
    }

    /// The level-0 environment shared by `⊥` and `⊤`.
    pub(crate) fn empty() -> Self {
        EnvData {
            level: Level::TERMINAL,
            values: Stack::new(),
            successors: Stack::new(),
        }
    }
}

/// A shared, interned environment.
///
/// Equality and hashing are pointer-based: two environments produced by the
/// same manager are equal iff they are the same allocation.
#[derive(Debug)]
pub struct Env<V: Value> {
    data: Rc<EnvData<V>>,
}

impl<V: Value> Env<V> {
    pub(crate) fn new(data: Rc<EnvData<V>>) -> Self {
        Env { data }
    }

    pub fn level(&self) -> Level {
        self.data.level
    }

    /// The per-level common value displacements.
    pub fn values(&self) -> &Stack<V> {
        &self.data.values
    }

    /// The per-level common successors (`⊥` where the arcs disagree).
    pub fn successors(&self) -> &Stack<Sdd<V>> {
        &self.data.successors
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.data) as usize
    }
}

impl<V: Value> Clone for Env<V> {
    fn clone(&self) -> Self {
        Env {
            data: Rc::clone(&self.data),
        }
    }
}

impl<V: Value> PartialEq for Env<V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl<V: Value> Eq for Env<V> {}

impl<V: Value> Hash for Env<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env() {
        let data = EnvData::<u32>::empty();
        assert_eq!(data.level, Level::TERMINAL);
        assert!(data.values.is_empty());
        assert!(data.successors.is_empty());
    }

    #[test]
    fn test_env_pointer_equality() {
        let shared = Rc::new(EnvData::<u32>::empty());
        let a = Env::new(Rc::clone(&shared));
        let b = Env::new(shared);
        let c = Env::new(Rc::new(EnvData::empty()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
