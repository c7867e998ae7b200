//! The diagram handle: the only reference users hold.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::env::Env;
use crate::node::ProtoNode;
use crate::types::Level;
use crate::values::Value;

/// A Set Decision Diagram.
///
/// A tagged sum with three arms:
///
/// - [`Sdd::Zero`] — the `⊥` terminal, encoding the empty set of tuples;
/// - [`Sdd::One`] — the `⊤` terminal, encoding the singleton empty tuple;
/// - [`Sdd::Node`] — an interned environment plus an interned prototype node.
///
/// Handles are cheap to copy. Equality, hashing and ordering are computed
/// over `(tag, env pointer, proto pointer)`; because environments and
/// prototype nodes are interned, structural equality of diagrams coincides
/// with equality of handles. The ordering is arbitrary but consistent within
/// a process.
#[derive(Debug)]
pub enum Sdd<V: Value> {
    /// The `⊥` terminal: the empty set of tuples.
    Zero,
    /// The `⊤` terminal: the singleton containing the empty tuple.
    One,
    /// A non-terminal node under its reconstruction environment.
    Node {
        env: Env<V>,
        proto: Rc<ProtoNode<V>>,
    },
}

impl<V: Value> Sdd<V> {
    /// True for the `⊥` terminal.
    pub fn is_zero(&self) -> bool {
        matches!(self, Sdd::Zero)
    }

    /// True for the `⊤` terminal.
    pub fn is_one(&self) -> bool {
        matches!(self, Sdd::One)
    }

    /// True for either terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Sdd::Zero | Sdd::One)
    }

    /// The number of variables this diagram still branches on; 0 for
    /// terminals.
    pub fn top_level(&self) -> Level {
        match self {
            Sdd::Zero | Sdd::One => Level::TERMINAL,
            Sdd::Node { env, .. } => env.level(),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Sdd::Zero => 0,
            Sdd::One => 1,
            Sdd::Node { .. } => 2,
        }
    }

    /// The identity of the pointed-to pair, for visit caches.
    pub(crate) fn node_key(&self) -> Option<(usize, usize)> {
        match self {
            Sdd::Zero | Sdd::One => None,
            Sdd::Node { env, proto } => Some((env.addr(), Rc::as_ptr(proto) as usize)),
        }
    }
}

impl<V: Value> Clone for Sdd<V> {
    fn clone(&self) -> Self {
        match self {
            Sdd::Zero => Sdd::Zero,
            Sdd::One => Sdd::One,
            Sdd::Node { env, proto } => Sdd::Node {
                env: env.clone(),
                proto: Rc::clone(proto),
            },
        }
    }
}

impl<V: Value> PartialEq for Sdd<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sdd::Zero, Sdd::Zero) => true,
            (Sdd::One, Sdd::One) => true,
            (
                Sdd::Node { env: le, proto: lp },
                Sdd::Node { env: re, proto: rp },
            ) => le == re && Rc::ptr_eq(lp, rp),
            _ => false,
        }
    }
}

impl<V: Value> Eq for Sdd<V> {}

impl<V: Value> Hash for Sdd<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        if let Sdd::Node { env, proto } = self {
            env.addr().hash(state);
            (Rc::as_ptr(proto) as usize).hash(state);
        }
    }
}

impl<V: Value> PartialOrd for Sdd<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Value> Ord for Sdd<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_tag = self.tag().cmp(&other.tag());
        if by_tag != Ordering::Equal {
            return by_tag;
        }
        match (self, other) {
            (
                Sdd::Node { env: le, proto: lp },
                Sdd::Node { env: re, proto: rp },
            ) => (le.addr(), Rc::as_ptr(lp) as usize)
                .cmp(&(re.addr(), Rc::as_ptr(rp) as usize)),
            _ => Ordering::Equal,
        }
    }
}

impl<V: Value> Display for Sdd<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sdd::Zero => write!(f, "⊥"),
            Sdd::One => write!(f, "⊤"),
            Sdd::Node { env, proto } => {
                write!(f, "<{} with {} arcs>", env.level(), proto.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals() {
        let zero = Sdd::<u32>::Zero;
        let one = Sdd::<u32>::One;

        assert!(zero.is_zero());
        assert!(zero.is_terminal());
        assert!(!zero.is_one());

        assert!(one.is_one());
        assert!(one.is_terminal());
        assert!(!one.is_zero());

        assert_eq!(zero.top_level(), Level::TERMINAL);
        assert_eq!(one.top_level(), Level::TERMINAL);
    }

    #[test]
    fn test_terminal_ordering() {
        assert!(Sdd::<u32>::Zero < Sdd::<u32>::One);
        assert_eq!(Sdd::<u32>::Zero.cmp(&Sdd::Zero), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Sdd::<u32>::Zero), "⊥");
        assert_eq!(format!("{}", Sdd::<u32>::One), "⊤");
    }
}
