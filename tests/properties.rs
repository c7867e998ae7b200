//! Property-based tests for the set algebra.
//!
//! Diagrams are generated from random sets of fixed-length tuples and checked
//! both against the algebraic laws and against a `HashSet` model of the same
//! operations. Canonicity turns every law into a handle equality.

use std::collections::HashSet;

use proptest::prelude::*;
use sdd_rs::{Sdd, SddManager};

const TUPLE_LEN: usize = 3;

fn tuple_set() -> impl Strategy<Value = HashSet<Vec<u32>>> {
    prop::collection::hash_set(prop::collection::vec(0u32..4, TUPLE_LEN), 0..10)
}

/// Builds the diagram encoding exactly `tuples`.
fn build(mgr: &SddManager<u32>, tuples: &HashSet<Vec<u32>>) -> Sdd<u32> {
    let singletons: Vec<_> = tuples
        .iter()
        .map(|tuple| {
            let mut acc = mgr.one();
            for (i, &v) in tuple.iter().rev().enumerate() {
                acc = mgr.node(i as u32 + 1, mgr.values([v]), &acc).unwrap();
            }
            acc
        })
        .collect();
    mgr.union(&singletons).unwrap()
}

/// Reads the encoded tuples back out of a diagram.
fn read(mgr: &SddManager<u32>, x: &Sdd<u32>) -> HashSet<Vec<u32>> {
    mgr.paths(x).collect()
}

proptest! {
    #[test]
    fn build_read_roundtrip(a in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        prop_assert_eq!(read(&mgr, &x), a);
    }

    #[test]
    fn canonicity(a in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        // Two independent constructions of the same set meet in one handle.
        let x = build(&mgr, &a);
        let y = build(&mgr, &a);
        prop_assert_eq!(x, y);
    }

    #[test]
    fn idempotence(a in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        prop_assert_eq!(mgr.union(&[x.clone(), x.clone()]).unwrap(), x.clone());
        prop_assert_eq!(mgr.intersection(&[x.clone(), x.clone()]).unwrap(), x.clone());
        prop_assert!(mgr.difference(&x, &x).unwrap().is_zero());
    }

    #[test]
    fn identity_and_absorbing(a in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        prop_assert_eq!(mgr.union(&[x.clone(), mgr.zero()]).unwrap(), x.clone());
        prop_assert_eq!(mgr.difference(&x, &mgr.zero()).unwrap(), x.clone());
        prop_assert!(mgr.intersection(&[x, mgr.zero()]).unwrap().is_zero());
    }

    #[test]
    fn commutativity(a in tuple_set(), b in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);
        prop_assert_eq!(
            mgr.union(&[x.clone(), y.clone()]).unwrap(),
            mgr.union(&[y.clone(), x.clone()]).unwrap()
        );
        prop_assert_eq!(
            mgr.intersection(&[x.clone(), y.clone()]).unwrap(),
            mgr.intersection(&[y, x]).unwrap()
        );
    }

    #[test]
    fn associativity(a in tuple_set(), b in tuple_set(), c in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);
        let z = build(&mgr, &c);

        let xy = mgr.union(&[x.clone(), y.clone()]).unwrap();
        let yz = mgr.union(&[y.clone(), z.clone()]).unwrap();
        prop_assert_eq!(
            mgr.union(&[xy, z.clone()]).unwrap(),
            mgr.union(&[x.clone(), yz]).unwrap()
        );

        let xy = mgr.intersection(&[x.clone(), y.clone()]).unwrap();
        let yz = mgr.intersection(&[y, z.clone()]).unwrap();
        prop_assert_eq!(
            mgr.intersection(&[xy, z]).unwrap(),
            mgr.intersection(&[x, yz]).unwrap()
        );
    }

    #[test]
    fn distributivity(a in tuple_set(), b in tuple_set(), c in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);
        let z = build(&mgr, &c);

        let yz = mgr.union(&[y.clone(), z.clone()]).unwrap();
        let lhs = mgr.intersection(&[x.clone(), yz]).unwrap();

        let xy = mgr.intersection(&[x.clone(), y]).unwrap();
        let xz = mgr.intersection(&[x, z]).unwrap();
        let rhs = mgr.union(&[xy, xz]).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn de_morgan_on_difference(a in tuple_set(), b in tuple_set(), c in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);
        let z = build(&mgr, &c);

        let yz = mgr.union(&[y.clone(), z.clone()]).unwrap();
        let lhs = mgr.difference(&x, &yz).unwrap();

        let xy = mgr.difference(&x, &y).unwrap();
        let xz = mgr.difference(&x, &z).unwrap();
        let rhs = mgr.intersection(&[xy, xz]).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn cardinality_inclusion_exclusion(a in tuple_set(), b in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);

        let union = mgr.count_paths(&mgr.union(&[x.clone(), y.clone()]).unwrap());
        let inter = mgr.count_paths(&mgr.intersection(&[x.clone(), y.clone()]).unwrap());
        prop_assert_eq!(union + inter, mgr.count_paths(&x) + mgr.count_paths(&y));
    }

    #[test]
    fn operations_match_the_set_model(a in tuple_set(), b in tuple_set()) {
        let mgr = SddManager::<u32>::new();
        let x = build(&mgr, &a);
        let y = build(&mgr, &b);

        let union = mgr.union(&[x.clone(), y.clone()]).unwrap();
        prop_assert_eq!(read(&mgr, &union), a.union(&b).cloned().collect::<HashSet<_>>());

        let inter = mgr.intersection(&[x.clone(), y.clone()]).unwrap();
        prop_assert_eq!(
            read(&mgr, &inter),
            a.intersection(&b).cloned().collect::<HashSet<_>>()
        );

        let diff = mgr.difference(&x, &y).unwrap();
        prop_assert_eq!(
            read(&mgr, &diff),
            a.difference(&b).cloned().collect::<HashSet<_>>()
        );
    }
}
