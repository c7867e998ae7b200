//! Content-addressed interning with automatic reclamation.
//!
//! A [`UniqueTable`] enforces the canonicity invariant: for every structurally
//! equal value there is at most one allocation at any time. Entries are held
//! through [`Weak`] references, so an entry is reclaimed exactly when the last
//! strong handle referencing it is dropped; the table prunes dead entries
//! lazily while scanning buckets. No deletion callback is needed and the
//! ownership graph between interned entries stays acyclic.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// A hash set from structural value to a uniquely allocated entry.
pub struct UniqueTable<T> {
    buckets: RefCell<HashMap<u64, Vec<Weak<T>>>>,
}

impl<T: Eq + Hash> UniqueTable<T> {
    /// Creates a table with an initial bucket capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        UniqueTable {
            buckets: RefCell::new(HashMap::with_capacity(capacity)),
        }
    }

    fn structural_hash(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the unique allocation for `value`.
    ///
    /// Called twice with structurally equal inputs, it returns the same
    /// pointer as long as the first result is still alive.
    pub fn intern(&self, value: T) -> Rc<T> {
        let hash = Self::structural_hash(&value);
        let mut buckets = self.buckets.borrow_mut();
        let bucket = buckets.entry(hash).or_default();

        bucket.retain(|weak| weak.strong_count() > 0);
        for weak in bucket.iter() {
            if let Some(entry) = weak.upgrade() {
                if *entry == value {
                    return entry;
                }
            }
        }

        let entry = Rc::new(value);
        bucket.push(Rc::downgrade(&entry));
        entry
    }

    /// The number of live entries, pruning dead ones on the way.
    pub fn live(&self) -> usize {
        let mut buckets = self.buckets.borrow_mut();
        let mut count = 0;
        buckets.retain(|_, bucket| {
            bucket.retain(|weak| weak.strong_count() > 0);
            count += bucket.len();
            !bucket.is_empty()
        });
        count
    }
}
