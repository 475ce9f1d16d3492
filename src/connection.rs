use crate::scope::Key;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// One equivalence class of a [`Connection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class<'a> {
    /// Keys known to be equal, in insertion order
    pub members: SmallVec<[Key<'a>; 4]>,
    /// The constant the class is bound to, if any
    pub value: Option<&'a str>,
}

/// The equalities established so far on one search branch.
///
/// Keys are interned into an arena and grouped with a union-find over
/// their indices. Each root carries the constant its class is bound to.
/// Cloning copies the flat arrays, so a branch can extend its own copy
/// without its siblings ever observing the change.
///
/// ```rust
/// use resolog::{Connection, Key, Scope};
///
/// let mut connection = Connection::new();
/// let x = Key::new("X", Scope(0));
/// let y = Key::new("Y", Scope(0));
/// assert!(connection.add_equal(x, y));
/// assert!(connection.add_equal(y, Key::Value("tom")));
/// assert_eq!(connection.value_of(&x), Some("tom"));
/// assert!(!connection.add_equal(x, Key::Value("bob")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Connection<'a> {
    /// Key to arena index
    slots: IndexMap<Key<'a>, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Bound constant, only meaningful at roots
    value: Vec<Option<&'a str>>,
}

impl<'a> Connection<'a> {
    /// An empty partition
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys in the partition
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no equality has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True if `key` belongs to some class
    #[must_use]
    pub fn contains(&self, key: &Key<'a>) -> bool {
        self.slots.contains_key(key)
    }

    /// Asserts that `a` and `b` are equal.
    ///
    /// Returns false if their classes are bound to different constants. The
    /// partition is left in an unspecified state in that case and must be
    /// discarded.
    pub fn add_equal(&mut self, a: Key<'a>, b: Key<'a>) -> bool {
        let a = self.slot(a);
        let b = self.slot(b);
        let (root_a, root_b) = (self.find_compress(a), self.find_compress(b));
        if root_a == root_b {
            return true;
        }

        let merged = match (self.value[root_a], self.value[root_b]) {
            (Some(x), Some(y)) if x != y => return false,
            (Some(x), _) | (None, Some(x)) => Some(x),
            (None, None) => None,
        };

        let (child, root) = if self.rank[root_a] < self.rank[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if self.rank[child] == self.rank[root] {
            self.rank[root] += 1;
        }
        self.parent[child] = root;
        self.value[root] = merged;
        true
    }

    /// The constant `key` is bound to, if any.
    ///
    /// A constant key is always bound to itself, even if it was never added.
    #[must_use]
    pub fn value_of(&self, key: &Key<'a>) -> Option<&'a str> {
        match self.slots.get(key) {
            Some(&slot) => self.value[self.find(slot)],
            None => match *key {
                Key::Value(name) => Some(name),
                Key::Var { .. } => None,
            },
        }
    }

    /// True if `a` and `b` are known to be equal
    #[must_use]
    pub fn same_class(&self, a: &Key<'a>, b: &Key<'a>) -> bool {
        if a == b {
            return true;
        }
        match (self.slots.get(a), self.slots.get(b)) {
            (Some(&x), Some(&y)) => self.find(x) == self.find(y),
            _ => false,
        }
    }

    /// All classes, ordered by the first appearance of their members
    #[must_use]
    pub fn classes(&self) -> Vec<Class<'a>> {
        let mut by_root: IndexMap<usize, Class<'a>> = IndexMap::new();
        for (key, &slot) in &self.slots {
            let root = self.find(slot);
            by_root
                .entry(root)
                .or_insert_with(|| Class {
                    members: SmallVec::new(),
                    value: self.value[root],
                })
                .members
                .push(*key);
        }
        by_root.into_values().collect()
    }

    /// Arena index of `key`, creating a singleton class on first use
    fn slot(&mut self, key: Key<'a>) -> usize {
        if let Some(&slot) = self.slots.get(&key) {
            return slot;
        }
        let slot = self.parent.len();
        self.parent.push(slot);
        self.rank.push(0);
        self.value.push(match key {
            Key::Value(name) => Some(name),
            Key::Var { .. } => None,
        });
        self.slots.insert(key, slot);
        slot
    }

    fn find(&self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            slot = self.parent[slot];
        }
        slot
    }

    /// Path halving
    fn find_compress(&mut self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            let grandparent = self.parent[self.parent[slot]];
            self.parent[slot] = grandparent;
            slot = grandparent;
        }
        slot
    }
}
