//! A one-to-one map with lookup in both directions.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Rejected insertion into a [`Bijection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BijectionError {
    #[error("'{0}' is already mapped")]
    DuplicateLeft(String),
    #[error("'{0}' is already the target of another mapping")]
    DuplicateRight(String),
}

/// Two synchronized maps, `L → R` and `R → L`.
///
/// Neither side may hold a duplicate: inserting a pair whose left or right
/// value is already present fails and leaves the map unchanged.
#[derive(Clone)]
pub struct Bijection<L, R> {
    forward: HashMap<L, R>,
    backward: HashMap<R, L>,
}

impl<L, R> Default for Bijection<L, R> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }
}

impl<L, R> Bijection<L, R>
where
    L: Eq + Hash + Clone + fmt::Display,
    R: Eq + Hash + Clone + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bijection from pairs, failing on the first duplicate.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, BijectionError>
    where
        I: IntoIterator<Item = (L, R)>,
    {
        let mut map = Self::new();
        for (left, right) in pairs {
            map.insert(left, right)?;
        }
        Ok(map)
    }

    pub fn insert(&mut self, left: L, right: R) -> Result<(), BijectionError> {
        if self.forward.contains_key(&left) {
            return Err(BijectionError::DuplicateLeft(left.to_string()));
        }
        if self.backward.contains_key(&right) {
            return Err(BijectionError::DuplicateRight(right.to_string()));
        }
        self.forward.insert(left.clone(), right.clone());
        self.backward.insert(right, left);
        Ok(())
    }

    pub fn get_by_left<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.get(left)
    }

    pub fn get_by_right<Q>(&self, right: &Q) -> Option<&L>
    where
        R: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.backward.get(right)
    }

    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.contains_key(left)
    }

    pub fn contains_right<Q>(&self, right: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.backward.contains_key(right)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates the pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.forward.iter()
    }
}

/// Equal when both hold the same pairs.
impl<L: Eq + Hash, R: Eq + Hash> PartialEq for Bijection<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<L: Eq + Hash, R: Eq + Hash> Eq for Bijection<L, R> {}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Bijection<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}
