//! The value list carried by one transfer.

use std::ops::Deref;

use smallvec::SmallVec;

use crate::error::GeneratorError;

/// Ordered values passed into a generator or yielded out of it.
///
/// Callers pick the view they need: [`Values::into_single`] for a scalar
/// result, [`Values::into_vec`] or the slice API for the whole list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Values<V>(SmallVec<[V; 2]>);

impl<V> Values<V> {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn one(value: V) -> Self {
        let mut values = Self::new();
        values.push(value);
        values
    }

    pub fn push(&mut self, value: V) {
        self.0.push(value);
    }

    /// The only value, if there is exactly one.
    pub fn single(&self) -> Option<&V> {
        match self.0.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }

    /// Take the only value, failing with [`GeneratorError::Arity`] otherwise.
    pub fn into_single(self) -> Result<V, GeneratorError> {
        let found = self.0.len();
        let mut values = self.0.into_iter();
        match (values.next(), values.next()) {
            (Some(value), None) => Ok(value),
            _ => Err(GeneratorError::Arity { expected: 1, found }),
        }
    }

    pub fn into_vec(self) -> Vec<V> {
        self.0.into_vec()
    }

    pub fn as_slice(&self) -> &[V] {
        self.0.as_slice()
    }
}

impl<V> Default for Values<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Deref for Values<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        self.as_slice()
    }
}

impl<V> FromIterator<V> for Values<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V> IntoIterator for Values<V> {
    type Item = V;
    type IntoIter = smallvec::IntoIter<[V; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Values<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> From<Vec<V>> for Values<V> {
    fn from(values: Vec<V>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}
