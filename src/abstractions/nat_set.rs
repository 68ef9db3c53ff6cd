/*!

A `NatSet` is a set of natural numbers. It is used wherever the calculator works
with positions into an ordered reference list instead of the listed values
themselves: universe membership masks, duplicate detection, and the rows of a
relation's adjacency table.

The backing implementation is `bit_set::BitSet`.

*/

use std::fmt::{Debug, Formatter};

use bit_set::BitSet;

use crate::abstractions::join_string;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty `NatSet` able to hold values below `capacity` without reallocating.
  pub fn with_capacity(capacity: usize) -> Self {
    NatSet(BitSet::with_capacity(capacity))
  }

  /// Inserts `value`, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  /// The number of members, not the capacity.
  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterates over members in increasing order.
  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }

  /// In-place union with `other`.
  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0);
  }

  pub fn is_subset_of(&self, other: &NatSet) -> bool {
    self.0.is_subset(&other.0)
  }

  pub fn clear(&mut self) {
    self.0.clear();
  }
}

impl FromIterator<usize> for NatSet {
  fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}
