/*!

The set algebra: pure functions over ordered, duplicate-free element lists.

Every function preserves the documented result ordering: first-operand order,
then new elements of later operands in their own order. Membership tests go
through `NatSet` masks over universe positions rather than repeated string
comparison, which is why most routines take the registry.

*/

use crate::abstractions::{IString, NatSet};
use crate::core::program::Registry;

pub fn is_empty(set: &[IString]) -> bool {
  set.is_empty()
}

pub fn cardinality(set: &[IString]) -> usize {
  set.len()
}

/// Folds binary union left-to-right across two or more operands.
pub fn union(registry: &Registry, operands: &[&[IString]]) -> Vec<IString> {
  let mut seen   = NatSet::with_capacity(registry.len());
  let mut result = Vec::new();
  for operand in operands {
    for element in operand.iter() {
      match registry.position(element) {
        Some(position) => {
          if seen.insert(position) {
            result.push(element.clone());
          }
        }
        None => {} // foreign element, excluded by validation
      }
    }
  }
  result
}

/// Folds binary intersection left-to-right across two or more operands:
/// elements of the first operand present in every later operand.
pub fn intersection(registry: &Registry, operands: &[&[IString]]) -> Vec<IString> {
  let (first, rest) = match operands.split_first() {
    Some(split) => split,
    None        => return Vec::new(),
  };
  let mut kept = registry.membership_mask(first);
  for operand in rest {
    let mask = registry.membership_mask(operand);
    let narrowed: NatSet = kept.iter().filter(|position| mask.contains(*position)).collect();
    kept = narrowed;
  }
  first.iter()
       .filter(|element| {
         registry.position(element).map(|p| kept.contains(p)).unwrap_or(false)
       })
       .cloned()
       .collect()
}

/// Elements of `first` not in `second`, in `first` order.
pub fn difference(registry: &Registry, first: &[IString], second: &[IString]) -> Vec<IString> {
  let excluded = registry.membership_mask(second);
  first.iter()
       .filter(|element| {
         registry.position(element).map(|p| !excluded.contains(p)).unwrap_or(false)
       })
       .cloned()
       .collect()
}

/// `difference(universe, set)`, in universe order.
pub fn complement(registry: &Registry, set: &[IString]) -> Vec<IString> {
  let present = registry.membership_mask(set);
  registry.iter()
          .enumerate()
          .filter(|(position, _)| !present.contains(*position))
          .map(|(_, element)| element.clone())
          .collect()
}

/// Whether every element of `first` is in `second`.
pub fn is_subset_or_equal(registry: &Registry, first: &[IString], second: &[IString]) -> bool {
  registry.membership_mask(first)
          .is_subset_of(&registry.membership_mask(second))
}

/// Subset and not equal.
pub fn is_proper_subset(registry: &Registry, first: &[IString], second: &[IString]) -> bool {
  is_subset_or_equal(registry, first, second) && first.len() != second.len()
}

/// Order-independent set equality.
pub fn is_equal(registry: &Registry, first: &[IString], second: &[IString]) -> bool {
  first.len() == second.len()
      && registry.membership_mask(first) == registry.membership_mask(second)
}
