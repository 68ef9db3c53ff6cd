/*!

The relation algebra. For each property check the relation is materialized as a
boolean adjacency table: rows and columns indexed by a reference ordering, a
cell set exactly when the corresponding pair is declared. Whole-relation
properties use the universe as both row and column reference; the
injective/surjective/bijective family takes an explicit domain/codomain set
pair and restricts the table to pairs inside their product.

Rows are `NatSet`s, so row degrees are popcounts and symmetric lookups are bit
probes.

*/

use std::collections::HashMap;

use crate::abstractions::{IString, NatSet};
use crate::core::program::Registry;

/// A square-or-rectangular 0/1 adjacency table over reference orderings.
#[derive(Clone, Debug)]
pub struct RelationTable {
  rows        : Vec<NatSet>,
  column_count: usize,
}

impl RelationTable {
  /// A square table over the universe ordering: `T[i][j]` set iff the pair
  /// `(universe[i], universe[j])` is declared.
  pub fn over_universe(registry: &Registry, pairs: &[(IString, IString)]) -> Self {
    let size = registry.len();
    let mut table = RelationTable {
      rows        : vec![NatSet::with_capacity(size); size],
      column_count: size,
    };
    for (from, to) in pairs {
      match (registry.position(from), registry.position(to)) {
        (Some(row), Some(column)) => {
          table.rows[row].insert(column);
        }
        _ => {} // foreign pair, excluded by validation
      }
    }
    table
  }

  /// A table with rows indexed by `domain` order and columns by `codomain`
  /// order, restricted to pairs inside `domain × codomain`.
  pub fn over_sets(domain: &[IString], codomain: &[IString], pairs: &[(IString, IString)]) -> Self {
    let row_of   : HashMap<&IString, usize> =
        domain.iter().enumerate().map(|(index, element)| (element, index)).collect();
    let column_of: HashMap<&IString, usize> =
        codomain.iter().enumerate().map(|(index, element)| (element, index)).collect();

    let mut table = RelationTable {
      rows        : vec![NatSet::with_capacity(codomain.len()); domain.len()],
      column_count: codomain.len(),
    };
    for (from, to) in pairs {
      if let (Some(&row), Some(&column)) = (row_of.get(from), column_of.get(to)) {
        table.rows[row].insert(column);
      }
    }
    table
  }

  #[inline(always)]
  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  #[inline(always)]
  pub fn column_count(&self) -> usize {
    self.column_count
  }

  #[inline(always)]
  pub fn contains(&self, row: usize, column: usize) -> bool {
    self.rows[row].contains(column)
  }

  /// The number of set cells in row `row`.
  fn row_degree(&self, row: usize) -> usize {
    self.rows[row].len()
  }

  /// The number of set cells in column `column`.
  fn column_degree(&self, column: usize) -> usize {
    self.rows.iter().filter(|row| row.contains(column)).count()
  }

  /// Every diagonal cell set. False for an empty relation over a non-empty
  /// universe; vacuously true over an empty one.
  pub fn is_reflexive(&self) -> bool {
    (0..self.row_count()).all(|index| self.contains(index, index))
  }

  pub fn is_symmetric(&self) -> bool {
    (0..self.row_count()).all(|i| {
      self.rows[i].iter().all(|j| self.contains(j, i))
    })
  }

  /// No distinct pair present in both directions.
  pub fn is_antisymmetric(&self) -> bool {
    (0..self.row_count()).all(|i| {
      self.rows[i].iter().all(|j| i == j || !self.contains(j, i))
    })
  }

  pub fn is_transitive(&self) -> bool {
    (0..self.row_count()).all(|i| {
      self.rows[i].iter().all(|j| {
        self.rows[j].iter().all(|k| self.contains(i, k))
      })
    })
  }

  /// At most one image per domain element.
  pub fn is_function(&self) -> bool {
    (0..self.row_count()).all(|row| self.row_degree(row) <= 1)
  }

  /// A function with at most one preimage per codomain element.
  pub fn is_injective(&self) -> bool {
    self.is_function()
        && (0..self.column_count()).all(|column| self.column_degree(column) <= 1)
  }

  /// A function with at least one preimage per codomain element.
  pub fn is_surjective(&self) -> bool {
    self.is_function()
        && (0..self.column_count()).all(|column| self.column_degree(column) >= 1)
  }

  pub fn is_bijective(&self) -> bool {
    self.is_injective() && self.is_surjective()
  }
}

/// Distinct first components of the declared pairs, in universe order.
pub fn domain(registry: &Registry, pairs: &[(IString, IString)]) -> Vec<IString> {
  project(registry, pairs.iter().map(|(from, _)| from))
}

/// Distinct second components of the declared pairs, in universe order.
pub fn codomain(registry: &Registry, pairs: &[(IString, IString)]) -> Vec<IString> {
  project(registry, pairs.iter().map(|(_, to)| to))
}

fn project<'a>(registry: &Registry, components: impl Iterator<Item = &'a IString>) -> Vec<IString> {
  let mut present = NatSet::with_capacity(registry.len());
  for component in components {
    if let Some(position) = registry.position(component) {
      present.insert(position);
    }
  }
  // NatSet iteration is increasing, which is exactly universe order.
  present.iter()
         .filter_map(|position| registry.element(position))
         .cloned()
         .collect()
}

#[cfg(test)]
mod tests {
  use rand::Rng;

  use super::*;

  fn elements(names: &[&str]) -> Vec<IString> {
    names.iter().map(|name| IString::from(*name)).collect()
  }

  fn pairs(list: &[(&str, &str)]) -> Vec<(IString, IString)> {
    list.iter()
        .map(|(a, b)| (IString::from(*a), IString::from(*b)))
        .collect()
  }

  fn registry() -> Registry {
    Registry::new(&elements(&["a", "b", "c"]))
  }

  #[test]
  fn empty_relation_vacuity() {
    let registry = registry();
    let table = RelationTable::over_universe(&registry, &[]);
    assert!(table.is_function());
    assert!(table.is_symmetric());
    assert!(table.is_antisymmetric());
    assert!(table.is_transitive());
    // Reflexivity fails whenever the universe is non-empty.
    assert!(!table.is_reflexive());

    let empty_registry = Registry::new(&[]);
    let empty_table = RelationTable::over_universe(&empty_registry, &[]);
    assert!(empty_table.is_reflexive());
  }

  #[test]
  fn reflexive_symmetric_transitive() {
    let registry = registry();
    let identity = RelationTable::over_universe(
      &registry,
      &pairs(&[("a", "a"), ("b", "b"), ("c", "c")]),
    );
    assert!(identity.is_reflexive());
    assert!(identity.is_symmetric());
    assert!(identity.is_antisymmetric());
    assert!(identity.is_transitive());
    assert!(identity.is_function());

    let undirected = RelationTable::over_universe(&registry, &pairs(&[("a", "b"), ("b", "a")]));
    assert!(undirected.is_symmetric());
    assert!(!undirected.is_antisymmetric());
    assert!(!undirected.is_transitive()); // (a,b),(b,a) but no (a,a)
    assert!(!undirected.is_reflexive());

    let chain = RelationTable::over_universe(&registry, &pairs(&[("a", "b"), ("b", "c")]));
    assert!(!chain.is_symmetric());
    assert!(chain.is_antisymmetric());
    assert!(!chain.is_transitive());
  }

  #[test]
  fn function_and_bijection_family() {
    let s1 = elements(&["a", "b"]);
    let s2 = elements(&["b", "c"]);

    let swap = RelationTable::over_sets(&s1, &s2, &pairs(&[("a", "c"), ("b", "b")]));
    assert!(swap.is_function());
    assert!(swap.is_injective());
    assert!(swap.is_surjective());
    assert!(swap.is_bijective());

    let collapse = RelationTable::over_sets(&s1, &s2, &pairs(&[("a", "b"), ("b", "b")]));
    assert!(collapse.is_function());
    assert!(!collapse.is_injective()); // two preimages of b
    assert!(!collapse.is_surjective()); // c uncovered
    assert!(!collapse.is_bijective());

    let partial = RelationTable::over_sets(&s1, &s2, &pairs(&[("a", "b")]));
    assert!(partial.is_injective());
    assert!(!partial.is_surjective());

    let split = RelationTable::over_sets(&s1, &s2, &pairs(&[("a", "b"), ("a", "c")]));
    assert!(!split.is_function());
    assert!(!split.is_injective());
    assert!(!split.is_surjective());
  }

  #[test]
  fn restriction_ignores_pairs_outside_the_product() {
    let s1 = elements(&["a"]);
    let s2 = elements(&["b"]);
    // (c, c) is outside s1 × s2 and must not influence the verdict.
    let table = RelationTable::over_sets(&s1, &s2, &pairs(&[("a", "b"), ("c", "c")]));
    assert!(table.is_bijective());
  }

  #[test]
  fn bijective_iff_injective_and_surjective() {
    let registry = Registry::new(&elements(&["a", "b", "c", "d"]));
    let names: Vec<IString> = registry.iter().cloned().collect();
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
      let mut random_pairs = Vec::new();
      for from in &names {
        for to in &names {
          if rng.gen_bool(0.3) {
            random_pairs.push((from.clone(), to.clone()));
          }
        }
      }
      let s1: Vec<IString> = names.iter().filter(|_| rng.gen_bool(0.7)).cloned().collect();
      let s2: Vec<IString> = names.iter().filter(|_| rng.gen_bool(0.7)).cloned().collect();
      let table = RelationTable::over_sets(&s1, &s2, &random_pairs);
      assert_eq!(
        table.is_bijective(),
        table.is_injective() && table.is_surjective()
      );
    }
  }

  #[test]
  fn domain_and_codomain_in_universe_order() {
    let registry = registry();
    let declared = pairs(&[("c", "a"), ("a", "a"), ("c", "b")]);
    assert_eq!(domain(&registry, &declared), elements(&["a", "c"]));
    assert_eq!(codomain(&registry, &declared), elements(&["a", "b"]));
    assert!(domain(&registry, &[]).is_empty());
  }
}
