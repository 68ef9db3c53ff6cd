/*!

A `Program` owns the whole command sequence. It is an arena in the
index-addressed sense: commands are appended during construction, addressed by
their stable 1-based line number forever after, and mutated in place (exactly
once, invocation to result) during evaluation. Nothing is ever removed, so an
operand index never changes meaning.

The `Registry` is the derived read-only view the algebra works against: the
universe in declaration order plus an element-to-position map. It is built once
after validation; the universe line is immutable, so it never needs rebuilding.

*/

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::abstractions::{IString, NatSet};
use crate::core::command::Command;

#[derive(Clone, Default, Debug)]
pub struct Program {
  commands: Vec<Command>,
}

impl Program {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_commands(commands: Vec<Command>) -> Self {
    Program { commands }
  }

  /// Appends a command, returning its 1-based line number.
  pub fn push(&mut self, command: Command) -> usize {
    self.commands.push(command);
    self.commands.len()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.commands.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.commands.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Command> {
    self.commands.iter()
  }

  /// The command at the given 1-based line number.
  pub fn line(&self, number: usize) -> Option<&Command> {
    if number == 0 {
      return None;
    }
    self.commands.get(number - 1)
  }

  /// In-place replacement of the command at the given 1-based line number.
  /// Used by the evaluator to materialize results; the slot keeps its address.
  pub(crate) fn replace_line(&mut self, number: usize, command: Command) {
    debug_assert!(number >= 1 && number <= self.commands.len());
    self.commands[number - 1] = command;
  }

  /// The universe's elements, if a universe command is present.
  pub fn universe(&self) -> Option<&[IString]> {
    self.commands.iter().find_map(|command| {
      match command {
        Command::Universe(elements) => Some(elements.as_slice()),
        _ => None,
      }
    })
  }

  /// Builds the derived registry. Call after validation; a program without a
  /// universe command yields an empty registry.
  pub fn build_registry(&self) -> Registry {
    match self.universe() {
      Some(elements) => Registry::new(elements),
      None           => Registry::default(),
    }
  }

  /// The evaluated listing, one line per command in original order.
  pub fn render(&self) -> String {
    self.to_string()
  }
}

impl Display for Program {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for command in &self.commands {
      writeln!(f, "{}", command)?;
    }
    Ok(())
  }
}

/// The universe as an ordered reference list plus a reverse index. Positions
/// into the registry are what `NatSet`s and adjacency tables are indexed by.
#[derive(Clone, Default, Debug)]
pub struct Registry {
  elements: Vec<IString>,
  index_of: HashMap<IString, usize>,
}

impl Registry {
  pub fn new(universe: &[IString]) -> Self {
    let elements: Vec<IString> = universe.to_vec();
    let index_of = elements.iter()
                           .enumerate()
                           .map(|(index, element)| (element.clone(), index))
                           .collect();
    Registry { elements, index_of }
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// The universe position of `element`, or `None` for a foreign element.
  pub fn position(&self, element: &IString) -> Option<usize> {
    self.index_of.get(element).copied()
  }

  pub fn element(&self, position: usize) -> Option<&IString> {
    self.elements.get(position)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, IString> {
    self.elements.iter()
  }

  /// The membership mask of `elements` over the universe. Foreign elements are
  /// not representable and are skipped; validation guarantees there are none.
  pub fn membership_mask(&self, elements: &[IString]) -> NatSet {
    elements.iter()
            .filter_map(|element| self.position(element))
            .collect()
  }
}
