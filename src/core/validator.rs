/*!

Whole-program validation. The validator is a pure function over the command
sequence and the operation catalog: it either accepts the program or reports
the *first* violated rule, with the rules checked in a fixed, documented order
so failure behavior is deterministic.

Rule order:

 1. sequence non-empty and at most `COMMAND_LIMIT` commands;
 2. exactly one universe command;
 3. every command kind recognized (structural: the closed `Command` enum makes
    an unrecognized kind unrepresentable; the token parser reports it instead);
 4. universe first, declarations before the first invocation, only invocations
    after it;
 5. at least one invocation;
 6. at least one set or relation declaration;
 7. at least two distinct command kinds present;
 8. universe element hygiene;
 9. set/relation contents drawn from the universe, duplicate-free;
10. invocations well-formed against the catalog and their operand references.

Validation runs before anything is evaluated; the evaluator can assume a
structurally and semantically sound program.

*/

use std::fmt::{Debug, Display, Formatter};

use enumflags2::BitFlags;

use crate::abstractions::{IString, NatSet};
use crate::core::{
  catalog::{find_operation, is_operation_name, Signature, ValueKind},
  command::{Command, CommandKind},
  program::{Program, Registry},
};

/// Upper bound on the number of commands in one program.
pub const COMMAND_LIMIT: usize = 1000;
/// Upper bound on the length of one universe element, in characters.
pub const MAX_ELEMENT_LENGTH: usize = 30;

/// The first violated rule, with enough context to point at the offending
/// command.
#[derive(Clone, Eq, PartialEq)]
pub enum ValidationError {
  // Rule 1
  EmptyProgram,
  TooManyCommands { count: usize },
  // Rule 2
  MissingUniverse,
  DuplicateUniverse { line: usize },
  // Rule 4
  UniverseNotFirst { line: usize },
  MisplacedDeclaration { line: usize, kind: CommandKind },
  // Rule 5
  MissingInvocation,
  // Rule 6
  MissingDeclarations,
  // Rule 7
  TooFewKinds { found: usize },
  // Rule 8
  ElementTooLong { line: usize, element: IString },
  IllegalCharacter { line: usize, element: IString },
  ReservedLiteral { line: usize, element: IString },
  OperationNameAsElement { line: usize, element: IString },
  DuplicateUniverseElement { line: usize, element: IString },
  // Rule 9
  ForeignElement { line: usize, element: IString },
  DuplicateSetElement { line: usize, element: IString },
  DuplicatePair { line: usize, pair: (IString, IString) },
  // Rule 10
  UnknownOperation { line: usize, name: IString },
  WrongOperandCount { line: usize, name: IString, expected: Signature, found: usize },
  OperandOutOfRange { line: usize, index: usize },
  ForwardReference { line: usize, index: usize },
  OperandKindMismatch { line: usize, index: usize, expected: ValueKind },
}

impl Display for ValidationError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      ValidationError::EmptyProgram => {
        write!(f, "program contains no commands")
      }

      ValidationError::TooManyCommands { count } => {
        write!(f, "program contains {} commands, more than the limit of {}", count, COMMAND_LIMIT)
      }

      ValidationError::MissingUniverse => {
        write!(f, "program declares no universe")
      }

      ValidationError::DuplicateUniverse { line } => {
        write!(f, "line {}: a second universe declaration; exactly one is allowed", line)
      }

      ValidationError::UniverseNotFirst { line } => {
        write!(f, "line {}: the universe declaration must be the first command", line)
      }

      ValidationError::MisplacedDeclaration { line, kind } => {
        write!(f, "line {}: {} declaration after the first invocation", line, kind)
      }

      ValidationError::MissingInvocation => {
        write!(f, "program contains no invocation commands")
      }

      ValidationError::MissingDeclarations => {
        write!(
          f,
          "program must contain at least two distinct command kinds: a universe and at least one set or relation declaration"
        )
      }

      ValidationError::TooFewKinds { found } => {
        write!(f, "program uses {} command kind(s); at least two are required", found)
      }

      ValidationError::ElementTooLong { line, element } => {
        write!(
          f,
          "line {}: universe element {:?} is longer than {} characters",
          line, &**element, MAX_ELEMENT_LENGTH
        )
      }

      ValidationError::IllegalCharacter { line, element } => {
        write!(
          f,
          "line {}: universe element {:?} contains a character that is not alphabetic or a space",
          line, &**element
        )
      }

      ValidationError::ReservedLiteral { line, element } => {
        write!(f, "line {}: universe element {:?} is a reserved literal", line, &**element)
      }

      ValidationError::OperationNameAsElement { line, element } => {
        write!(f, "line {}: universe element {:?} is an operation name", line, &**element)
      }

      ValidationError::DuplicateUniverseElement { line, element } => {
        write!(f, "line {}: universe element {:?} is declared twice", line, &**element)
      }

      ValidationError::ForeignElement { line, element } => {
        write!(f, "line {}: element {:?} is not in the universe", line, &**element)
      }

      ValidationError::DuplicateSetElement { line, element } => {
        write!(f, "line {}: element {:?} repeats within one set", line, &**element)
      }

      ValidationError::DuplicatePair { line, pair } => {
        write!(
          f,
          "line {}: pair ({} {}) repeats within one relation",
          line, &*pair.0, &*pair.1
        )
      }

      ValidationError::UnknownOperation { line, name } => {
        write!(f, "line {}: unknown operation {:?}", line, &**name)
      }

      ValidationError::WrongOperandCount { line, name, expected, found } => {
        write!(
          f,
          "line {}: operation {:?} takes {}, but {} operand(s) were supplied",
          line, &**name, expected, found
        )
      }

      ValidationError::OperandOutOfRange { line, index } => {
        write!(f, "line {}: operand index {} does not address any command", line, index)
      }

      ValidationError::ForwardReference { line, index } => {
        write!(f, "line {}: operand index {} does not address an earlier command", line, index)
      }

      ValidationError::OperandKindMismatch { line, index, expected } => {
        write!(
          f,
          "line {}: operand index {} does not address a {}-valued command",
          line, index, expected
        )
      }

    } // end match on `ValidationError`
  }
}

impl Debug for ValidationError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl std::error::Error for ValidationError {}

/// Accepts the program or reports the first violated rule.
pub fn validate(program: &Program) -> Result<(), ValidationError> {
  check_size(program)?;
  check_universe_count(program)?;
  check_ordering(program)?;
  check_population(program)?;
  check_universe_hygiene(program)?;

  let registry = program.build_registry();
  check_declaration_contents(program, &registry)?;
  check_invocations(program)?;

  Ok(())
}

// Rule 1
fn check_size(program: &Program) -> Result<(), ValidationError> {
  if program.is_empty() {
    return Err(ValidationError::EmptyProgram);
  }
  if program.len() > COMMAND_LIMIT {
    return Err(ValidationError::TooManyCommands { count: program.len() });
  }
  Ok(())
}

// Rule 2
fn check_universe_count(program: &Program) -> Result<(), ValidationError> {
  let mut first_seen = None;
  for (position, command) in program.iter().enumerate() {
    if let Command::Universe(_) = command {
      match first_seen {
        None    => first_seen = Some(position + 1),
        Some(_) => return Err(ValidationError::DuplicateUniverse { line: position + 1 }),
      }
    }
  }
  match first_seen {
    Some(_) => Ok(()),
    None    => Err(ValidationError::MissingUniverse),
  }
}

// Rule 4
fn check_ordering(program: &Program) -> Result<(), ValidationError> {
  let mut invocation_seen = false;
  for (position, command) in program.iter().enumerate() {
    let line = position + 1;
    match command.kind() {
      CommandKind::Universe => {
        if line != 1 {
          return Err(ValidationError::UniverseNotFirst { line });
        }
      }
      kind @ (CommandKind::Set | CommandKind::Relation) => {
        if invocation_seen {
          return Err(ValidationError::MisplacedDeclaration { line, kind });
        }
      }
      CommandKind::Invocation => {
        invocation_seen = true;
      }
    }
  }
  Ok(())
}

// Rules 5, 6, 7
fn check_population(program: &Program) -> Result<(), ValidationError> {
  let mut kinds_present: BitFlags<CommandKind> = BitFlags::empty();
  for command in program.iter() {
    kinds_present |= command.kind();
  }

  if !kinds_present.contains(CommandKind::Invocation) {
    return Err(ValidationError::MissingInvocation);
  }
  if !kinds_present.contains(CommandKind::Set) && !kinds_present.contains(CommandKind::Relation) {
    return Err(ValidationError::MissingDeclarations);
  }
  let found = kinds_present.iter().count();
  if found < 2 {
    return Err(ValidationError::TooFewKinds { found });
  }
  Ok(())
}

// Rule 8
fn check_universe_hygiene(program: &Program) -> Result<(), ValidationError> {
  // The universe is at line 1 by the ordering rule.
  let line = 1;
  let elements = match program.universe() {
    Some(elements) => elements,
    None           => return Ok(()), // unreachable after rule 2
  };

  let mut seen = std::collections::HashSet::new();
  for element in elements {
    let text: &str = &**element;
    if text.chars().count() > MAX_ELEMENT_LENGTH {
      return Err(ValidationError::ElementTooLong { line, element: element.clone() });
    }
    if !text.chars().all(|c| c.is_alphabetic() || c == ' ') {
      return Err(ValidationError::IllegalCharacter { line, element: element.clone() });
    }
    if text == "true" || text == "false" {
      return Err(ValidationError::ReservedLiteral { line, element: element.clone() });
    }
    if is_operation_name(text) {
      return Err(ValidationError::OperationNameAsElement { line, element: element.clone() });
    }
    if !seen.insert(element.clone()) {
      return Err(ValidationError::DuplicateUniverseElement { line, element: element.clone() });
    }
  }
  Ok(())
}

// Rule 9
fn check_declaration_contents(program: &Program, registry: &Registry) -> Result<(), ValidationError> {
  for (position, command) in program.iter().enumerate() {
    let line = position + 1;
    match command {

      Command::Set(elements) => {
        let mut seen = NatSet::with_capacity(registry.len());
        for element in elements {
          let universe_position = match registry.position(element) {
            Some(universe_position) => universe_position,
            None => return Err(ValidationError::ForeignElement { line, element: element.clone() }),
          };
          if !seen.insert(universe_position) {
            return Err(ValidationError::DuplicateSetElement { line, element: element.clone() });
          }
        }
      }

      Command::Relation(pairs) => {
        // Pairs are flattened to `from * |universe| + to` so duplicate pairs
        // are one NatSet probe.
        let size = registry.len();
        let mut seen = NatSet::with_capacity(size * size);
        for (from, to) in pairs {
          let from_position = match registry.position(from) {
            Some(from_position) => from_position,
            None => return Err(ValidationError::ForeignElement { line, element: from.clone() }),
          };
          let to_position = match registry.position(to) {
            Some(to_position) => to_position,
            None => return Err(ValidationError::ForeignElement { line, element: to.clone() }),
          };
          if !seen.insert(from_position * size + to_position) {
            return Err(ValidationError::DuplicatePair {
              line,
              pair: (from.clone(), to.clone()),
            });
          }
        }
      }

      _ => {}
    }
  }
  Ok(())
}

// Rule 10
fn check_invocations(program: &Program) -> Result<(), ValidationError> {
  for (position, command) in program.iter().enumerate() {
    let line = position + 1;
    let (operation, operands) = match command {
      Command::Invocation { operation, operands } => (operation, operands),
      _ => continue,
    };

    let cataloged = match find_operation(operation) {
      Some(cataloged) => cataloged,
      None => return Err(ValidationError::UnknownOperation { line, name: operation.clone() }),
    };

    if !cataloged.signature.accepts_count(operands.len()) {
      return Err(ValidationError::WrongOperandCount {
        line,
        name    : operation.clone(),
        expected: cataloged.signature,
        found   : operands.len(),
      });
    }

    for (slot, &index) in operands.iter().enumerate() {
      if index == 0 || index > program.len() {
        return Err(ValidationError::OperandOutOfRange { line, index });
      }
      if index >= line {
        return Err(ValidationError::ForwardReference { line, index });
      }
      let expected = cataloged.signature.slot_kind(slot);
      // Earlier invocations were already checked, so `value_kind` resolves.
      let found = program.line(index).and_then(Command::value_kind);
      if found != Some(expected) {
        return Err(ValidationError::OperandKindMismatch { line, index, expected });
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::command::ParseError;

  fn program(lines: &[&str]) -> Program {
    let mut program = Program::new();
    for line in lines {
      let tokens: Vec<&str> = line.split_whitespace().collect();
      let command = Command::from_tokens(&tokens).unwrap_or_else(|fault: ParseError| {
        panic!("test line {:?} failed to parse: {}", line, fault)
      });
      program.push(command);
    }
    program
  }

  #[test]
  fn accepts_a_sound_program() {
    let sound = program(&[
      "U a b c",
      "S a b",
      "R a a b b",
      "C union 2 2",
      "C reflexive 3",
      "C card 4",
    ]);
    assert_eq!(validate(&sound), Ok(()));
  }

  #[test]
  fn rejects_empty_and_oversized_programs() {
    assert_eq!(validate(&Program::new()), Err(ValidationError::EmptyProgram));

    let mut oversized = program(&["U a", "S a"]);
    for _ in 0..COMMAND_LIMIT {
      oversized.push(Command::Invocation { operation: "empty".into(), operands: vec![2] });
    }
    assert!(matches!(validate(&oversized), Err(ValidationError::TooManyCommands { .. })));
  }

  #[test]
  fn rejects_two_universe_lines() {
    let doubled = program(&["U a b", "U b c", "S a", "C empty 3"]);
    assert_eq!(validate(&doubled), Err(ValidationError::DuplicateUniverse { line: 2 }));
  }

  #[test]
  fn rejects_set_before_universe() {
    let inverted = program(&["S a", "U a b", "C empty 1"]);
    assert_eq!(validate(&inverted), Err(ValidationError::UniverseNotFirst { line: 2 }));
  }

  #[test]
  fn rejects_set_after_invocation() {
    let trailing = program(&["U a b", "S a", "C empty 2", "S b"]);
    assert_eq!(
      validate(&trailing),
      Err(ValidationError::MisplacedDeclaration { line: 4, kind: CommandKind::Set })
    );
  }

  #[test]
  fn rejects_missing_invocation_and_missing_declarations() {
    let inert = program(&["U a b", "S a"]);
    assert_eq!(validate(&inert), Err(ValidationError::MissingInvocation));

    let bare = program(&["U a", "C empty 1"]);
    assert_eq!(validate(&bare), Err(ValidationError::MissingDeclarations));
    let message = ValidationError::MissingDeclarations.to_string();
    assert!(message.contains("must contain at least two distinct command kinds"));
  }

  #[test]
  fn rejects_unhygienic_universe_elements() {
    let too_long = "x".repeat(MAX_ELEMENT_LENGTH + 1);
    let overlong = program(&[&format!("U a {}", too_long), "S a", "C empty 2"]);
    assert!(matches!(validate(&overlong), Err(ValidationError::ElementTooLong { line: 1, .. })));

    let frontier = "y".repeat(MAX_ELEMENT_LENGTH);
    let at_limit = program(&[&format!("U a {}", frontier), "S a", "C empty 2"]);
    assert_eq!(validate(&at_limit), Ok(()));

    let digits = program(&["U a b2", "S a", "C empty 2"]);
    assert!(matches!(validate(&digits), Err(ValidationError::IllegalCharacter { .. })));

    let reserved = program(&["U a true", "S a", "C empty 2"]);
    assert!(matches!(validate(&reserved), Err(ValidationError::ReservedLiteral { .. })));

    let colliding = program(&["U a union", "S a", "C empty 2"]);
    assert!(matches!(validate(&colliding), Err(ValidationError::OperationNameAsElement { .. })));

    let doubled = program(&["U a a", "S a", "C empty 2"]);
    assert!(matches!(validate(&doubled), Err(ValidationError::DuplicateUniverseElement { .. })));
  }

  #[test]
  fn rejects_foreign_and_repeated_declaration_contents() {
    let foreign = program(&["U a b", "S a z", "C empty 2"]);
    assert!(matches!(
      validate(&foreign),
      Err(ValidationError::ForeignElement { line: 2, .. })
    ));

    let repeated = program(&["U a b", "S a a", "C empty 2"]);
    assert!(matches!(validate(&repeated), Err(ValidationError::DuplicateSetElement { .. })));

    // A repeated element across pairs is legal; a repeated pair is not.
    let shared_element = program(&["U a b", "R a a a b", "C reflexive 2"]);
    assert_eq!(validate(&shared_element), Ok(()));

    let repeated_pair = program(&["U a b", "R a b a b", "C reflexive 2"]);
    assert!(matches!(validate(&repeated_pair), Err(ValidationError::DuplicatePair { .. })));
  }

  #[test]
  fn rejects_ill_formed_invocations() {
    let unknown = program(&["U a b", "S a", "C frobnicate 2"]);
    assert!(matches!(validate(&unknown), Err(ValidationError::UnknownOperation { line: 3, .. })));

    let wrong_count = program(&["U a b", "S a", "C union 2"]);
    assert!(matches!(
      validate(&wrong_count),
      Err(ValidationError::WrongOperandCount { line: 3, found: 1, .. })
    ));

    let out_of_range = program(&["U a b", "S a", "C empty 9"]);
    assert!(matches!(
      validate(&out_of_range),
      Err(ValidationError::OperandOutOfRange { line: 3, index: 9 })
    ));

    let forward = program(&["U a b", "S a", "C empty 3"]);
    assert!(matches!(
      validate(&forward),
      Err(ValidationError::ForwardReference { line: 3, index: 3 })
    ));

    // The universe line is not addressable as an operand.
    let universe_operand = program(&["U a b", "S a", "C empty 1"]);
    assert!(matches!(
      validate(&universe_operand),
      Err(ValidationError::OperandKindMismatch { line: 3, index: 1, .. })
    ));

    // A set where a relation is expected.
    let kind_confusion = program(&["U a b", "S a", "C reflexive 2"]);
    assert!(matches!(
      validate(&kind_confusion),
      Err(ValidationError::OperandKindMismatch { line: 3, index: 2, .. })
    ));

    // A boolean-valued invocation result is not addressable as a set.
    let chained_bool = program(&["U a b", "S a", "C empty 2", "C card 3"]);
    assert!(matches!(
      validate(&chained_bool),
      Err(ValidationError::OperandKindMismatch { line: 4, index: 3, .. })
    ));

    // A set-valued invocation result is addressable as a set.
    let chained_set = program(&["U a b", "S a", "C complement 2", "C card 3"]);
    assert_eq!(validate(&chained_set), Ok(()));
  }
}
