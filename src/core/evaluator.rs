/*!

The evaluator: a single left-to-right pass over the command arena.

Declarations are skipped (their values already live in the arena and the
registry). Each invocation has its operands resolved by 1-based line index —
possibly picking up the materialized result of an earlier invocation — is
dispatched on its catalog opcode, and is overwritten in place with its result.
A later command can therefore read an earlier command's result but never the
reverse, so the pass needs no bookkeeping beyond its cursor.

Validation runs first, so the operand checks here are defensive re-checks: a
failure indicates a contract breach between the validator and the evaluator,
and is just as fatal.

*/

use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::IString;
use crate::core::{
  catalog::{find_operation, OpCode, Signature, ValueKind},
  command::{Command, Value},
  program::{Program, Registry},
  relation::{self, RelationTable},
  set_ops,
};
use crate::debug;

/// A fatal evaluation failure. Unreachable for a validated program.
#[derive(Clone, Eq, PartialEq)]
pub enum EvalError {
  UnknownOperation { line: usize, name: IString },
  ArityMismatch { line: usize, name: IString, expected: Signature, found: usize },
  UnresolvedOperand { line: usize, index: usize },
  OperandKindMismatch { line: usize, index: usize, expected: ValueKind },
}

impl Display for EvalError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      EvalError::UnknownOperation { line, name } => {
        write!(f, "line {}: unknown operation {:?} reached evaluation", line, &**name)
      }

      EvalError::ArityMismatch { line, name, expected, found } => {
        write!(
          f,
          "line {}: operation {:?} takes {}, but {} operand(s) reached evaluation",
          line, &**name, expected, found
        )
      }

      EvalError::UnresolvedOperand { line, index } => {
        write!(f, "line {}: operand index {} does not address an evaluable value", line, index)
      }

      EvalError::OperandKindMismatch { line, index, expected } => {
        write!(f, "line {}: operand index {} did not resolve to a {}", line, index, expected)
      }

    }
  }
}

impl Debug for EvalError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl std::error::Error for EvalError {}

/// A resolved operand: a snapshot of the addressed command's value.
enum Operand {
  Set(Vec<IString>),
  Relation(Vec<(IString, IString)>),
}

impl Operand {
  fn as_set(&self) -> Option<&[IString]> {
    match self {
      Operand::Set(elements) => Some(elements),
      Operand::Relation(_)   => None,
    }
  }

  fn as_relation(&self) -> Option<&[(IString, IString)]> {
    match self {
      Operand::Relation(pairs) => Some(pairs),
      Operand::Set(_)          => None,
    }
  }
}

/// Evaluates every invocation in place, in declaration order.
pub fn evaluate(program: &mut Program) -> Result<(), EvalError> {
  let registry = program.build_registry();

  for line in 1..=program.len() {
    let (operation, operands) = match program.line(line) {
      Some(Command::Invocation { operation, operands }) => (operation.clone(), operands.clone()),
      _ => continue, // scanning: declarations and already-materialized results
    };

    let value = evaluate_invocation(program, &registry, line, &operation, &operands)?;
    debug!(2, "line {}: {} -> {}", line, operation, value);
    program.replace_line(line, Command::Result(value));
  }
  Ok(())
}

fn evaluate_invocation(
  program  : &Program,
  registry : &Registry,
  line     : usize,
  operation: &IString,
  operands : &[usize],
) -> Result<Value, EvalError> {
  let cataloged = match find_operation(operation) {
    Some(cataloged) => cataloged,
    None => return Err(EvalError::UnknownOperation { line, name: operation.clone() }),
  };

  if !cataloged.signature.accepts_count(operands.len()) {
    return Err(EvalError::ArityMismatch {
      line,
      name    : operation.clone(),
      expected: cataloged.signature,
      found   : operands.len(),
    });
  }

  let mut resolved = Vec::with_capacity(operands.len());
  for (slot, &index) in operands.iter().enumerate() {
    let operand  = resolve(program, line, index)?;
    let expected = cataloged.signature.slot_kind(slot);
    let matches  = match expected {
      ValueKind::Set      => operand.as_set().is_some(),
      ValueKind::Relation => operand.as_relation().is_some(),
      _                   => false,
    };
    if !matches {
      return Err(EvalError::OperandKindMismatch { line, index, expected });
    }
    resolved.push(operand);
  }

  Ok(dispatch(registry, cataloged.code, &resolved))
}

/// Resolves one operand index to a snapshot of the addressed value. The
/// address must be strictly earlier than the invoking line; an invocation that
/// has not been rewritten yet has no value.
fn resolve(program: &Program, line: usize, index: usize) -> Result<Operand, EvalError> {
  if index == 0 || index >= line {
    return Err(EvalError::UnresolvedOperand { line, index });
  }
  match program.line(index) {
    Some(Command::Set(elements))            => Ok(Operand::Set(elements.clone())),
    Some(Command::Relation(pairs))          => Ok(Operand::Relation(pairs.clone())),
    Some(Command::Result(Value::Set(elements))) => Ok(Operand::Set(elements.clone())),
    _ => Err(EvalError::UnresolvedOperand { line, index }),
  }
}

/// Dispatches to the algebra routine for `code`. Operand kinds and counts were
/// checked against the signature, so the slot accesses here cannot fail.
fn dispatch(registry: &Registry, code: OpCode, operands: &[Operand]) -> Value {
  // Slot accessors local to dispatch; the signature check guarantees them.
  let set      = |slot: usize| operands[slot].as_set().unwrap_or(&[]);
  let relation = |slot: usize| operands[slot].as_relation().unwrap_or(&[]);
  let sets: Vec<&[IString]> = operands.iter().filter_map(Operand::as_set).collect();

  match code {
    OpCode::Empty        => Value::Bool(set_ops::is_empty(set(0))),
    OpCode::Card         => Value::Count(set_ops::cardinality(set(0))),
    OpCode::Complement   => Value::Set(set_ops::complement(registry, set(0))),
    OpCode::Union        => Value::Set(set_ops::union(registry, &sets)),
    OpCode::Intersect    => Value::Set(set_ops::intersection(registry, &sets)),
    OpCode::Minus        => Value::Set(set_ops::difference(registry, set(0), set(1))),
    OpCode::SubsetEq     => Value::Bool(set_ops::is_subset_or_equal(registry, set(0), set(1))),
    OpCode::ProperSubset => Value::Bool(set_ops::is_proper_subset(registry, set(0), set(1))),
    OpCode::Equals       => Value::Bool(set_ops::is_equal(registry, set(0), set(1))),

    OpCode::Reflexive     => {
      Value::Bool(RelationTable::over_universe(registry, relation(0)).is_reflexive())
    }
    OpCode::Symmetric     => {
      Value::Bool(RelationTable::over_universe(registry, relation(0)).is_symmetric())
    }
    OpCode::Antisymmetric => {
      Value::Bool(RelationTable::over_universe(registry, relation(0)).is_antisymmetric())
    }
    OpCode::Transitive    => {
      Value::Bool(RelationTable::over_universe(registry, relation(0)).is_transitive())
    }
    OpCode::Function      => {
      Value::Bool(RelationTable::over_universe(registry, relation(0)).is_function())
    }
    OpCode::Domain        => Value::Set(relation::domain(registry, relation(0))),
    OpCode::Codomain      => Value::Set(relation::codomain(registry, relation(0))),

    OpCode::Injective  => {
      Value::Bool(RelationTable::over_sets(set(1), set(2), relation(0)).is_injective())
    }
    OpCode::Surjective => {
      Value::Bool(RelationTable::over_sets(set(1), set(2), relation(0)).is_surjective())
    }
    OpCode::Bijective  => {
      Value::Bool(RelationTable::over_sets(set(1), set(2), relation(0)).is_bijective())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::validator::validate;

  fn program(lines: &[&str]) -> Program {
    let mut program = Program::new();
    for line in lines {
      let tokens: Vec<&str> = line.split_whitespace().collect();
      program.push(Command::from_tokens(&tokens).expect("test line failed to parse"));
    }
    program
  }

  fn run(lines: &[&str]) -> Program {
    let mut built = program(lines);
    validate(&built).expect("test program failed validation");
    evaluate(&mut built).expect("test program failed evaluation");
    built
  }

  #[test]
  fn rewrites_invocations_in_place() {
    let evaluated = run(&["U a b c", "S a b", "S b c", "C union 2 3"]);
    assert_eq!(evaluated.line(4), Some(&Command::Result(Value::Set(vec![
      "a".into(), "b".into(), "c".into(),
    ]))));
    // Declarations stay untouched.
    assert_eq!(evaluated.line(2), Some(&Command::Set(vec!["a".into(), "b".into()])));
  }

  #[test]
  fn later_invocations_read_earlier_results() {
    let evaluated = run(&[
      "U a b c",
      "S a",
      "C complement 2",  // S b c
      "C card 3",        // 2
      "C union 2 3",     // S a b c
      "C equals 5 5",    // true
    ]);
    assert_eq!(evaluated.line(3), Some(&Command::Result(Value::Set(vec!["b".into(), "c".into()]))));
    assert_eq!(evaluated.line(4), Some(&Command::Result(Value::Count(2))));
    assert_eq!(
      evaluated.line(5),
      Some(&Command::Result(Value::Set(vec!["a".into(), "b".into(), "c".into()])))
    );
    assert_eq!(evaluated.line(6), Some(&Command::Result(Value::Bool(true))));
  }

  #[test]
  fn relation_predicates_dispatch() {
    let evaluated = run(&[
      "U a b",
      "R a a b b",
      "C reflexive 2",
      "C symmetric 2",
      "C function 2",
      "C domain 2",
    ]);
    assert_eq!(evaluated.line(3), Some(&Command::Result(Value::Bool(true))));
    assert_eq!(evaluated.line(4), Some(&Command::Result(Value::Bool(true))));
    assert_eq!(evaluated.line(5), Some(&Command::Result(Value::Bool(true))));
    assert_eq!(
      evaluated.line(6),
      Some(&Command::Result(Value::Set(vec!["a".into(), "b".into()])))
    );
  }

  #[test]
  fn explicit_pair_contract_for_bijectivity() {
    let evaluated = run(&[
      "U a b c d",
      "R a c b d",
      "S a b",
      "S c d",
      "C injective 2 3 4",
      "C surjective 2 3 4",
      "C bijective 2 3 4",
    ]);
    assert_eq!(evaluated.line(5), Some(&Command::Result(Value::Bool(true))));
    assert_eq!(evaluated.line(6), Some(&Command::Result(Value::Bool(true))));
    assert_eq!(evaluated.line(7), Some(&Command::Result(Value::Bool(true))));
  }

  #[test]
  fn defensive_checks_fire_on_unvalidated_programs() {
    // These programs would never pass validation; the evaluator still refuses them.
    let mut unresolved = program(&["U a", "S a", "C empty 9"]);
    assert!(matches!(
      evaluate(&mut unresolved),
      Err(EvalError::UnresolvedOperand { line: 3, index: 9 })
    ));

    let mut kind_confusion = program(&["U a", "S a", "C reflexive 2"]);
    assert!(matches!(
      evaluate(&mut kind_confusion),
      Err(EvalError::OperandKindMismatch { line: 3, index: 2, expected: ValueKind::Relation })
    ));

    let mut unknown = program(&["U a", "S a", "C frobnicate 2"]);
    assert!(matches!(
      evaluate(&mut unknown),
      Err(EvalError::UnknownOperation { line: 3, .. })
    ));

    let mut starved = program(&["U a", "S a", "C union 2"]);
    assert!(matches!(
      evaluate(&mut starved),
      Err(EvalError::ArityMismatch { line: 3, found: 1, .. })
    ));
  }
}
