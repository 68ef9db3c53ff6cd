/*!

The operation catalog: the immutable table of every operation the calculator
knows, keyed by surface name. Each entry carries a typed opcode for dispatch
and a signature describing how many operands the operation takes and of which
kind. The catalog is built once from a declarative const slice and treated as
process-wide configuration.

*/

use std::collections::HashMap;
use std::fmt::Display;

use once_cell::sync::Lazy;

/// How many operands an operation accepts.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Arity {
  /// At least two operands; the binary form is folded left-to-right.
  Variadic,
  Value(u8),
}

impl Arity {
  pub fn accepts(&self, count: usize) -> bool {
    match self {
      Arity::Variadic   => count >= 2,
      Arity::Value(val) => count == *val as usize,
    }
  }
}

impl Display for Arity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Arity::Variadic   => write!(f, "at least 2"),
      Arity::Value(val) => write!(f, "exactly {}", val),
    }
  }
}

/// The kind of value a command line yields when addressed as an operand, and
/// the kind a signature slot expects.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueKind {
  Set,
  Relation,
  Bool,
  Count,
}

impl Display for ValueKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValueKind::Set      => write!(f, "set"),
      ValueKind::Relation => write!(f, "relation"),
      ValueKind::Bool     => write!(f, "boolean"),
      ValueKind::Count    => write!(f, "count"),
    }
  }
}

/// The operand shape of an operation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Signature {
  /// Set operands only, with the given arity.
  Sets(Arity),
  /// Exactly one relation operand.
  Relation,
  /// One relation operand followed by a domain set and a codomain set.
  RelationWithSets,
}

impl Signature {
  pub fn accepts_count(&self, count: usize) -> bool {
    match self {
      Signature::Sets(arity)      => arity.accepts(count),
      Signature::Relation         => count == 1,
      Signature::RelationWithSets => count == 3,
    }
  }

  /// The kind expected in operand position `slot` (0-based).
  pub fn slot_kind(&self, slot: usize) -> ValueKind {
    match self {
      Signature::Sets(_)          => ValueKind::Set,
      Signature::Relation         => ValueKind::Relation,
      Signature::RelationWithSets => {
        if slot == 0 { ValueKind::Relation } else { ValueKind::Set }
      }
    }
  }
}

impl Display for Signature {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Signature::Sets(arity)      => write!(f, "{} set operand(s)", arity),
      Signature::Relation         => write!(f, "exactly 1 relation operand"),
      Signature::RelationWithSets => write!(f, "a relation operand and two set operands"),
    }
  }
}

/// Typed dispatch codes. Every dispatch site matches exhaustively on this enum,
/// so adding an operation without wiring its routine fails to compile.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum OpCode {
  // Set algebra
  Empty,
  Card,
  Complement,
  Union,
  Intersect,
  Minus,
  SubsetEq,
  ProperSubset,
  Equals,
  // Relation algebra
  Reflexive,
  Symmetric,
  Antisymmetric,
  Transitive,
  Function,
  Domain,
  Codomain,
  Injective,
  Surjective,
  Bijective,
}

impl OpCode {
  /// The kind of value the operation produces.
  pub fn result_kind(&self) -> ValueKind {
    match self {
      OpCode::Card => ValueKind::Count,

      OpCode::Complement
      | OpCode::Union
      | OpCode::Intersect
      | OpCode::Minus
      | OpCode::Domain
      | OpCode::Codomain => ValueKind::Set,

      OpCode::Empty
      | OpCode::SubsetEq
      | OpCode::ProperSubset
      | OpCode::Equals
      | OpCode::Reflexive
      | OpCode::Symmetric
      | OpCode::Antisymmetric
      | OpCode::Transitive
      | OpCode::Function
      | OpCode::Injective
      | OpCode::Surjective
      | OpCode::Bijective => ValueKind::Bool,
    }
  }
}

/// An immutable catalog entry.
#[derive(Copy, Clone, Debug)]
pub struct Operation {
  pub name     : &'static str,
  pub code     : OpCode,
  pub signature: Signature,
}

impl Display for Operation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({})", self.name, self.signature)
  }
}

/// Every operation the calculator implements, in catalog order.
pub static OPERATIONS: &[Operation] = &[
  Operation { name: "empty",         code: OpCode::Empty,         signature: Signature::Sets(Arity::Value(1)) },
  Operation { name: "card",          code: OpCode::Card,          signature: Signature::Sets(Arity::Value(1)) },
  Operation { name: "complement",    code: OpCode::Complement,    signature: Signature::Sets(Arity::Value(1)) },
  Operation { name: "union",         code: OpCode::Union,         signature: Signature::Sets(Arity::Variadic) },
  Operation { name: "intersect",     code: OpCode::Intersect,     signature: Signature::Sets(Arity::Variadic) },
  Operation { name: "minus",         code: OpCode::Minus,         signature: Signature::Sets(Arity::Value(2)) },
  Operation { name: "subseteq",      code: OpCode::SubsetEq,      signature: Signature::Sets(Arity::Value(2)) },
  Operation { name: "subset",        code: OpCode::ProperSubset,  signature: Signature::Sets(Arity::Value(2)) },
  Operation { name: "equals",        code: OpCode::Equals,        signature: Signature::Sets(Arity::Value(2)) },
  Operation { name: "reflexive",     code: OpCode::Reflexive,     signature: Signature::Relation },
  Operation { name: "symmetric",     code: OpCode::Symmetric,     signature: Signature::Relation },
  Operation { name: "antisymmetric", code: OpCode::Antisymmetric, signature: Signature::Relation },
  Operation { name: "transitive",    code: OpCode::Transitive,    signature: Signature::Relation },
  Operation { name: "function",      code: OpCode::Function,      signature: Signature::Relation },
  Operation { name: "domain",        code: OpCode::Domain,        signature: Signature::Relation },
  Operation { name: "codomain",      code: OpCode::Codomain,      signature: Signature::Relation },
  Operation { name: "injective",     code: OpCode::Injective,     signature: Signature::RelationWithSets },
  Operation { name: "surjective",    code: OpCode::Surjective,    signature: Signature::RelationWithSets },
  Operation { name: "bijective",     code: OpCode::Bijective,     signature: Signature::RelationWithSets },
];

static CATALOG: Lazy<HashMap<&'static str, &'static Operation>> = Lazy::new(|| {
  OPERATIONS.iter().map(|op| (op.name, op)).collect()
});

/// Finds an operation by name.
pub fn find_operation(name: &str) -> Option<&'static Operation> {
  CATALOG.get(name).copied()
}

/// Whether `name` is a cataloged operation name. Operation names are reserved
/// and may not appear as universe elements.
pub fn is_operation_name(name: &str) -> bool {
  CATALOG.contains_key(name)
}
