/*!

The command model: one source line of a program, as a closed tagged variant.

The original wire format tags each line with a single character (`U`, `S`, `R`,
`C`). Here those raw tags become enum variants so every dispatch site is
exhaustively checked. A fifth variant, `Result`, exists only after evaluation:
the evaluator replaces an `Invocation` in place with the `Result` carrying its
computed value. A command is mutated at most once and never removed, so the
1-based line address of every command is stable for the life of the program.

*/

use std::fmt::{Display, Formatter};

use enumflags2::bitflags;

use crate::abstractions::{IString, join_string, join_pairs};
use crate::core::catalog::{find_operation, ValueKind};

/// The four recognized source-line kinds. An evaluated `Result` reports the
/// `Invocation` kind, since that is the line it materialized from.
#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CommandKind {
  Universe,
  Set,
  Relation,
  Invocation,
}

impl Display for CommandKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      CommandKind::Universe   => write!(f, "universe"),
      CommandKind::Set        => write!(f, "set"),
      CommandKind::Relation   => write!(f, "relation"),
      CommandKind::Invocation => write!(f, "invocation"),
    }
  }
}

/// A computed result: what an `Invocation` becomes once evaluated.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Value {
  Bool(bool),
  Count(usize),
  Set(Vec<IString>),
}

impl Value {
  pub fn kind(&self) -> ValueKind {
    match self {
      Value::Bool(_)  => ValueKind::Bool,
      Value::Count(_) => ValueKind::Count,
      Value::Set(_)   => ValueKind::Set,
    }
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Bool(value)  => write!(f, "{}", value),
      Value::Count(value) => write!(f, "{}", value),
      Value::Set(elements) if elements.is_empty() => write!(f, "S"),
      Value::Set(elements) => write!(f, "S {}", join_string(elements.iter(), " ")),
    }
  }
}

/// One line of a program.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Command {
  Universe(Vec<IString>),
  Set(Vec<IString>),
  Relation(Vec<(IString, IString)>),
  Invocation {
    operation: IString,
    operands : Vec<usize>,
  },
  Result(Value),
}

impl Command {
  pub fn kind(&self) -> CommandKind {
    match self {
      Command::Universe(_)       => CommandKind::Universe,
      Command::Set(_)            => CommandKind::Set,
      Command::Relation(_)       => CommandKind::Relation,
      Command::Invocation { .. } => CommandKind::Invocation,
      Command::Result(_)         => CommandKind::Invocation,
    }
  }

  /// The kind of value this command yields when addressed as an operand, known
  /// without evaluating anything. `None` for the universe (not addressable) and
  /// for invocations of unknown operations.
  pub fn value_kind(&self) -> Option<ValueKind> {
    match self {
      Command::Universe(_)              => None,
      Command::Set(_)                   => Some(ValueKind::Set),
      Command::Relation(_)              => Some(ValueKind::Relation),
      Command::Invocation { operation, .. } => {
        find_operation(operation).map(|op| op.code.result_kind())
      }
      Command::Result(value)            => Some(value.kind()),
    }
  }

  /// Builds a command from one whitespace-tokenized source line. Tokenization
  /// itself is the caller's job; this is the token-to-command step.
  pub fn from_tokens(tokens: &[&str]) -> Result<Command, ParseError> {
    let (tag, args) = match tokens.split_first() {
      Some(split) => split,
      None        => return Err(ParseError::EmptyLine),
    };

    match *tag {
      "U" => Ok(Command::Universe(intern_all(args))),

      "S" => Ok(Command::Set(intern_all(args))),

      "R" => {
        if args.len() % 2 != 0 {
          return Err(ParseError::OddPairArguments { count: args.len() });
        }
        let pairs = args.chunks_exact(2)
                        .map(|pair| (IString::from(pair[0]), IString::from(pair[1])))
                        .collect();
        Ok(Command::Relation(pairs))
      }

      "C" => {
        let (operation, indices) = match args.split_first() {
          Some(split) => split,
          None        => return Err(ParseError::MissingOperation),
        };
        let mut operands = Vec::with_capacity(indices.len());
        for index in indices {
          match index.parse::<usize>() {
            Ok(value) => operands.push(value),
            Err(_)    => return Err(ParseError::MalformedIndex { token: (*index).to_string() }),
          }
        }
        Ok(Command::Invocation {
          operation: IString::from(*operation),
          operands,
        })
      }

      other => Err(ParseError::UnknownTag { token: other.to_string() }),
    }
  }
}

fn intern_all(tokens: &[&str]) -> Vec<IString> {
  tokens.iter().map(|token| IString::from(*token)).collect()
}

/// The output form mirrors the input form: declarations render verbatim,
/// results render as `true`/`false`, a decimal count, or `S <elements>`.
impl Display for Command {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Command::Universe(elements) if elements.is_empty() => write!(f, "U"),
      Command::Universe(elements) => write!(f, "U {}", join_string(elements.iter(), " ")),

      Command::Set(elements) if elements.is_empty() => write!(f, "S"),
      Command::Set(elements) => write!(f, "S {}", join_string(elements.iter(), " ")),

      Command::Relation(pairs) if pairs.is_empty() => write!(f, "R"),
      Command::Relation(pairs) => {
        write!(f, "R {}", join_pairs(pairs.iter().map(|(a, b)| (a, b)), " "))
      }

      Command::Invocation { operation, operands } if operands.is_empty() => {
        write!(f, "C {}", operation)
      }
      Command::Invocation { operation, operands } => {
        write!(f, "C {} {}", operation, join_string(operands.iter(), " "))
      }

      Command::Result(value) => write!(f, "{}", value),
    }
  }
}

/// A malformed source line. Terminal, like every other error in the pipeline.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
  EmptyLine,
  UnknownTag { token: String },
  OddPairArguments { count: usize },
  MissingOperation,
  MalformedIndex { token: String },
}

impl Display for ParseError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ParseError::EmptyLine => {
        write!(f, "blank line: every line must start with one of U, S, R, C")
      }
      ParseError::UnknownTag { token } => {
        write!(f, "unrecognized command tag {:?}: expected one of U, S, R, C", token)
      }
      ParseError::OddPairArguments { count } => {
        write!(f, "relation line has {} arguments, but pairs need an even count", count)
      }
      ParseError::MissingOperation => {
        write!(f, "invocation line names no operation")
      }
      ParseError::MalformedIndex { token } => {
        write!(f, "operand {:?} is not a non-negative line index", token)
      }
    }
  }
}

impl std::error::Error for ParseError {}
