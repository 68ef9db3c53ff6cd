/*!

The top-level error type for the whole pipeline. Every failure in the
parse-validate-evaluate pipeline is terminal; this umbrella exists so the
facade can return one error type and the caller can still see which stage
refused the program.

*/

use std::fmt::{Debug, Display, Formatter};

use crate::core::{
  command::ParseError,
  evaluator::EvalError,
  validator::ValidationError,
};

#[derive(Clone, Eq, PartialEq)]
pub enum Error {
  /// A malformed source line, with its 1-based line number.
  Parse { line: usize, fault: ParseError },
  Validation(ValidationError),
  Eval(EvalError),
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Parse { line, fault } => write!(f, "line {}: {}", line, fault),
      Error::Validation(fault)     => write!(f, "{}", fault),
      Error::Eval(fault)           => write!(f, "{}", fault),
    }
  }
}

impl Debug for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Parse { fault, .. } => Some(fault),
      Error::Validation(fault)   => Some(fault),
      Error::Eval(fault)         => Some(fault),
    }
  }
}

impl From<ValidationError> for Error {
  fn from(fault: ValidationError) -> Self {
    Error::Validation(fault)
  }
}

impl From<EvalError> for Error {
  fn from(fault: EvalError) -> Self {
    Error::Eval(fault)
  }
}
