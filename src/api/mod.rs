/*!

The public API of the library.

Clients hand the facade whitespace-tokenized source lines (tokenizing a line is
deliberately the caller's job), get back a `Program`, and run the staged
pipeline: validate, then evaluate. The evaluated program renders as the output
listing, one line per command in original order.

```
use setcal::api::{program_from_token_lines, run};

let source = "U a b c\nS a b\nS b c\nC union 2 3";
let tokens = source.lines().map(|line| line.split_whitespace().collect());
let mut program = program_from_token_lines(tokens).unwrap();
run(&mut program).unwrap();
assert_eq!(program.render(), "U a b c\nS a b\nS b c\nS a b c\n");
```

*/


// The model and pipeline surface.
pub use crate::core::{
  catalog::{find_operation, is_operation_name, Arity, OpCode, Operation, Signature, ValueKind, OPERATIONS},
  command::{Command, CommandKind, ParseError, Value},
  error::Error,
  evaluator::{evaluate, EvalError},
  program::{Program, Registry},
  relation::{codomain, domain, RelationTable},
  validator::{validate, ValidationError, COMMAND_LIMIT, MAX_ELEMENT_LENGTH},
};

/// Builds a program from tokenized source lines, one token vector per line.
pub fn program_from_token_lines<'t>(
  lines: impl IntoIterator<Item = Vec<&'t str>>,
) -> Result<Program, Error> {
  let mut program = Program::new();
  for (position, tokens) in lines.into_iter().enumerate() {
    match Command::from_tokens(&tokens) {
      Ok(command) => {
        program.push(command);
      }
      Err(fault) => {
        return Err(Error::Parse { line: position + 1, fault });
      }
    }
  }
  Ok(program)
}

/// Runs the staged pipeline: validate the whole program, then evaluate every
/// invocation in place. On success the program renders as the output listing.
pub fn run(program: &mut Program) -> Result<(), Error> {
  validate(program)?;
  evaluate(program)?;
  Ok(())
}
