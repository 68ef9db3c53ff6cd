/*!

A command-line front end for the `setcal` library: reads a program from the
file named on the command line, runs the validate-then-evaluate pipeline, and
prints the rewritten listing to stdout. Any failure is reported as a single
diagnostic on the error stream with a non-zero exit status.

*/

use std::process::ExitCode;

use setcal::api::{program_from_token_lines, run};
use setcal::{error, info, log::set_verbosity};

fn main() -> ExitCode {
  set_verbosity(1);

  let path = match std::env::args().nth(1) {
    Some(path) => path,
    None => {
      error!("usage: setcal_demo <program-file>");
      return ExitCode::FAILURE;
    }
  };

  let source = match std::fs::read_to_string(&path) {
    Ok(source) => source,
    Err(fault) => {
      error!("cannot read {}: {}", path, fault);
      return ExitCode::FAILURE;
    }
  };

  let tokens = source.lines().map(|line| line.split_whitespace().collect());
  let mut program = match program_from_token_lines(tokens) {
    Ok(program) => program,
    Err(fault) => {
      error!("{}", fault);
      return ExitCode::FAILURE;
    }
  };

  info!(1, "parsed {} command(s) from {}", program.len(), path);

  if let Err(fault) = run(&mut program) {
    error!("{}", fault);
    return ExitCode::FAILURE;
  }

  print!("{}", program.render());
  ExitCode::SUCCESS
}
