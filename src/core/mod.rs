/*!

The engine: the command/program data model, the static operation catalog, the
whole-program validator, the set and relation algebra, and the evaluator that
rewrites invocations with their results.

The pipeline is strictly staged: build a `Program` from tokenized lines, run
`validator::validate` (abort on the first violated rule), then run
`evaluator::evaluate` (left-to-right, in place). The algebra modules are pure
and know nothing about commands.

*/

pub mod catalog;
pub mod command;
pub mod error;
pub mod evaluator;
pub mod program;
pub mod relation;
pub mod set_ops;
pub mod validator;
