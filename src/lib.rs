#![allow(dead_code)]
/*!

A validating calculator for sets and binary relations over a finite universe.

A program is a sequence of line commands: one universe declaration (`U`), any
number of set (`S`) and relation (`R`) declarations, and a tail of operation
invocations (`C`) that address earlier lines by 1-based position. The whole
sequence is validated against a fixed rule order before anything runs; then
each invocation is rewritten in place with its computed result.

See the [`api`] module for the public surface.

*/

pub mod api;
pub mod abstractions;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString,
  NatSet
};
