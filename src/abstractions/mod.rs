/*!

Types/type aliases that abstract over the implementing backing type.

The calculator does not care which crate interns its strings or which bit-vector
implementation backs its sets of natural numbers. This module pins those choices
in one place so the rest of the crate can stay agnostic.

*/

mod nat_set;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Interned string.
pub use string_cache::DefaultAtom as IString;

// Join sequences of displayable things with a separator
pub use string_join::{join_string, join_pairs};
