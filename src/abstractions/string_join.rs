/*!

Joining sequences with a separator, which doesn't exist in the stdlib for
arbitrary `Display` items. (C.f. `Vec::join(…)`, which wants slices of strings.)

*/

use std::fmt::{Display, Write};

/// Joins a sequence of displayable things with the given separator.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  let mut joined = String::new();
  for (position, item) in iter.enumerate() {
    if position > 0 {
      joined.push_str(sep);
    }
    // Writing to a `String` cannot fail.
    let _ = write!(joined, "{}", item);
  }
  joined
}

/// Joins a sequence of pairs, flattened, with the given separator. A relation
/// `{(a, b), (c, d)}` joined with `" "` renders as `a b c d`, the wire form of
/// an `R` line.
pub fn join_pairs<T: Display>(iter: impl Iterator<Item = (T, T)>, sep: &str) -> String {
  join_string(iter.flat_map(|(a, b)| [a, b].into_iter()), sep)
}

#[cfg(test)]
mod tests {
  use super::{join_string, join_pairs};

  #[test]
  fn join_string_test() {
    let list = [1, 3, 5, 7, 9];
    assert_eq!(join_string(list.iter(), ", "), "1, 3, 5, 7, 9");
    assert_eq!(join_string(std::iter::empty::<u32>(), ", "), "");
    assert_eq!(join_string(["solo"].iter(), " "), "solo");
  }

  #[test]
  fn join_pairs_test() {
    let pairs = [("a", "b"), ("c", "d")];
    assert_eq!(join_pairs(pairs.iter().cloned(), " "), "a b c d");
  }
}
