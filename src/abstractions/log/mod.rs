/*!

A thin logging facade over the `tracing` ecosystem with a global numeric
verbosity threshold.

Every message is logged *at* a threshold, and only messages whose threshold is
at most the global verbosity are emitted. Threshold 0 messages are always
emitted. The macros take an optional leading threshold argument:

```
use setcal::log::{info, warning, set_verbosity};

set_verbosity(2);
info!(1, "processing {} commands", 4); // emitted: 1 <= 2
info!(3, "operand dump: …");           // suppressed: 3 > 2
warning!("no threshold means 0");      // always emitted
```

Filtering happens at the call site, before the event is even constructed, so a
suppressed message costs one atomic load. The subscriber itself (a
`tracing_subscriber` fmt layer writing to stderr) is installed lazily on the
first emitted message; no explicit initialization is required.

*/

mod macros;

use std::sync::atomic::{AtomicU8, Ordering};

use once_cell::sync::Lazy;

pub use macros::*;

// Re-exported so the macros can name `tracing` through `$crate` regardless of
// the caller's dependencies.
pub use tracing;

/// Used for implicit initialization.
static INIT_LOGGER: Lazy<()> = Lazy::new(|| {
  let subscriber = tracing_subscriber::fmt()
      .with_target(false)
      .without_time()
      .with_level(true)
      .with_writer(std::io::stderr)
      .finish();
  // A subscriber may already be installed by the host application. That one wins.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// Installs the default subscriber if none is installed yet. Called implicitly
/// by the logging macros; client code never needs to call it.
pub fn init_logger() {
  Lazy::force(&INIT_LOGGER);
}

static VERBOSITY: AtomicU8 = AtomicU8::new(3); // Default verbosity

/// Sets the global verbosity threshold. Messages logged at a threshold greater
/// than this value are suppressed.
pub fn set_verbosity(new_verbosity: u8) {
  VERBOSITY.store(new_verbosity, Ordering::SeqCst);
}

/// Retrieves the global verbosity threshold.
pub fn verbosity() -> u8 {
  VERBOSITY.load(Ordering::SeqCst)
}
