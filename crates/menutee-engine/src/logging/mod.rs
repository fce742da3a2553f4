//! Logging utilities.
//!
//! Menus report recoverable misuse (unknown panel keys, out-of-order pops)
//! through the `log` facade instead of returning errors, so hosts should
//! install a backend early. `init_logging` installs `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
