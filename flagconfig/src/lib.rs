//! Populate unset command-line flags from a `key=value` configuration file.
//!
//! The default configuration file location is
//! `$HOME/.config/<program>/config`, falling back to
//! `/etc/conf.d/<program>`. Lines in the configuration file are in
//! `flag-name=value` format; blank lines and `#` comments are allowed.
//!
//! Config values apply only to flags the user did not set explicitly on
//! the command line; explicit flags always win. A config key that matches
//! no registered flag is an error, as is a malformed line or a value the
//! flag's own validation rejects. Errors are returned as values; the
//! embedding program decides whether to terminate.
//!
//! ```rust
//! use flagconfig::{Flag, FlagSet, apply};
//! use std::collections::BTreeMap;
//!
//! # fn run() -> flagconfig::FlagConfigResult<()> {
//! let mut flags = FlagSet::new("demo");
//! flags.register(Flag::new("host", "localhost", "host to bind"))?;
//! flags.set_explicit("host", "cli.example.com")?;
//!
//! let config = BTreeMap::from([(String::from("host"), String::from("file.example.com"))]);
//! apply(&mut flags, &config)?;
//! assert_eq!(flags.value("host"), Some("cli.example.com"));
//! # Ok(())
//! # }
//! ```
//!
//! For end-to-end use, [`load`] and [`load_with_override`] locate, parse,
//! and merge in one call; [`bridge::flag_set_from_matches`] builds a
//! [`FlagSet`] from parsed `clap` arguments.

pub mod bridge;
mod discovery;
mod error;
mod merge;
mod parser;
mod registry;

pub use discovery::Locator;
pub use error::{FlagConfigError, FlagConfigResult};
pub use merge::{apply, load, load_from, load_path, load_with_override};
pub use parser::{parse, parse_str};
pub use registry::{Flag, FlagRegistry, FlagSet, RegistryError, ValueKind, ValueSource};
