//! Builds a [`FlagSet`] from parsed `clap` arguments.
//!
//! `clap` owns argument parsing; this bridge mirrors the parsed command
//! into a registry the merge pass can work with. One flag is created per
//! value-taking argument, and arguments whose value came from the command
//! line are marked explicit so the merge never overwrites them. After
//! merging, the application reads effective values from the returned set
//! rather than from `ArgMatches`.

use clap::parser::ValueSource as ClapValueSource;
use clap::{ArgMatches, Command};

use crate::registry::{Flag, FlagSet, RegistryError};

/// Mirrors `command`'s value-taking arguments into a [`FlagSet`].
///
/// Defaults and help text carry over from the argument definitions; values
/// are passed through as strings. Multi-valued arguments contribute their
/// first value. The built-in `help` and `version` arguments are skipped.
///
/// # Examples
///
/// ```rust
/// use clap::{Arg, Command};
/// use flagconfig::bridge::flag_set_from_matches;
///
/// let command = Command::new("demo").arg(
///     Arg::new("host").long("host").default_value("localhost"),
/// );
/// let matches = command.clone().get_matches_from(["demo", "--host", "example.com"]);
/// let set = flag_set_from_matches(&command, &matches)?;
/// assert_eq!(set.value("host"), Some("example.com"));
/// # Ok::<(), flagconfig::RegistryError>(())
/// ```
///
/// # Errors
///
/// Returns [`RegistryError::Duplicate`] if two arguments share an id.
pub fn flag_set_from_matches(
    command: &Command,
    matches: &ArgMatches,
) -> Result<FlagSet, RegistryError> {
    let mut set = FlagSet::new(command.get_name());
    for arg in command.get_arguments() {
        let id = arg.get_id().as_str();
        if id == "help" || id == "version" {
            continue;
        }
        if !arg.get_action().takes_values() {
            continue;
        }
        let default = arg
            .get_default_values()
            .first()
            .map(|value| value.to_string_lossy().into_owned())
            .unwrap_or_default();
        let help = arg.get_help().map(ToString::to_string).unwrap_or_default();
        set.register(Flag::new(id, default, help))?;

        if matches.value_source(id) == Some(ClapValueSource::CommandLine) {
            let value = matches
                .get_raw(id)
                .and_then(|mut raw| raw.next())
                .map(|value| value.to_string_lossy().into_owned());
            if let Some(value) = value {
                set.set_explicit(id, &value)?;
            }
        }
    }
    Ok(set)
}
