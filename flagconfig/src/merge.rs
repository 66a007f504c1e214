//! Applies parsed configuration values to flags not set on the command line.
//!
//! The pass is a single linear sequence: locate, read, partition explicit
//! from unset, assign, then validate unknown keys. Explicitly-set flags are
//! never overwritten; the unknown-key check runs strictly after every
//! assignment so a file is validated as one unit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::discovery::Locator;
use crate::error::{FlagConfigError, FlagConfigResult};
use crate::parser;
use crate::registry::{FlagRegistry, RegistryError};

/// Assigns `config` values to every registered flag the user did not set
/// explicitly, then rejects any key matching no registered flag.
///
/// Keys present with an empty value are not assigned but still count as
/// known or unknown for validation. An explicitly-set flag whose name
/// appears in the config keeps its command-line value.
///
/// # Errors
///
/// Returns [`FlagConfigError::ValueRejected`] when the registry refuses a
/// value and [`FlagConfigError::UnknownKey`] when a key matches no flag.
pub fn apply<R>(registry: &mut R, config: &BTreeMap<String, String>) -> FlagConfigResult<()>
where
    R: FlagRegistry + ?Sized,
{
    let explicit = registry.explicit_flags();
    for name in registry.flag_names() {
        if explicit.contains(&name) {
            continue;
        }
        let Some(value) = config.get(&name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        registry
            .assign(&name, value)
            .map_err(|err| rejection_to_error(err, value))?;
        tracing::debug!(flag = %name, "applied config value");
    }
    for (key, value) in config {
        if registry.flag(key).is_none() {
            return Err(FlagConfigError::UnknownKey {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}

fn rejection_to_error(err: RegistryError, value: &str) -> FlagConfigError {
    match err {
        RegistryError::Rejected {
            name,
            value: rejected,
            reason,
        } => FlagConfigError::ValueRejected {
            flag: name,
            value: rejected,
            reason,
        },
        RegistryError::Unknown { name } | RegistryError::Duplicate { name } => {
            FlagConfigError::UnknownKey {
                key: name,
                value: value.to_owned(),
            }
        }
    }
}

/// Parses the file at `path` and merges it into `registry`.
///
/// # Errors
///
/// Returns [`FlagConfigError::File`] when the path is unreadable, plus any
/// parse or merge error from [`apply`].
pub fn load_path<R>(registry: &mut R, path: &Path) -> FlagConfigResult<()>
where
    R: FlagRegistry + ?Sized,
{
    let config = parser::parse(path)?;
    apply(registry, &config)
}

/// Locates a config file with `locator` and merges it into `registry`.
///
/// Returns the path that was used, or `Ok(None)` when no candidate was
/// readable and the merge was a no-op.
///
/// # Errors
///
/// Propagates any read, parse, or merge error for a located file.
pub fn load_from<R>(registry: &mut R, locator: &Locator) -> FlagConfigResult<Option<PathBuf>>
where
    R: FlagRegistry + ?Sized,
{
    let Some(path) = locator.locate() else {
        return Ok(None);
    };
    load_path(registry, &path)?;
    Ok(Some(path))
}

/// Merges the default config file for the current executable into `registry`.
///
/// Equivalent to [`load_from`] with [`Locator::for_current_exe`].
///
/// # Errors
///
/// Propagates any read, parse, or merge error for a located file.
pub fn load<R>(registry: &mut R) -> FlagConfigResult<Option<PathBuf>>
where
    R: FlagRegistry + ?Sized,
{
    load_from(registry, &Locator::for_current_exe())
}

/// Merges an explicitly-chosen file when given, default discovery otherwise.
///
/// This models a `--config` flag: an explicit path must be readable, while
/// default discovery silently degrades to a no-op.
///
/// # Errors
///
/// Propagates any read, parse, or merge error; an unreadable explicit path
/// is a [`FlagConfigError::File`].
pub fn load_with_override<R>(
    registry: &mut R,
    override_path: Option<&Path>,
) -> FlagConfigResult<Option<PathBuf>>
where
    R: FlagRegistry + ?Sized,
{
    match override_path {
        Some(path) => {
            load_path(registry, path)?;
            Ok(Some(path.to_path_buf()))
        }
        None => load(registry),
    }
}
