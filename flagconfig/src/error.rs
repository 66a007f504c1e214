//! Error types produced while locating, parsing, and applying config files.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::RegistryError;

/// Convenience alias for results carrying a [`FlagConfigError`].
pub type FlagConfigResult<T> = Result<T, FlagConfigError>;

/// Errors that can occur while merging a configuration file into a flag set.
///
/// Every variant carries the context needed for a descriptive diagnostic:
/// the offending file, line, key, or value. Callers embedding the library
/// decide whether to terminate, log, or retry with corrected input; a CLI
/// wrapper preserving the classic behaviour prints the message and exits
/// non-zero.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagConfigError {
    /// A configured path was set but could not be read.
    ///
    /// Distinct from "no config file": discovery returning no candidate
    /// short-circuits before any read is attempted.
    #[error("failed to read config file '{path}': {source}")]
    File {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A non-blank, non-comment line did not contain exactly one `=`.
    #[error("invalid config line {line_number} in '{path}': {line}")]
    MalformedLine {
        /// File containing the offending line.
        path: PathBuf,
        /// 1-based line number.
        line_number: usize,
        /// The offending line, whitespace-trimmed.
        line: String,
    },

    /// A config key matched no registered flag.
    #[error("unknown flag {key}={value} in config file")]
    UnknownKey {
        /// The unmatched key.
        key: String,
        /// The value it carried.
        value: String,
    },

    /// The registry's own validation rejected the config value.
    #[error("failed to set flag {flag} with value {value}: {reason}")]
    ValueRejected {
        /// Flag whose assignment failed.
        flag: String,
        /// The rejected value.
        value: String,
        /// Why the registry refused it.
        reason: String,
    },
}

impl From<RegistryError> for FlagConfigError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Rejected {
                name,
                value,
                reason,
            } => Self::ValueRejected {
                flag: name,
                value,
                reason,
            },
            RegistryError::Unknown { name } | RegistryError::Duplicate { name } => {
                Self::UnknownKey {
                    key: name,
                    value: String::new(),
                }
            }
        }
    }
}
