//! Flag definitions and the registry contract consumed by the merge pass.
//!
//! The registry is an explicit object rather than process-wide state, so
//! independent flag sets can coexist and be exercised in isolation. The
//! [`FlagRegistry`] trait captures the four operations the merge needs:
//! enumerate all flags, enumerate explicitly-set flags, look a flag up by
//! name, and assign a value by name. [`FlagSet`] is the built-in
//! implementation; [`crate::bridge`] constructs one from parsed `clap`
//! arguments.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Errors reported by a flag registry.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// A flag with the same name is already registered.
    #[error("flag '{name}' is already registered")]
    Duplicate {
        /// The colliding flag name.
        name: String,
    },

    /// No flag with this name is registered.
    #[error("no flag named '{name}' is registered")]
    Unknown {
        /// The unmatched flag name.
        name: String,
    },

    /// The value did not satisfy the flag's expected shape.
    #[error("value '{value}' rejected for flag '{name}': {reason}")]
    Rejected {
        /// Flag whose assignment failed.
        name: String,
        /// The rejected value.
        value: String,
        /// Why the value was refused.
        reason: String,
    },
}

/// Where a flag's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// Never assigned; the registered default is in effect.
    #[default]
    Default,
    /// Assigned from a command-line argument before the merge ran.
    CommandLine,
    /// Assigned from a configuration file by the merge pass.
    ConfigFile,
}

/// Validation applied when a flag is assigned.
///
/// Values are stored as strings regardless of kind; the kind only gates
/// which strings an assignment accepts. `Text` accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// Any string.
    #[default]
    Text,
    /// `true` or `false`.
    Boolean,
    /// A signed integer.
    Integer,
    /// A decimal number.
    Decimal,
}

impl ValueKind {
    fn check(self, raw: &str) -> Result<(), String> {
        match self {
            Self::Text => Ok(()),
            Self::Boolean => raw
                .parse::<bool>()
                .map(|_| ())
                .map_err(|_| String::from("expected 'true' or 'false'")),
            Self::Integer => raw
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| String::from("expected an integer")),
            Self::Decimal => raw
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| String::from("expected a number")),
        }
    }
}

/// A named command-line option with a current value and default.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    value: String,
    default: String,
    help: String,
    kind: ValueKind,
    source: ValueSource,
}

impl Flag {
    /// Creates a text flag whose current value starts at `default`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        default: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            value: default.clone(),
            default,
            help: help.into(),
            kind: ValueKind::Text,
            source: ValueSource::Default,
        }
    }

    /// Sets the validation kind applied on assignment.
    #[must_use]
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// The flag's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The registered default value.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The help text.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Where the current value came from.
    #[must_use]
    pub const fn source(&self) -> ValueSource {
        self.source
    }

    /// Whether the value was supplied on the command line for this run.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.source == ValueSource::CommandLine
    }

    fn assign(&mut self, value: &str, source: ValueSource) -> Result<(), RegistryError> {
        self.kind.check(value).map_err(|reason| RegistryError::Rejected {
            name: self.name.clone(),
            value: value.to_owned(),
            reason,
        })?;
        value.clone_into(&mut self.value);
        self.source = source;
        Ok(())
    }
}

/// The registry contract the merge pass consumes.
///
/// Assignments through [`FlagRegistry::assign`] come from the configuration
/// file and may fail validation; explicitly-set flags are never assigned.
pub trait FlagRegistry {
    /// Names of every registered flag.
    fn flag_names(&self) -> Vec<String>;

    /// Names of the flags assigned via command-line arguments this run.
    fn explicit_flags(&self) -> BTreeSet<String>;

    /// Looks a flag up by name.
    fn flag(&self, name: &str) -> Option<&Flag>;

    /// Assigns a config-file value to the named flag, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when no flag has this name and
    /// [`RegistryError::Rejected`] when the value fails validation.
    fn assign(&mut self, name: &str, value: &str) -> Result<(), RegistryError>;
}

/// An owned, ordered registry of [`Flag`]s keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    program: String,
    flags: BTreeMap<String, Flag>,
}

impl FlagSet {
    /// Creates an empty flag set for the named program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flags: BTreeMap::new(),
        }
    }

    /// The program name used in usage output.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Registers a flag.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when a flag with the same name
    /// already exists; names are unique within a set.
    pub fn register(&mut self, flag: Flag) -> Result<(), RegistryError> {
        if self.flags.contains_key(flag.name()) {
            return Err(RegistryError::Duplicate {
                name: flag.name().to_owned(),
            });
        }
        self.flags.insert(flag.name().to_owned(), flag);
        Ok(())
    }

    /// Records a command-line assignment for the named flag.
    ///
    /// Flags set this way are skipped by the merge pass.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when no flag has this name and
    /// [`RegistryError::Rejected`] when the value fails validation.
    pub fn set_explicit(&mut self, name: &str, value: &str) -> Result<(), RegistryError> {
        let flag = self.flags.get_mut(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_owned(),
        })?;
        flag.assign(value, ValueSource::CommandLine)
    }

    /// Assigns a config-file value to the named flag, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when no flag has this name and
    /// [`RegistryError::Rejected`] when the value fails validation.
    pub fn assign(&mut self, name: &str, value: &str) -> Result<(), RegistryError> {
        let flag = self.flags.get_mut(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_owned(),
        })?;
        flag.assign(value, ValueSource::ConfigFile)
    }

    /// Looks a flag up by name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Names of every registered flag, in order.
    #[must_use]
    pub fn flag_names(&self) -> Vec<String> {
        self.flags.keys().cloned().collect()
    }

    /// Names of the flags assigned via command-line arguments this run.
    #[must_use]
    pub fn explicit_flags(&self) -> BTreeSet<String> {
        self.flags
            .values()
            .filter(|flag| flag.is_explicit())
            .map(|flag| flag.name().to_owned())
            .collect()
    }

    /// The current value of the named flag, if registered.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(Flag::value)
    }

    /// Iterates over the registered flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the set has no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Renders a usage listing of every flag with its current value and help.
    ///
    /// Values reflect any merge that has already run, so printing after
    /// [`crate::load`] shows the effective configuration.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = format!("Usage of {}:\n", self.program);
        for flag in self.flags.values() {
            out.push_str(&format!(
                "  -{}={}: {}\n",
                flag.name(),
                flag.value(),
                flag.help()
            ));
        }
        out
    }
}

impl FlagRegistry for FlagSet {
    fn flag_names(&self) -> Vec<String> {
        Self::flag_names(self)
    }

    fn explicit_flags(&self) -> BTreeSet<String> {
        Self::explicit_flags(self)
    }

    fn flag(&self, name: &str) -> Option<&Flag> {
        Self::flag(self, name)
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<(), RegistryError> {
        Self::assign(self, name, value)
    }
}
