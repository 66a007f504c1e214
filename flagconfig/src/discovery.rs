//! Default configuration path discovery.
//!
//! When no explicit path is supplied, candidates are probed in order:
//! a per-user `<home>/.config/<program>/config` file, then a system-wide
//! `/etc/conf.d/<program>` file. Probing checks readability only (open and
//! close); content is read later by the parser. Neither candidate readable
//! means no config file, which callers treat as a merge no-op.

use std::fs::File;
use std::path::{Path, PathBuf};

/// Locates the default configuration file for a program.
///
/// The home and system directories are overridable so tests can point the
/// probe at temporary locations.
///
/// # Examples
///
/// ```rust,no_run
/// use flagconfig::Locator;
///
/// if let Some(path) = Locator::new("myapp").locate() {
///     println!("using config at {}", path.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Locator {
    program: String,
    home: Option<PathBuf>,
    system_dir: PathBuf,
}

impl Locator {
    /// Creates a locator for the named program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            home: None,
            system_dir: PathBuf::from("/etc/conf.d"),
        }
    }

    /// Creates a locator named after the current executable.
    #[must_use]
    pub fn for_current_exe() -> Self {
        Self::new(current_program())
    }

    /// Overrides the home directory used for the per-user candidate.
    ///
    /// Defaults to `$HOME`, falling back to the platform home directory.
    #[must_use]
    pub fn home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Overrides the system directory used for the fallback candidate.
    #[must_use]
    pub fn system_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_dir = dir.into();
        self
    }

    /// The program name candidates are derived from.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Probes the candidates in order and returns the first readable path.
    ///
    /// Returns `None` when neither candidate is readable, meaning no config
    /// file is in use.
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        let home = self.home.clone().or_else(resolve_home);
        if let Some(home_path) = home {
            let user = home_path
                .join(".config")
                .join(&self.program)
                .join("config");
            if is_readable(&user) {
                tracing::debug!(path = %user.display(), "using per-user config file");
                return Some(user);
            }
        }
        let system = self.system_dir.join(&self.program);
        if is_readable(&system) {
            tracing::debug!(path = %system.display(), "using system config file");
            return Some(system);
        }
        tracing::debug!(program = %self.program, "no config file found");
        None
    }
}

/// Open-and-close readability probe; content is not read.
fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

fn resolve_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

fn current_program() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| String::from("flagconfig"))
}
