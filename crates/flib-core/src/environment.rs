//! Process environment snapshot used when running external commands.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

const CI: &str = "CI";
const DEBUG: &str = "DEBUG";
const VERBOSE: &str = "VERBOSE";

/// Errors raised while capturing the process environment.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// The current working directory could not be read.
    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Environment variables plus the directory commands run from.
///
/// Equality and hashing consider both the variables and the root directory.
///
/// # Examples
///
/// ```
/// use flib_core::Environment;
///
/// let mut env = Environment::new([("PATH", "/usr/bin")], "/srv/app");
/// assert!(!env.ci());
///
/// env.set_ci(true);
/// assert_eq!(env.get("CI"), Some("1"));
///
/// env.set_ci(false);
/// assert_eq!(env.get("CI"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment {
    root_dir: PathBuf,
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Builds an environment from explicit variables.
    pub fn new<I, K, V>(vars: I, root_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            root_dir: root_dir.into(),
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Captures the current directory and the process environment.
    ///
    /// Variables that are not valid Unicode are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CurrentDir` if the working directory cannot be read.
    pub fn from_process() -> Result<Self, EnvironmentError> {
        let root_dir = std::env::current_dir().map_err(EnvironmentError::CurrentDir)?;
        Ok(Self::new(std::env::vars(), root_dir))
    }

    /// Directory commands are run from.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// All variables.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Sets `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    /// Removes `key`, returning the previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Returns `true` when no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether `CI` is set.
    #[must_use]
    pub fn ci(&self) -> bool {
        self.flag(CI)
    }

    /// Sets `CI` to `1`, or removes it.
    pub fn set_ci(&mut self, value: bool) {
        self.set_flag(CI, value);
    }

    /// Whether `DEBUG` is set.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.flag(DEBUG)
    }

    /// Sets `DEBUG` to `1`, or removes it.
    pub fn set_debug(&mut self, value: bool) {
        self.set_flag(DEBUG, value);
    }

    /// Whether `VERBOSE` is set.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.flag(VERBOSE)
    }

    /// Sets `VERBOSE` to `1`, or removes it.
    pub fn set_verbose(&mut self, value: bool) {
        self.set_flag(VERBOSE, value);
    }

    /// Replaces `command`'s environment and working directory with this one.
    pub fn apply_to<'c>(&self, command: &'c mut Command) -> &'c mut Command {
        command
            .env_clear()
            .envs(&self.vars)
            .current_dir(&self.root_dir)
    }

    /// Present and not `""`, `"0"` or `"false"`.
    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| {
            let value = value.trim();
            !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
        })
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        if value {
            self.set(key, "1");
        } else {
            self.remove(key);
        }
    }
}
