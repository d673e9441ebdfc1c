//! Running an external executable from a fixed directory and environment.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tracing::debug;

use super::CliValue;
use super::CommandError;
use super::convert_kwargs_to_shell_list;
use super::convert_list_to_shell_str;
use crate::Environment;
use crate::system::OsInfo;

/// A command given either as a ready shell string or as an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Passed to the shell unchanged.
    Script(String),
    /// Quoted and joined before being passed to the shell.
    Args(Vec<String>),
}

impl CommandLine {
    /// Renders the command as a single shell string.
    #[must_use]
    pub fn to_shell_string(&self, os: &OsInfo) -> String {
        match self {
            Self::Script(script) => script.clone(),
            Self::Args(args) => convert_list_to_shell_str(args, os),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(value: &str) -> Self {
        Self::Script(value.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(value: String) -> Self {
        Self::Script(value)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(value: Vec<String>) -> Self {
        Self::Args(value)
    }
}

impl From<Vec<&str>> for CommandLine {
    fn from(value: Vec<&str>) -> Self {
        Self::Args(value.into_iter().map(str::to_string).collect())
    }
}

/// Options for [`CliInterface::run_command`].
///
/// # Defaults
///
/// - `env`: `None` (use [`CliInterface::env`])
/// - `capture_output`: `false`
/// - `suppress_output`: `true`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Replaces the interface environment for this run.
    pub env: Option<BTreeMap<String, String>>,

    /// Return the combined output with ANSI escape codes removed. The raw
    /// output is echoed unless `suppress_output` is also set.
    pub capture_output: bool,

    /// Return the combined output instead of letting it reach the terminal.
    pub suppress_output: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            env: None,
            capture_output: false,
            suppress_output: true,
        }
    }
}

impl RunOptions {
    /// Lets output reach the terminal and returns nothing.
    #[must_use]
    pub fn passthrough() -> Self {
        Self {
            suppress_output: false,
            ..Self::default()
        }
    }

    /// Returns output with ANSI codes removed, echoing it as well.
    #[must_use]
    pub fn captured() -> Self {
        Self {
            capture_output: true,
            suppress_output: false,
            ..Self::default()
        }
    }

    /// Sets the environment override.
    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Interface for wrapping an external command line program.
///
/// Implementors name the executable and provide the directory and
/// environment commands run with.
pub trait CliInterface {
    /// Executable invoked by [`Self::generate_command`].
    const EXECUTABLE: &'static str;

    /// Working directory for commands.
    fn cwd(&self) -> &Path;

    /// Environment for commands.
    fn env(&self) -> &Environment;

    /// Locates [`Self::EXECUTABLE`] on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::NotFound` when the executable is not on `PATH`.
    fn which_executable() -> Result<PathBuf, CommandError> {
        which::which(Self::EXECUTABLE).map_err(|_| CommandError::NotFound {
            executable: Self::EXECUTABLE.to_string(),
        })
    }

    /// Whether [`Self::EXECUTABLE`] is on `PATH`.
    fn found_in_path() -> bool {
        Self::which_executable().is_ok()
    }

    /// Builds `[EXECUTABLE, *command, *flags]`.
    fn generate_command<I, K>(command: &[&str], kwargs: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, CliValue)>,
        K: AsRef<str>,
    {
        let mut args = Vec::with_capacity(command.len() + 1);
        args.push(Self::EXECUTABLE.to_string());
        args.extend(command.iter().map(|part| (*part).to_string()));
        args.extend(convert_kwargs_to_shell_list(kwargs));
        args
    }

    /// Runs `command` through the platform shell.
    ///
    /// Returns the combined stdout and stderr when output is captured or
    /// suppressed, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Failed` on a non-zero exit and
    /// `CommandError::Io` if the shell cannot be started.
    fn run_command(
        &self,
        command: impl Into<CommandLine>,
        options: &RunOptions,
    ) -> Result<Option<String>, CommandError> {
        let script = command.into().to_shell_string(OsInfo::current());
        let mut cmd = shell_command(&script);
        match &options.env {
            Some(vars) => {
                cmd.env_clear().envs(vars);
            }
            None => {
                self.env().apply_to(&mut cmd);
            }
        }
        cmd.current_dir(self.cwd());
        debug!(command = %script, cwd = %self.cwd().display(), "running command");

        if !(options.capture_output || options.suppress_output) {
            let status = cmd.status().map_err(|source| CommandError::Io {
                command: script.clone(),
                source,
            })?;
            return if status.success() {
                Ok(None)
            } else {
                Err(CommandError::Failed {
                    command: script,
                    code: status.code(),
                    output: String::new(),
                })
            };
        }

        let output = cmd.output().map_err(|source| CommandError::Io {
            command: script.clone(),
            source,
        })?;
        let raw = combined_output(&output);
        if options.capture_output && !options.suppress_output {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(raw.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CommandError::Io {
                    command: script.clone(),
                    source,
                })?;
        }
        let text = if options.capture_output {
            console::strip_ansi_codes(&raw).into_owned()
        } else {
            raw
        };

        if output.status.success() {
            Ok(Some(text))
        } else {
            Err(CommandError::Failed {
                command: script,
                code: output.status.code(),
                output: text,
            })
        }
    }
}

#[cfg(unix)]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.args(["-c", script]);
    cmd
}

#[cfg(windows)]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", script]);
    cmd
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
