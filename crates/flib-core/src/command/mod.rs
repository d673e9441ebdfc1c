//! Helpers for building and running external commands.

mod flags;
mod interface;
mod shell;

use thiserror::Error;

pub use flags::CliValue;
pub use flags::DEFAULT_FLAG_PREFIX;
pub use flags::convert_kwargs_to_shell_list;
pub use flags::convert_to_cli_flag;
pub use interface::CliInterface;
pub use interface::CommandLine;
pub use interface::RunOptions;
pub use shell::convert_list_to_shell_str;
pub use shell::posix_quote;

/// Errors raised while running external commands.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command exited unsuccessfully.
    #[error("command failed with exit code {}: {command}", code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Failed {
        /// Shell string that was run.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Output collected before the failure.
        output: String,
    },

    /// The executable is not on `PATH`.
    #[error("executable not found in PATH: {executable}")]
    NotFound {
        /// Executable name.
        executable: String,
    },

    /// The shell could not be started or output could not be written.
    #[error("failed to run {command}: {source}")]
    Io {
        /// Shell string that was run.
        command: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_display() {
        let err = CommandError::Failed {
            command: "false".to_string(),
            code: Some(1),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "command failed with exit code 1: false");

        let err = CommandError::Failed {
            command: "kill".to_string(),
            code: None,
            output: String::new(),
        };
        assert!(err.to_string().contains("exit code none"));
    }

    #[test]
    fn test_not_found_display() {
        let err = CommandError::NotFound {
            executable: "tool".to_string(),
        };
        assert!(err.to_string().contains("tool"));
    }
}
