//! Operating system detection.

use std::path::PathBuf;

use directories::ProjectDirs;
use once_cell::sync::Lazy;

const APP_NAME: &str = "f-lib";
const APP_AUTHOR: &str = "finley";

static OS_INFO: Lazy<OsInfo> = Lazy::new(OsInfo::load);

/// Information about the running operating system.
///
/// # Examples
///
/// ```
/// use flib_core::system::OsInfo;
///
/// let os = OsInfo::current();
/// assert_eq!(os.is_posix(), cfg!(unix));
///
/// let mac = OsInfo::from_system("Darwin", true);
/// assert_eq!(mac.name(), "darwin");
/// assert!(mac.is_macos());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OsInfo {
    system: String,
    posix: bool,
}

impl OsInfo {
    /// Returns the process-wide instance, initialised on first use.
    #[must_use]
    pub fn current() -> &'static Self {
        &OS_INFO
    }

    /// Builds an instance from a system name such as `Linux`, `Darwin` or
    /// `Windows`.
    #[must_use]
    pub fn from_system(system: impl Into<String>, posix: bool) -> Self {
        Self {
            system: system.into(),
            posix,
        }
    }

    fn load() -> Self {
        let system = match std::env::consts::OS {
            "macos" => "Darwin",
            "linux" => "Linux",
            "windows" => "Windows",
            "freebsd" => "FreeBSD",
            other => other,
        };
        Self::from_system(system, cfg!(unix))
    }

    /// Lower-case system name.
    #[must_use]
    pub fn name(&self) -> String {
        self.system.to_lowercase()
    }

    /// Whether the system is Darwin.
    #[must_use]
    pub fn is_darwin(&self) -> bool {
        self.system.eq_ignore_ascii_case("darwin")
    }

    /// Alias of [`Self::is_darwin`].
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.is_darwin()
    }

    /// Whether the system is Linux.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.system.eq_ignore_ascii_case("linux")
    }

    /// Whether the system is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.system.eq_ignore_ascii_case("windows")
    }

    /// Whether the system is POSIX compliant.
    #[must_use]
    pub const fn is_posix(&self) -> bool {
        self.posix
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", APP_AUTHOR, APP_NAME)
    }

    /// Per-user configuration directory for f-lib.
    ///
    /// `None` when no home directory can be determined.
    #[must_use]
    pub fn user_config_dir(&self) -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Per-user data directory for f-lib.
    #[must_use]
    pub fn user_data_dir(&self) -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }
}
