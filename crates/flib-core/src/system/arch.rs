//! Architecture detection.

use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::OsInfo;

static SYSTEM_INFO: Lazy<SystemInfo> = Lazy::new(SystemInfo::load);

const X86_MACHINES: &[&str] = &["amd64", "i386", "i686", "x86", "x86_64"];

/// Normalised CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// 32-bit x86.
    Amd32,
    /// 64-bit x86.
    Amd64,
    /// 32-bit ARM.
    Arm32,
    /// 64-bit ARM.
    Arm64,
}

impl Architecture {
    /// Returns the architecture name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd32 => "amd32",
            Self::Amd64 => "amd64",
            Self::Arm32 => "arm32",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The machine is neither ARM nor x86.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform architecture: {machine}")]
pub struct UnknownPlatformArchitecture {
    /// Machine name as reported by the platform.
    pub machine: String,
}

/// Information about the running machine.
///
/// # Examples
///
/// ```
/// use flib_core::system::Architecture;
/// use flib_core::system::OsInfo;
/// use flib_core::system::SystemInfo;
///
/// let info = SystemInfo::new("aarch64", 64, OsInfo::from_system("Linux", true));
/// assert!(info.is_arm());
/// assert_eq!(info.architecture().unwrap(), Architecture::Arm64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SystemInfo {
    machine: String,
    pointer_width: u32,
    os: OsInfo,
}

impl SystemInfo {
    /// Returns the process-wide instance, initialised on first use.
    #[must_use]
    pub fn current() -> &'static Self {
        &SYSTEM_INFO
    }

    /// Builds an instance from explicit values.
    #[must_use]
    pub fn new(machine: impl Into<String>, pointer_width: u32, os: OsInfo) -> Self {
        Self {
            machine: machine.into(),
            pointer_width,
            os,
        }
    }

    fn load() -> Self {
        Self::new(std::env::consts::ARCH, usize::BITS, OsInfo::current().clone())
    }

    /// Machine name.
    #[must_use]
    pub fn machine(&self) -> &str {
        &self.machine
    }

    /// Pointer width in bits.
    #[must_use]
    pub const fn pointer_width(&self) -> u32 {
        self.pointer_width
    }

    /// Whether pointers are 32 bits or narrower.
    #[must_use]
    pub const fn is_32bit(&self) -> bool {
        self.pointer_width <= 32
    }

    /// Whether pointers are wider than 32 bits.
    #[must_use]
    pub const fn is_64bit(&self) -> bool {
        self.pointer_width > 32
    }

    /// Whether the machine is ARM.
    #[must_use]
    pub fn is_arm(&self) -> bool {
        let machine = self.machine.to_ascii_lowercase();
        machine.starts_with("arm") || machine.starts_with("aarch")
    }

    /// Whether the machine is x86.
    #[must_use]
    pub fn is_x86(&self) -> bool {
        X86_MACHINES
            .iter()
            .any(|name| self.machine.eq_ignore_ascii_case(name))
    }

    /// Normalised architecture.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPlatformArchitecture` when the machine is neither ARM
    /// nor x86.
    pub fn architecture(&self) -> Result<Architecture, UnknownPlatformArchitecture> {
        match (self.is_arm(), self.is_x86(), self.is_64bit()) {
            (true, _, true) => Ok(Architecture::Arm64),
            (true, _, false) => Ok(Architecture::Arm32),
            (false, true, true) => Ok(Architecture::Amd64),
            (false, true, false) => Ok(Architecture::Amd32),
            (false, false, _) => Err(UnknownPlatformArchitecture {
                machine: self.machine.clone(),
            }),
        }
    }

    /// Operating system information.
    #[must_use]
    pub const fn os(&self) -> &OsInfo {
        &self.os
    }
}
