//! Operating system and machine introspection.

mod arch;
mod os;

pub use arch::Architecture;
pub use arch::SystemInfo;
pub use arch::UnknownPlatformArchitecture;
pub use os::OsInfo;
