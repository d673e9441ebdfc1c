//! Subcommand implementations.

pub mod check;
pub mod completion;
pub mod extract;
pub mod formats;
pub mod info;
