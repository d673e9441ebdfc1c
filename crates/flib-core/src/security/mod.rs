//! Extraction filters and permission sanitising.

pub mod filter;
pub mod permissions;

pub use filter::EntryFilter;
pub use filter::ExtractionFilter;
pub use filter::ValidatedEntry;
pub use filter::ValidatedKind;
pub use permissions::apply_mode;
pub use permissions::sanitize_mode;
