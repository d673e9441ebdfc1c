//! Extraction options.

use crate::security::ExtractionFilter;

/// Options controlling a single extraction.
///
/// The defaults apply the `data` filter and create the destination when it
/// is missing.
///
/// # Examples
///
/// ```
/// use flib_core::ExtractOptions;
/// use flib_core::ExtractionFilter;
///
/// let options = ExtractOptions::default();
/// assert_eq!(options.filter, Some(ExtractionFilter::Data));
///
/// let custom = ExtractOptions {
///     filter: Some(ExtractionFilter::Tar),
///     create_destination: false,
///     ..Default::default()
/// };
/// assert!(!custom.create_destination);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Member filter. `None` means no safe filter is available; the tar
    /// extractor refuses to run in that case.
    pub filter: Option<ExtractionFilter>,

    /// Create the destination directory (and parents) when missing.
    pub create_destination: bool,

    /// Maximum number of components in a member path.
    pub max_path_depth: usize,

    /// Replace files and links that already exist at a member's path.
    pub overwrite: bool,
}

impl Default for ExtractOptions {
    /// Default values:
    /// - `filter`: `Some(ExtractionFilter::Data)`
    /// - `create_destination`: true
    /// - `max_path_depth`: 32
    /// - `overwrite`: true
    fn default() -> Self {
        Self {
            filter: Some(ExtractionFilter::Data),
            create_destination: true,
            max_path_depth: 32,
            overwrite: true,
        }
    }
}

impl ExtractOptions {
    /// Returns options with no extraction filter.
    ///
    /// Simulates a runtime without safe-extraction support; tar extraction
    /// fails with `UnsafeExtractionUnsupported`.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            filter: None,
            ..Self::default()
        }
    }

    /// Sets the extraction filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ExtractionFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets whether a missing destination is created.
    #[must_use]
    pub fn with_create_destination(mut self, create: bool) -> Self {
        self.create_destination = create;
        self
    }

    /// Returns the filter to use for formats that always filter.
    #[must_use]
    pub fn filter_or_data(&self) -> ExtractionFilter {
        self.filter.unwrap_or(ExtractionFilter::Data)
    }
}
