//! Configuration options for exporting.
//!
//! [`ExportOptions`] controls indentation of the full export and the
//! truncation window of the shortened export. The defaults give the standard
//! layout: 4 spaces per nesting level, and strings longer than 40 characters
//! cut to their first 30 and last 7 characters.
//!
//! ## Examples
//!
//! ```rust
//! use serde_exporter::{export_with_options, ExportOptions, Value};
//!
//! let list = Value::from(vec![Value::from(1)]);
//!
//! let options = ExportOptions::new().with_indent(2);
//! assert_eq!(export_with_options(&list, &options), "Array &1 (\n  0 => 1\n)");
//! ```

/// Configuration options for the exporter.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::ExportOptions;
///
/// let options = ExportOptions::new()
///     .with_indent(2)
///     .with_string_window(20, 12, 5);
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.max_string_length, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Longest exported string the shortened export leaves intact.
    pub max_string_length: usize,
    /// Leading characters kept when a string is cut.
    pub keep_head: usize,
    /// Trailing characters kept when a string is cut.
    pub keep_tail: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            indent: 4,
            max_string_length: 40,
            keep_head: 30,
            keep_tail: 7,
        }
    }
}

impl ExportOptions {
    /// Creates the default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::ExportOptions;
    ///
    /// let options = ExportOptions::new();
    /// assert_eq!(options.indent, 4);
    /// assert_eq!((options.keep_head, options.keep_tail), (30, 7));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the shortened-export window: strings whose export is longer than
    /// `max` characters keep `head` leading and `tail` trailing characters
    /// around a `...` marker.
    ///
    /// When `head + tail + 3` exceeds `max`, the head is kept first and the
    /// tail gets what is left, so a cut string is never longer than `max`
    /// (or the three-character marker, for `max` below 3).
    #[must_use]
    pub fn with_string_window(mut self, max: usize, head: usize, tail: usize) -> Self {
        self.max_string_length = max;
        self.keep_head = head;
        self.keep_tail = tail;
        self
    }
}
