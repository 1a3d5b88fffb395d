//! Configuration options for Quill parsing and serialization.
//!
//! ## Examples
//!
//! ```rust
//! use serde_quill::{parse, serialize_with_options, Options};
//!
//! let doc = parse("page: {\ntitle: Home\n}");
//!
//! let text = serialize_with_options(&doc, &Options::new().with_indent(4));
//! assert_eq!(text, "page: {\n    title: Home\n}");
//! ```

/// Configuration options for Quill parsing and serialization.
///
/// Indentation only affects output: the parser trims every line, so nested
/// blocks may be indented any way the author likes.
///
/// # Examples
///
/// ```rust
/// use serde_quill::Options;
///
/// // Lenient parsing, 2-space indentation
/// let options = Options::new();
/// assert_eq!(options.indent, 2);
/// assert!(!options.strict);
///
/// // Reject unterminated blocks
/// let options = Options::strict().with_indent(4);
/// assert!(options.strict);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub indent: usize,
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indent: 2,
            strict: false,
        }
    }
}

impl Options {
    /// Creates default options (lenient parsing, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that make parsing fail on blocks missing their closer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::Options;
    ///
    /// assert!(Options::strict().strict);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        Options {
            strict: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per nesting level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables strict termination checking.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
