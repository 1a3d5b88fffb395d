//! Error types for Quill serialization and deserialization.
//!
//! Parsing Quill text is lenient by default and never fails: unterminated
//! blocks run to the end of input and lines without a colon are skipped.
//! Errors arise only from:
//!
//! - **Strict parsing**: [`Options::strict`](crate::Options::strict) turns an
//!   unterminated block into [`Error::UnterminatedBlock`]
//! - **The serde bridge**: values outside the Quill value space (null, enum
//!   variants carrying data, non-string map keys) or type mismatches while
//!   deserializing into a Rust type
//! - **I/O**: reading from or writing to a stream
//!
//! ## Examples
//!
//! ```rust
//! use serde_quill::{parse_with_options, Error, Options};
//!
//! let result = parse_with_options("items: [\n  one\n", &Options::strict());
//! match result {
//!     Err(Error::UnterminatedBlock { line, expected }) => {
//!         assert_eq!(line, 1);
//!         assert_eq!(expected, "]");
//!     }
//!     other => panic!("expected an unterminated block, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A block opened on `line` (1-based) reached end of input before its closer.
    #[error("Unterminated block opened at line {line}: expected '{expected}' before end of input")]
    UnterminatedBlock { line: usize, expected: String },

    /// A Rust value with no Quill representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Documents are mappings; anything else cannot be written at the top level.
    #[error("Top-level value must be a mapping, found {0}")]
    TopLevelNotMapping(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unterminated-block error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::Error;
    ///
    /// let err = Error::unterminated(3, "]]");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn unterminated(line: usize, expected: &str) -> Self {
        Error::UnterminatedBlock {
            line,
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot be represented in Quill.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
