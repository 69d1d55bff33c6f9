//! Error types for value conversion and output.
//!
//! Exporting never fails: every [`Value`](crate::Value) renders to *some* text.
//! Errors only arise at the edges of the crate, when a Rust type is converted
//! into a [`Value`](crate::Value) through Serde, when a dynamic value is built
//! in a way its shape does not allow, or when rendered text is written out.
//!
//! ## Error Categories
//!
//! - **Conversion Errors**: a `Serialize` implementation reported a custom error,
//!   or produced a map key that is neither an integer nor a string
//! - **Shape Errors**: an element was attached to an object without the
//!   enumeration capability
//! - **I/O Errors**: writing the rendered text failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_exporter::{Error, Object};
//!
//! let plain = Object::new("Point");
//! let err = plain.attach(Object::new("Item"), ().into()).unwrap_err();
//! assert!(matches!(err, Error::NotEnumerable(_)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised around the exporter.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Map key that cannot become an array key
    #[error("Unsupported key: {0} (array keys must be integers or strings)")]
    UnsupportedKey(String),

    /// Attachment requested on an object that only exposes fields
    #[error("Object of class {0} does not support attached elements")]
    NotEnumerable(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported key error, naming what was found in key position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::Error;
    ///
    /// let err = Error::unsupported_key("float");
    /// assert!(err.to_string().contains("float"));
    /// ```
    pub fn unsupported_key(found: &str) -> Self {
        Error::UnsupportedKey(found.to_string())
    }

    /// Creates an error for an attach call on a plain record.
    pub fn not_enumerable(class: &str) -> Self {
        Error::NotEnumerable(class.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
