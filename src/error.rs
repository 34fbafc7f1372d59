//! Error types for NBT reading, writing and tree manipulation.
//!
//! This module contains the [`Error`] type which represents every failure the
//! crate can report, and [`ErrorKind`] which groups those failures into the
//! broad categories callers usually branch on.
//!
//! # Example
//!
//! ```
//! use nbt_tree::{Compression, Error, ErrorKind, NbtFile};
//!
//! let data = [0x01, 0x00, 0x00, 0x2A];
//! match NbtFile::from_bytes(&data, Compression::None) {
//!     Err(err) if err.kind() == ErrorKind::Format => {}
//!     other => panic!("expected a format error, got {other:?}"),
//! }
//! ```

use crate::{Compression, TagID};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// The stream content is malformed.
    Format,
    /// The underlying stream failed or ended early.
    Io,
    /// An argument passed to the API is invalid for the call.
    Argument,
    /// An index is outside the bounds of a list.
    Range,
    /// A typed accessor was applied to a tag of another type.
    Cast,
    /// The operation is not supported on the given stream.
    NotSupported,
}

/// This type represents all possible errors that can occur when reading,
/// writing or editing NBT data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// This also covers corrupt compressed data, which the flate2 decoders
    /// report as I/O errors.
    #[error("{0}")]
    IO(#[source] std::io::Error),

    /// The input ended unexpectedly.
    #[error("unexpected end of input")]
    EndOfFile,

    /// An unknown tag type byte was encountered.
    ///
    /// Tag types 0-11 are defined. Anything else is rejected with the
    /// offending byte.
    #[error("invalid NBT tag type: {0:#04x}")]
    InvalidTagType(u8),

    /// A length prefix was negative.
    #[error("negative {what} length: {len}")]
    NegativeLength { what: &'static str, len: i32 },

    /// A string payload was not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// The document does not start with a Compound tag.
    #[error("given NBT stream does not start with a Compound tag (found {0:#04x})")]
    RootNotCompound(u8),

    /// A Compound payload contained two children with the same name.
    #[error("duplicate tag name in compound: {0:?}")]
    DuplicateNameInStream(String),

    /// A list declares elements of an unknown type but is not empty.
    #[error("list of {len} elements has an unknown element type")]
    UnknownListType { len: usize },

    /// Tags nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    /// The first byte of the stream matches no known container.
    #[error("could not detect compression from first byte {0:#04x}")]
    UndetectableCompression(u8),

    /// The zlib header does not start with 0x78.
    #[error("invalid zlib header: {0:#04x}")]
    InvalidZlibHeader(u8),

    /// A tag with no name was given where a name is required.
    #[error("tag must be named")]
    UnnamedTag,

    /// A Compound already holds a child with this name.
    #[error("a tag named {0:?} already exists in this compound")]
    DuplicateName(String),

    /// A list element does not match the list's element type.
    #[error("tag in list mismatch: expected {expected:?}, got {actual:?}")]
    TagMismatch { expected: TagID, actual: TagID },

    /// The given type cannot be used as a list element type.
    #[error("{0:?} is not a valid list element type")]
    InvalidListType(TagID),

    /// The document root must be a named Compound.
    #[error("root tag must be a named Compound, got {0:?}")]
    RootMustBeCompound(TagID),

    /// A string is too long for its 16-bit length prefix.
    #[error("string of {0} bytes exceeds the maximum encodable length")]
    StringTooLong(usize),

    /// A collection is too long for its 32-bit length prefix.
    #[error("{what} of {len} elements exceeds the maximum encodable length")]
    TooLong { what: &'static str, len: usize },

    /// The compression selector is not valid for this call.
    #[error("compression {0:?} is not valid here")]
    InvalidCompression(Compression),

    /// A list index is out of bounds.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A typed accessor found a tag of another type.
    #[error("tag type mismatch: expected {expected:?}, got {actual:?}")]
    Cast { expected: TagID, actual: TagID },

    /// Compression auto-detection needs to rewind the stream.
    #[error("compression auto-detection requires a seekable stream")]
    NotSeekable,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IO(_) | Error::EndOfFile => ErrorKind::Io,
            Error::InvalidTagType(_)
            | Error::NegativeLength { .. }
            | Error::InvalidUtf8
            | Error::RootNotCompound(_)
            | Error::DuplicateNameInStream(_)
            | Error::UnknownListType { .. }
            | Error::DepthLimitExceeded(_)
            | Error::UndetectableCompression(_)
            | Error::InvalidZlibHeader(_) => ErrorKind::Format,
            Error::UnnamedTag
            | Error::DuplicateName(_)
            | Error::TagMismatch { .. }
            | Error::InvalidListType(_)
            | Error::RootMustBeCompound(_)
            | Error::StringTooLong(_)
            | Error::TooLong { .. }
            | Error::InvalidCompression(_) => ErrorKind::Argument,
            Error::IndexOutOfRange { .. } => ErrorKind::Range,
            Error::Cast { .. } => ErrorKind::Cast,
            Error::NotSeekable => ErrorKind::NotSupported,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::EndOfFile
        } else {
            Error::IO(error)
        }
    }
}
