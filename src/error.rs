//! Decode failure type.

use std::fmt;

/// Boxed error type used for the request body's stream errors.
///
/// Matches what the hyper ecosystem produces: `hyper::body::Incoming`'s
/// error, like most body errors, converts into this.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a decode failure.
///
/// One [`DecodeError`] type covers every way a body can fail to decode; the
/// kind lets downstream code branch (retry an [`Io`](ErrorKind::Io) failure,
/// reject a [`Data`](ErrorKind::Data) mismatch outright) without matching on
/// message text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The body is not valid JSON.
    Syntax,
    /// The body is valid JSON but does not fit the target type.
    Data,
    /// The body ended before a complete top-level value was read.
    Eof,
    /// Reading the body stream itself failed.
    Io,
}

/// A failure while turning the request body into a typed value.
///
/// Application-level errors are expressed as HTTP [`Response`](crate::Response)
/// values, not as `DecodeError`s. This type surfaces exactly one thing: the
/// body could not be decoded into the configured target type.
///
/// `Display` reproduces the underlying decoder's message verbatim — it is
/// diagnostic text, not a stable contract.
#[derive(Debug)]
pub struct DecodeError {
    kind: ErrorKind,
    source: BoxError,
}

impl DecodeError {
    /// What class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn io(source: impl Into<BoxError>) -> Self {
        Self { kind: ErrorKind::Io, source: source.into() }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match e.classify() {
            Category::Syntax => ErrorKind::Syntax,
            Category::Data => ErrorKind::Data,
            Category::Eof => ErrorKind::Eof,
            Category::Io => ErrorKind::Io,
        };
        Self { kind, source: Box::new(e) }
    }
}
