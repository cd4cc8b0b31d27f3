//! Body-to-value decoding.

use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::request::Body;

/// Decodes a request body stream into a `T`.
///
/// Buffers the stream to completion, then deserializes the bytes as a single
/// top-level JSON document: object keys map to struct fields, arrays to
/// sequences, scalars to matching primitives — standard serde semantics.
///
/// One attempt, no retry; the stream is consumed and dropped inside this call
/// on every path, success or failure. Stream I/O failures surface as a
/// [`DecodeError`] of kind [`Io`](crate::ErrorKind::Io); malformed, truncated,
/// or mismatched payloads keep serde_json's classification.
pub async fn parse<T: DeserializeOwned>(body: Body) -> Result<T, DecodeError> {
    let bytes = body.collect().await.map_err(DecodeError::io)?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}
