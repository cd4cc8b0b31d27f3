//! The decoded-body slot on the request's extensions.
//!
//! [`BodyParser`](crate::BodyParser) stores the outcome of decoding — the
//! value or the error, never both — in the request's extension data, keyed by
//! the target type. Downstream handlers read it back here.
//!
//! Keying by type means independently configured parsers with *different*
//! target types can run on the same request without stepping on each other.
//! Installing two parsers with the *same* target type on one chain is a
//! misconfiguration: the slot is set exactly once per request.
//!
//! Which accessor to reach for:
//!
//! - [`get`] — the normal read downstream of the parser; panics only if the
//!   parser is not installed at all.
//! - [`outcome`] — the safe probe, for handlers that may run with or without
//!   the parser in front of them.
//! - [`error`] — for handlers that only ever run on the failure path (custom
//!   error handlers); panics anywhere else, on purpose.

use std::sync::Arc;

use crate::error::DecodeError;
use crate::request::Request;

/// The slot value: one decode outcome for one target type.
///
/// `Arc`-backed so it satisfies the `Clone` bound of [`http::Extensions`]
/// without requiring `T: Clone`; downstream handlers read the outcome by
/// reference.
pub struct Decoded<T>(Arc<Result<T, DecodeError>>);

impl<T> Decoded<T> {
    /// The outcome as a discriminated result.
    pub fn as_result(&self) -> Result<&T, &DecodeError> {
        self.0.as_ref().as_ref()
    }
}

impl<T> Clone for Decoded<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Stores the decode outcome on the request. Called exactly once per request
/// traversal of the parser.
pub(crate) fn put<T>(req: &mut Request, outcome: Result<T, DecodeError>)
where
    T: Send + Sync + 'static,
{
    debug_assert!(
        req.extensions().get::<Decoded<T>>().is_none(),
        "decoded-body slot for this target type is already set; \
         is the same BodyParser installed twice on one chain?"
    );
    req.extensions_mut().insert(Decoded(Arc::new(outcome)));
}

/// Returns the decoded value, or the decode error if decoding failed.
///
/// # Panics
///
/// Panics if no parser for `T` ran on this request — an absent slot is a
/// wiring bug, not a request-level condition. Use [`outcome`] when the parser
/// may legitimately be missing.
pub fn get<T>(req: &Request) -> Result<&T, &DecodeError>
where
    T: Send + Sync + 'static,
{
    outcome(req).unwrap_or_else(|| {
        panic!(
            "no decoded body of type `{}` in request extensions; \
             is the BodyParser middleware installed on this chain?",
            std::any::type_name::<T>()
        )
    })
}

/// Reads the slot without asserting it exists: `None` means no parser for `T`
/// ran on this request.
pub fn outcome<T>(req: &Request) -> Option<Result<&T, &DecodeError>>
where
    T: Send + Sync + 'static,
{
    req.extensions().get::<Decoded<T>>().map(Decoded::as_result)
}

/// Returns the decode error.
///
/// For handlers that only run on the failure path, where the error is known
/// to exist — a custom `on_error` handler, typically.
///
/// # Panics
///
/// Panics if the slot is absent or holds a successfully decoded value.
/// Calling this anywhere but a known error path is a programming error, and
/// it fails loudly rather than inventing a sentinel.
pub fn error<T>(req: &Request) -> &DecodeError
where
    T: Send + Sync + 'static,
{
    match get::<T>(req) {
        Err(e) => e,
        Ok(_) => panic!(
            "decoded-body slot for `{}` holds a value, not an error",
            std::any::type_name::<T>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http_body_util::Full;

    use super::*;

    fn request() -> Request {
        Request::new(
            http::Request::builder()
                .body(Full::new(Bytes::new()))
                .unwrap(),
        )
    }

    fn mismatch_error() -> DecodeError {
        serde_json::from_str::<Vec<String>>(r#""not slice""#)
            .unwrap_err()
            .into()
    }

    #[test]
    fn slot_holds_a_value_after_successful_put() {
        let mut req = request();
        put(&mut req, Ok(vec!["a".to_owned()]));

        assert_eq!(get::<Vec<String>>(&req).unwrap(), &vec!["a".to_owned()]);
        assert!(outcome::<Vec<String>>(&req).unwrap().is_ok());
    }

    #[test]
    fn slot_holds_an_error_after_failed_put() {
        let mut req = request();
        put::<Vec<String>>(&mut req, Err(mismatch_error()));

        assert!(get::<Vec<String>>(&req).is_err());
        assert_eq!(error::<Vec<String>>(&req).kind(), crate::ErrorKind::Data);
    }

    #[test]
    fn slots_are_keyed_by_target_type() {
        let mut req = request();
        put(&mut req, Ok(vec!["a".to_owned()]));
        put(&mut req, Ok(42u64));

        assert!(get::<Vec<String>>(&req).is_ok());
        assert_eq!(get::<u64>(&req).unwrap(), &42);
    }

    #[test]
    fn outcome_is_none_when_no_parser_ran() {
        let req = request();
        assert!(outcome::<Vec<String>>(&req).is_none());
    }

    #[test]
    #[should_panic(expected = "no decoded body")]
    fn get_panics_when_no_parser_ran() {
        let req = request();
        let _ = get::<Vec<String>>(&req);
    }

    #[test]
    #[should_panic(expected = "holds a value, not an error")]
    fn error_panics_on_a_successful_decode() {
        let mut req = request();
        put(&mut req, Ok(vec!["a".to_owned()]));
        let _ = error::<Vec<String>>(&req);
    }
}
