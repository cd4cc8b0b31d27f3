//! The body-parsing middleware.
//!
//! [`BodyParser<T>`] decodes the request body into a `T` once, stores the
//! outcome in the request's extensions, and decides what runs next. One
//! decode per request, one slot, three failure policies:
//!
//! | Configuration | On decode failure |
//! |---|---|
//! | default | respond `400 Bad Request`, nothing downstream runs |
//! | [`on_error`](BodyParser::on_error) | store the error, run the custom handler instead of `next` |
//! | [`proceed_on_error`](BodyParser::proceed_on_error) | store the error, run `next` anyway |
//!
//! `proceed_on_error` wins if both are set. On success the decoded value is
//! stored and `next` runs; either way the body stream is consumed exactly
//! once, before any branch is taken.
//!
//! Configuration happens before serving, by construction: the builder methods
//! take `self` by value and [`handler`](BodyParser::handler) consumes the
//! parser, so there is no way to reconfigure a chain that is already live.
//!
//! # Example
//!
//! ```rust
//! use hako::{BodyParser, Request, Response, carrier};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     match carrier::get::<CreateUser>(&req) {
//!         Ok(user) => Response::text(format!("hello, {}", user.name)),
//!         Err(err) => Response::text(err.to_string()),
//!     }
//! }
//!
//! let chain = BodyParser::<CreateUser>::new()
//!     .proceed_on_error()
//!     .handler(create_user);
//! // hand `chain` to the host server; it calls `chain.call(req)` per request
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::{carrier, decode};

/// Fixed response body for the default failure policy.
const BAD_REQUEST_BODY: &str = "400 Bad Request";

/// Body-decoding middleware for a single target type.
///
/// The target type is fixed at compile time: anything `DeserializeOwned`
/// qualifies, and anything that can't be deserialized into — references,
/// function types, channels — is rejected by the compiler instead of at
/// setup time. Construction cannot fail.
pub struct BodyParser<T> {
    proceed_on_error: bool,
    on_error: Option<BoxedHandler>,
    _target: PhantomData<fn() -> T>,
}

impl<T> BodyParser<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// A parser with the default failure policy: abort with `400 Bad Request`.
    pub fn new() -> Self {
        Self {
            proceed_on_error: false,
            on_error: None,
            _target: PhantomData,
        }
    }

    /// On decode failure, store the error and run the next handler anyway.
    ///
    /// The downstream handler owns the check: [`carrier::get`] returns the
    /// error that would otherwise have aborted the chain. Takes precedence
    /// over [`on_error`](BodyParser::on_error) if both are configured.
    pub fn proceed_on_error(mut self) -> Self {
        self.proceed_on_error = true;
        self
    }

    /// On decode failure, store the error and run `handler` instead of the
    /// next handler.
    ///
    /// The handler reads the failure via [`carrier::error`] and owns the
    /// response.
    pub fn on_error(mut self, handler: impl Handler) -> Self {
        self.on_error = Some(handler.into_boxed_handler());
        self
    }

    /// Consumes the configuration and wraps `next`, producing the chain
    /// handler the host serves.
    pub fn handler(self, next: impl Handler) -> BoxedHandler {
        Arc::new(Parse {
            proceed_on_error: self.proceed_on_error,
            on_error: self.on_error,
            next: next.into_boxed_handler(),
            _target: self._target,
        })
    }
}

impl<T> Default for BodyParser<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

// ── The chain handler ─────────────────────────────────────────────────────────

/// The built middleware: frozen configuration plus the rest of the chain.
struct Parse<T> {
    proceed_on_error: bool,
    on_error: Option<BoxedHandler>,
    next: BoxedHandler,
    _target: PhantomData<fn() -> T>,
}

impl<T> ErasedHandler for Parse<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn call(&self, mut req: Request) -> BoxFuture {
        let proceed_on_error = self.proceed_on_error;
        let on_error = self.on_error.clone();
        let next = Arc::clone(&self.next);

        Box::pin(async move {
            // The body leaves the request here and is dropped inside `parse`,
            // so it is consumed and released exactly once on every branch.
            let body = req.take_body();

            match decode::parse::<T>(body).await {
                Ok(value) => {
                    debug!(target_type = std::any::type_name::<T>(), "request body decoded");
                    carrier::put(&mut req, Ok(value));
                    next.call(req).await
                }
                Err(err) => {
                    warn!(
                        target_type = std::any::type_name::<T>(),
                        kind = ?err.kind(),
                        error = %err,
                        "request body decode failed"
                    );

                    if proceed_on_error {
                        carrier::put::<T>(&mut req, Err(err));
                        return next.call(req).await;
                    }

                    if let Some(handler) = on_error {
                        carrier::put::<T>(&mut req, Err(err));
                        return handler.call(req).await;
                    }

                    Response::builder()
                        .status(StatusCode::BAD_REQUEST)
                        .text(BAD_REQUEST_BODY)
                }
            }
        })
    }
}
