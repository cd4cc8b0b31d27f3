//! # hako
//!
//! Typed JSON request-body decoding middleware for hyper-based services.
//! Decode once, carry the outcome. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your host server owns routing, timeouts, body-size limits, and the accept
//! loop. hako does not — by design. It does exactly one thing, once per
//! request: decode the body into the type you configured, store the outcome
//! (the value *or* the decode error, never both) in the request's extensions,
//! and decide what runs next.
//!
//! Three failure policies, picked at construction time:
//!
//! - **default** — respond `400 Bad Request`; nothing downstream runs
//! - **[`BodyParser::on_error`]** — run your error handler instead of the chain
//! - **[`BodyParser::proceed_on_error`]** — run the chain; downstream checks
//!
//! The target type is a compile-time parameter. If it isn't something serde
//! can deserialize into — a reference, a function type — the chain does not
//! compile. Misconfiguration surfaces at build time, not at the first request.
//!
//! ## Quick start
//!
//! ```rust
//! use hako::{BodyParser, Request, Response, StatusCode, carrier};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     // Safe to unwrap the slot with `get`: under the default policy this
//!     // handler only runs when decoding succeeded.
//!     let Ok(user) = carrier::get::<CreateUser>(&req) else {
//!         return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
//!     };
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .text(format!("created {}", user.name))
//! }
//!
//! // Build once at startup; hand the chain to your server.
//! let chain = BodyParser::<CreateUser>::new().handler(create_user);
//!
//! // The host calls it once per request:
//! # let _ = chain;
//! // chain.call(request).await
//! ```
//!
//! See `demos/basic.rs` for full hyper wiring.

mod decode;
mod error;
mod handler;
mod parser;
mod request;
mod response;

pub mod carrier;

pub use decode::parse;
pub use error::{BoxError, DecodeError, ErrorKind};
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use http::StatusCode;
pub use parser::BodyParser;
pub use request::{Body, Request};
pub use response::{IntoResponse, Response, ResponseBuilder};
