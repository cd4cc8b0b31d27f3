//! Handler trait and type erasure.
//!
//! # How the chain is stored
//!
//! A middleware must hold "whatever comes next" without knowing its concrete
//! type: a plain `async fn`, a custom error handler, or another middleware's
//! output. Rust fields can only hold one concrete type, so we use trait
//! objects (`dyn ErasedHandler`) to hide the concrete handler behind a common
//! interface.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn create_user(req: Request) -> Response { … }   ← user writes this
//!        ↓ parser.handler(create_user)
//! create_user.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(create_user))                       ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! chain.call(req)  at request time                       ← one vtable dispatch
//! ```
//!
//! The only runtime cost per request is one `Arc` clone (atomic inc) plus one
//! virtual call — negligible compared to decoding the body.
//!
//! Unlike a framework that owns its server loop, the host invokes the chain
//! here, so [`ErasedHandler::call`] is public API: adapt a [`BoxedHandler`]
//! to your server by calling it once per request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Pin<Box<…>>` because the runtime polls the future in place; `Send` so the
/// host may move it across threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// The callable form every handler chain bottoms out in.
///
/// Hosts drive dispatch through this trait: one `call` per request.
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
///
/// `Arc` gives cheap, thread-safe shared ownership without copying the
/// handler. This is what [`BodyParser::handler`](crate::BodyParser::handler)
/// returns and what the host holds for the lifetime of the server.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid chain handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// and for an already-erased [`BoxedHandler`], so middleware outputs compose
/// with each other. The trait is **sealed** (via the private `Sealed`
/// supertrait): only the impls below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Handler` on their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

/// Implement `Handler` for any function with the right signature.
///
/// `Fn(Request) -> Fut` covers named `async fn` items, closures returning
/// async blocks, and any struct that implements `Fn`.
impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

impl private::Sealed for BoxedHandler {}

/// An already-erased handler is trivially a handler. This is what lets one
/// middleware's output be another middleware's `next`.
impl Handler for BoxedHandler {
    fn into_boxed_handler(self) -> BoxedHandler {
        self
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
