//! Incoming HTTP request type.

use bytes::Bytes;
use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty};

use crate::error::BoxError;

/// The type-erased request body stream.
///
/// Any bytes-producing [`http_body::Body`] fits — `hyper::body::Incoming`
/// from a live connection, `http_body_util::Full` in tests.
pub type Body = UnsyncBoxBody<Bytes, BoxError>;

/// An incoming HTTP request: the parts of an [`http::Request`] plus its
/// body stream.
///
/// The host server builds one per request and hands it down the handler
/// chain. Per-request data travels in [`extensions`](Request::extensions) —
/// that is where the body parser leaves its decoded outcome.
pub struct Request {
    parts: Parts,
    body: Body,
}

impl Request {
    /// Wraps an [`http::Request`] with any bytes-producing body.
    pub fn new<B>(req: http::Request<B>) -> Self
    where
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        Self { parts, body: body.map_err(Into::into).boxed_unsync() }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Case-insensitive header lookup; `None` for missing or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Per-request extension data, shared by every handler in the chain.
    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.parts.extensions
    }

    /// Takes ownership of the body stream, leaving an empty body behind.
    ///
    /// The stream can be consumed once; whoever takes it owns its lifecycle
    /// and releases it by dropping it. A second call returns an empty body.
    pub fn take_body(&mut self) -> Body {
        let empty = Empty::new().map_err(|never| match never {}).boxed_unsync();
        std::mem::replace(&mut self.body, empty)
    }
}

impl<B> From<http::Request<B>> for Request
where
    B: http_body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    fn from(req: http::Request<B>) -> Self {
        Self::new(req)
    }
}
