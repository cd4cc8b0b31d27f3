//! Minimal hako example — a hyper server with one body-parsing chain.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice","age":30}'
//!   curl -X POST http://localhost:3000/users -d '"not an object"'

use std::convert::Infallible;
use std::sync::Arc;

use hako::{BodyParser, BoxedHandler, ErasedHandler, Request, Response, StatusCode, carrier};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct CreateUser {
    name: String,
    age: u32,
}

// Runs only when decoding succeeded — the default policy already answered
// 400 for anything malformed.
async fn create_user(req: Request) -> Response {
    let Ok(user) = carrier::get::<CreateUser>(&req) else {
        return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
    };
    info!(name = %user.name, age = user.age, "creating user");
    Response::builder()
        .status(StatusCode::CREATED)
        .json(format!(r#"{{"name":"{}","age":{}}}"#, user.name, user.age).into_bytes())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Build the chain once at startup; configuration is frozen from here on.
    let chain: BoxedHandler = BodyParser::<CreateUser>::new().handler(create_user);

    let listener = TcpListener::bind("0.0.0.0:3000").await.expect("bind 0.0.0.0:3000");
    info!("listening on 0.0.0.0:3000");

    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(v) => v,
            Err(e) => {
                error!("accept error: {e}");
                continue;
            }
        };

        let chain = Arc::clone(&chain);
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let svc = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                let chain = Arc::clone(&chain);
                async move {
                    let res = chain.call(Request::new(req)).await;
                    Ok::<_, Infallible>(res.into_http())
                }
            });

            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                error!(peer = %remote_addr, "connection error: {e}");
            }
        });
    }
}
