//! Request context middleware
//!
//! Collects what listing filters may know about the caller and stores it in
//! the request extensions.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::listing::RequestContext;

/// Header carrying the client's numeric version
pub const CLIENT_VERSION_HEADER: &str = "client-version";

/// Build a request context from the connection and headers
pub fn context_from_parts(client_addr: Option<SocketAddr>, headers: &HeaderMap) -> RequestContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let client_version = headers
        .get(CLIENT_VERSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.trim().parse().ok());

    RequestContext {
        client_addr,
        user_agent,
        client_version,
    }
}

/// Middleware attaching a `RequestContext` to every request
pub async fn attach_request_context(mut request: Request, next: Next) -> Response {
    // Connection info is absent when the router is driven without a socket
    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let ctx = context_from_parts(client_addr, request.headers());

    // Insert into request extensions for handlers to access
    request.extensions_mut().insert(ctx);

    next.run(request).await
}
