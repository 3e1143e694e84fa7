//! Audit middleware recording every inbound request before it is handled.

use std::net::SocketAddr;

use aquafarm_core::models::api_call::NewApiCall;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Caller address used when no header or peer address is available.
const UNKNOWN_CALLER: &str = "unknown";

/// Record `(path, method, caller)` and pass the request on.
///
/// A failed write is logged and swallowed; the request is still served.
pub async fn record_api_call(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let call = NewApiCall {
        endpoint: request.uri().path().to_string(),
        method: request.method().to_string(),
        caller_address: caller_address(&request),
    };

    tracing::info!(
        method = %call.method,
        endpoint = %call.endpoint,
        ip = %call.caller_address,
        "Incoming request"
    );

    if let Err(e) = state.api_calls.record(&call).await {
        tracing::warn!(error = %e, endpoint = %call.endpoint, "Failed to record api call");
    }

    next.run(request).await
}

/// Resolve the client address: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the socket peer.
fn caller_address(request: &Request) -> String {
    forwarded_for(request.headers())
        .or_else(|| header_value(request.headers(), "x-real-ip"))
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| UNKNOWN_CALLER.to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")?
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = http::Request::builder().uri("/api/farms");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn first_forwarded_for_entry_wins() {
        let req = request(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(caller_address(&req), "203.0.113.7");
    }

    #[test]
    fn real_ip_used_without_forwarded_for() {
        let req = request(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(caller_address(&req), "198.51.100.2");
    }

    #[test]
    fn peer_address_used_without_headers() {
        let mut req = request(&[]);
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 51000))));
        assert_eq!(caller_address(&req), "192.168.1.20");
    }

    #[test]
    fn unknown_when_nothing_identifies_the_caller() {
        assert_eq!(caller_address(&request(&[])), "unknown");
    }
}
