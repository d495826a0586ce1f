//! Per-client rate limiting for the API prefix.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::pipeline::API_PREFIX;

/// Response body sent when a client exceeds the quota.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP";

/// One fixed counting window for a client.
struct Window {
    started: Instant,
    count: u32,
}

/// State for the fixed-window rate limiter.
///
/// Windows reset rather than slide: the first request after a window expires
/// starts a fresh count.
pub struct RateLimiterState {
    windows: Mutex<HashMap<IpAddr, Window>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiterState {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    /// Count one request from `client` and report whether it is within
    /// quota.
    fn check(&self, client: IpAddr) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        let entry = windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }
}

/// Middleware enforcing the quota for paths under the API prefix.
///
/// Requests outside the prefix pass through uncounted. Over-quota requests
/// are answered inline and never reach later stages.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let under_api = match request.uri().path().strip_prefix(API_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    };
    if !under_api {
        return next.run(request).await;
    }

    let client = addr.ip();
    if state.check(client) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        let mut response = Response::new(Body::from(RATE_LIMIT_MESSAGE));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}
