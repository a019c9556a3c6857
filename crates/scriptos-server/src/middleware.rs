use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one request, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug)]
struct QuotaWindow {
    opened: Instant,
    used: usize,
}

/// Fixed-window limiter in front of the routes that spend remote API quota.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    budget: usize,
    period: Duration,
    window: Arc<Mutex<QuotaWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(budget: usize, period: Duration) -> Self {
        Self {
            budget,
            period,
            window: Arc::new(Mutex::new(QuotaWindow {
                opened: Instant::now(),
                used: 0,
            })),
        }
    }

    /// Spends one request from the current window.
    ///
    /// Returns the time left until the window reopens when the budget is gone.
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut window = self.window.lock().await;
        let elapsed = window.opened.elapsed();
        if elapsed >= self.period {
            window.opened = Instant::now();
            window.used = 0;
        } else if window.used >= self.budget {
            return Err(self.period.saturating_sub(elapsed));
        }
        window.used += 1;
        Ok(())
    }
}

/// Reuses a caller-supplied `x-request-id` or mints a UUID, then echoes it
/// on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    res
}

pub async fn enforce_rate_limit(
    State(limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(wait) = limit.try_acquire().await {
        let req_id = req
            .extensions()
            .get::<RequestId>()
            .map_or_else(String::new, |r| r.0.clone());
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        let mut res = ApiError::new(req_id, "rate_limited", "rate limit exceeded").into_response();
        res.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(wait.as_secs().max(1)),
        );
        return res;
    }
    next.run(req).await
}

/// The OAuth access token from an `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    extract_bearer_token(headers.get(header::AUTHORIZATION))
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
