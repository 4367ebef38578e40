// ============================
// crates/backend-lib/src/middleware/throttle.rs
// ============================
//! Throttle middleware for the `/auth` routes.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use metrics::counter;
use std::sync::Arc;

use crate::auth::Decision;
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::Store;
use crate::AppState;

/// Count the request against its source bucket; slow it down past the
/// first threshold, reject it past the second.
pub async fn throttle<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(request.headers());

    match state.throttle.check(&key) {
        Decision::Proceed => {},
        Decision::Delay(delay) => {
            counter!(keys::AUTH_DELAYED).increment(1);
            tracing::debug!(client = %key, delay_ms = delay.as_millis() as u64, "slowing auth request");
            tokio::time::sleep(delay).await;
        },
        Decision::Block => {
            counter!(keys::AUTH_THROTTLED).increment(1);
            tracing::warn!(client = %key, "auth request rate limit exceeded");
            return Err(AppError::RateLimited {
                retry_after_secs: state.throttle.retry_after_secs(),
            });
        },
    }

    Ok(next.run(request).await)
}

/// Bucket key for the calling client. The reverse proxy sets `x-real-ip`;
/// without it every caller shares one bucket, which fails toward caution.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_prefers_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_key(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_key_falls_back() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
