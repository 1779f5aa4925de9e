use std::time::Duration;

use axum::{
    body::Body,
    extract::{OriginalUri, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::BodyExt;
use log::debug;
use serde_json::{from_str, Value};

use crate::{error::AppError, state::State as AppState};

/// To be used with endpoints whose answer depends on the query string
pub type QueryCacheMiddleware = ResponseCacheMiddleware<true>;
/// To be used with endpoints whose answer depends on the path only
pub type PathCacheMiddleware = ResponseCacheMiddleware<false>;

/// Caches successful JSON GET responses in process for the configured TTL.
#[derive(Copy, Clone)]
pub struct ResponseCacheMiddleware<const WITH_QUERY: bool>;

impl<const WITH_QUERY: bool> ResponseCacheMiddleware<WITH_QUERY> {
    pub async fn handler(
        State(state): State<AppState>,
        OriginalUri(uri): OriginalUri,
        request: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let ttl = Duration::from_secs(state.config.cache_ttl_secs);
        if request.method() != Method::GET || ttl.is_zero() {
            return Ok(next.run(request).await);
        }

        let key = format!(
            "{}:{}",
            match WITH_QUERY {
                true => uri.to_string(),
                false => uri.path().to_string(),
            },
            request.method()
        );
        if let Some(cached) = state.cached_response(&key) {
            debug!("Cache hit for {}", key);
            return Ok(Json(from_str::<Value>(&cached)?).into_response());
        }

        let response = next.run(request).await;
        let (parts, body) = response.into_parts();

        // errors are never cached
        if parts.status.is_client_error() || parts.status.is_server_error() {
            return Ok(Response::from_parts(parts, body));
        }

        let bytes = body.collect().await?.to_bytes();
        let Json(body) = Json::<Value>::from_bytes(&bytes)?;
        state.cache_response(key, serde_json::to_string(&body)?, ttl);
        Ok(Response::from_parts(parts, Body::from(bytes)))
    }
}
