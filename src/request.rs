//! A uniform calling convention over remote fetch functions.
//!
//! Each endpoint supplies its own fetch function returning a transport
//! envelope; [`RequestHandler`] wraps it so every call site invokes
//! `handler.call(params)` and receives only the payload. Failures pass
//! through untouched: there is no retry, caching or status interpretation
//! at this layer.

use crate::error::RequestError;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Transport envelope around a decoded payload.
pub struct ApiResponse<R> {
    /// HTTP status of the response.
    pub status: u16,
    /// Decoded response body.
    pub data: R,
}

type FetchFn<P, R> = dyn Fn(P, Option<CancellationToken>) -> BoxFuture<'static, Result<ApiResponse<R>, RequestError>>
    + Send
    + Sync;

/// Reusable function value closing over a fetch implementation.
pub struct RequestHandler<P, R> {
    fetch: Arc<FetchFn<P, R>>,
}

impl<P, R> Clone for RequestHandler<P, R> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
        }
    }
}

impl<P, R> RequestHandler<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
{
    /// Wraps `fetch`, which receives the call parameters and the caller's
    /// cancellation token (if any).
    #[must_use]
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(P, Option<CancellationToken>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse<R>, RequestError>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move |params: P, cancel: Option<CancellationToken>| {
                fetch(params, cancel).boxed()
            }),
        }
    }

    /// Performs the request and returns the payload.
    ///
    /// # Errors
    ///
    /// Returns whatever error the fetch function produced.
    pub async fn call(&self, params: P) -> Result<R, RequestError> {
        self.call_with_cancel(params, None).await
    }

    /// Performs the request, handing `cancel` to the fetch function as-is.
    ///
    /// # Errors
    ///
    /// Returns whatever error the fetch function produced.
    pub async fn call_with_cancel(
        &self,
        params: P,
        cancel: Option<CancellationToken>,
    ) -> Result<R, RequestError> {
        let response = (self.fetch)(params, cancel).await?;
        Ok(response.data)
    }
}

/// Builds a [`RequestHandler`] from a fetch function.
#[must_use]
pub fn request_handler<P, R, F, Fut>(fetch: F) -> RequestHandler<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(P, Option<CancellationToken>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ApiResponse<R>, RequestError>> + Send + 'static,
{
    RequestHandler::new(fetch)
}

/// Sends `request` and decodes a JSON body into the envelope.
///
/// Used by fetch functions backed by `reqwest`. When `cancel` fires before
/// the response is complete the request is dropped.
///
/// # Errors
///
/// Returns [`RequestError::Network`] if no response arrives,
/// [`RequestError::Status`] for a non-success status,
/// [`RequestError::Decode`] if the body is not the expected JSON and
/// [`RequestError::Cancelled`] if the token fires first.
pub async fn send_json<R: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    cancel: Option<CancellationToken>,
) -> Result<ApiResponse<R>, RequestError> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(RequestError::Cancelled),
                result = execute(request) => result,
            }
        }
        None => execute(request).await,
    }
}

async fn execute<R: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<ApiResponse<R>, RequestError> {
    let response = request
        .send()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    let status = response.status();
    debug!(url = %response.url(), status = status.as_u16(), "received response");
    if !status.is_success() {
        return Err(RequestError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let data = response
        .json::<R>()
        .await
        .map_err(|e| RequestError::Decode(e.to_string()))?;

    Ok(ApiResponse {
        status: status.as_u16(),
        data,
    })
}

#[cfg(test)]
#[path = "tests/request.rs"]
mod tests;
