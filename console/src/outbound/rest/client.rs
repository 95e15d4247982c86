//! Reqwest-backed transport shared by every resource gateway.
//!
//! This wrapper owns transport details only: bearer attachment from the
//! persisted session, the request timeout, and the mapping from HTTP
//! outcomes to [`DomainError`] codes. Resource semantics live in the
//! per-entity adapters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::ports::SessionStore;

/// Shared HTTP transport for the REST gateways.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base: Url,
    store: Arc<dyn SessionStore>,
}

impl RestClient {
    /// Build a transport with an explicit request timeout.
    ///
    /// The base URL is normalised to end in `/` so endpoint paths join
    /// without clobbering any mount prefix.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be constructed.
    pub fn new(
        mut base: Url,
        timeout: Duration,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base, store })
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// `InternalError` when the path does not join cleanly.
    pub fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        self.base
            .join(path)
            .map_err(|err| DomainError::internal(format!("endpoint `{path}` is invalid: {err}")))
    }

    /// Start a GET request.
    pub fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url)
    }

    /// Start a POST request.
    pub fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url)
    }

    /// Start a PUT request.
    pub fn put(&self, url: Url) -> RequestBuilder {
        self.http.put(url)
    }

    /// Start a DELETE request.
    pub fn delete(&self, url: Url) -> RequestBuilder {
        self.http.delete(url)
    }

    /// Attach the persisted session's bearer token (when any) and execute,
    /// mapping transport failures and non-success statuses.
    ///
    /// # Errors
    ///
    /// `Transport` on connection failures; `Unauthorized`, `Forbidden`,
    /// `NotFound`, or `Upstream` on non-2xx statuses, carrying the backend's
    /// message when the body has one.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let request = match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(%status, "backend returned a non-success status");
        Err(map_status_error(status, &body))
    }

    /// Decode a JSON response body.
    ///
    /// # Errors
    ///
    /// `Upstream` when the body is not the expected shape.
    pub async fn json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, DomainError> {
        response
            .json::<T>()
            .await
            .map_err(|err| DomainError::upstream(format!("invalid backend response: {err}")))
    }

    fn bearer(&self) -> Option<String> {
        self.store
            .load()
            .ok()
            .flatten()
            .map(|session| session.token().to_owned())
    }
}

fn map_transport_error(error: reqwest::Error) -> DomainError {
    DomainError::transport(format!("backend unreachable: {error}"))
}

fn map_status_error(status: StatusCode, body: &str) -> DomainError {
    let backend_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_owned())
        });

    match status {
        StatusCode::UNAUTHORIZED => DomainError::unauthorized(
            backend_message.unwrap_or_else(|| "the session is no longer authorized".to_owned()),
        ),
        StatusCode::FORBIDDEN => DomainError::forbidden(
            backend_message.unwrap_or_else(|| "this action needs more permissions".to_owned()),
        ),
        StatusCode::NOT_FOUND => DomainError::not_found(
            backend_message.unwrap_or_else(|| "the resource does not exist".to_owned()),
        ),
        other => {
            let suffix = backend_message.map_or_else(String::new, |message| format!(": {message}"));
            DomainError::upstream(format!("backend returned {other}{suffix}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[case(StatusCode::FORBIDDEN, ErrorCode::Forbidden)]
    #[case(StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Upstream)]
    #[case(StatusCode::BAD_REQUEST, ErrorCode::Upstream)]
    fn statuses_map_onto_the_error_taxonomy(
        #[case] status: StatusCode,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_status_error(status, "").code(), expected);
    }

    #[rstest]
    fn backend_messages_survive_the_mapping() {
        let err = map_status_error(
            StatusCode::UNAUTHORIZED,
            r#"{ "message": "Credenciales inválidas" }"#,
        );
        assert_eq!(err.message(), "Credenciales inválidas");
    }

    #[rstest]
    fn plain_text_bodies_are_kept_when_short() {
        let err = map_status_error(StatusCode::BAD_REQUEST, "stock insuficiente");
        assert!(err.message().contains("stock insuficiente"));
    }
}
