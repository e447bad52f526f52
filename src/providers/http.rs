//! providers::http
//!
//! Request plumbing shared by the provider clients.

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::ProviderError;

/// User-Agent header value for API requests.
pub(crate) const USER_AGENT_VALUE: &str = concat!("repofetch/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by every provider.
pub(crate) fn client() -> Client {
    Client::new()
}

/// Read a token from the environment, ignoring empty values.
pub(crate) fn token_from_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|token| !token.trim().is_empty())
}

/// `Authorization: Bearer <token>` value.
pub(crate) fn bearer(token: &str) -> Result<HeaderValue, ProviderError> {
    header_value(&format!("Bearer {}", token))
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue, ProviderError> {
    HeaderValue::from_str(value)
        .map_err(|_| ProviderError::AuthFailed("token contains invalid characters".into()))
}

/// Send a request, mapping transport failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, ProviderError> {
    request
        .header(USER_AGENT, USER_AGENT_VALUE)
        .send()
        .await
        .map_err(|e| ProviderError::NetworkError(e.to_string()))
}

/// Parse a successful response body, or map the error status.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    provider: &str,
    response: Response,
) -> Result<T, ProviderError> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| ProviderError::ApiError {
            status: status.as_u16(),
            message: format!("Failed to parse response: {}", e),
        })
    } else {
        Err(error_for_status(provider, response).await)
    }
}

/// Map an unsuccessful response to a [`ProviderError`].
pub(crate) async fn error_for_status(provider: &str, response: Response) -> ProviderError {
    let status = response.status();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => error_message(&body).unwrap_or_else(|| "Unknown error".to_string()),
        Err(_) => "Unknown error".to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED => ProviderError::AuthFailed("Invalid or expired token".into()),
        StatusCode::FORBIDDEN => {
            ProviderError::AuthFailed(format!("Permission denied: {}", message))
        }
        StatusCode::NOT_FOUND => ProviderError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        _ if status.is_server_error() => ProviderError::ApiError {
            status: status.as_u16(),
            message: format!("{} server error: {}", provider, message),
        },
        _ => ProviderError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull a human-readable message out of an API error body.
///
/// GitHub and GitLab use `{"message": ...}`, GitLab sometimes
/// `{"error": "..."}`, Bitbucket `{"error": {"message": ...}}`.
fn error_message(body: &serde_json::Value) -> Option<String> {
    let text = |v: &serde_json::Value| v.as_str().map(String::from);
    body.get("message")
        .and_then(text)
        .or_else(|| body.get("error").and_then(text))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(text)
        })
}
