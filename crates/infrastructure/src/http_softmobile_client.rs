use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use softmobile_core::{AppError, AppResult, CorporateReason};
use tracing::debug;
use url::Url;

mod audit;
mod inventory;
mod sync;

/// Header carrying the corporate reason of sensitive writes.
pub const REASON_HEADER: &str = "X-Reason";

/// REST client for the Softmobile backend.
#[derive(Clone)]
pub struct HttpSoftmobileClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl HttpSoftmobileClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        api_token: impl Into<String>,
    ) -> AppResult<Self> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(normalized.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid backend base url '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "backend base url '{base_url}' cannot carry paths"
            )));
        }

        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(AppError::Validation(
                "backend api token must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            http_client,
            base_url,
            api_token,
        })
    }

    /// Returns the base url every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| AppError::Internal(format!("invalid endpoint path '{path}': {error}")))
    }

    async fn get_json<T>(&self, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .get(url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token));
        self.execute(Method::GET, url, request).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        reason: &CorporateReason,
    ) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(REASON_HEADER, reason.as_str())
            .json(body);
        self.execute(method, url, request).await
    }

    async fn execute<T>(
        &self,
        method: Method,
        url: Url,
        request: reqwest::RequestBuilder,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|error| {
            if error.is_builder() {
                AppError::Validation(format!("invalid request to {url}: {error}"))
            } else {
                AppError::Unavailable(format!("failed to call {method} {}: {error}", url.path()))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| AppError::Unavailable(format!("failed to read response body: {error}")))?;
        debug!(
            method = %method,
            path = %url.path(),
            status = status.as_u16(),
            bytes = body.len(),
            "backend response"
        );

        if !status.is_success() {
            return Err(error_from_status(status, body.as_str()));
        }

        serde_json::from_str(body.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to parse response body of {method} {}: {error}",
                url.path()
            ))
        })
    }
}

/// Maps a failed backend response to an application error.
///
/// The backend `detail` field is surfaced when present.
pub(crate) fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = backend_detail(body)
        .unwrap_or_else(|| format!("backend returned status {}", status.as_u16()));

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        status if status.is_server_error() => AppError::Unavailable(message),
        _ => AppError::Internal(message),
    }
}

fn backend_detail(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<Value>(body).ok()?;
    match payload.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        // Field validation failures arrive as a list of `{loc, msg}` objects.
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_owned),
        _ => None,
    }
}
