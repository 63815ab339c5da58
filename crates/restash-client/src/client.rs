//! HTTP dispatch and result normalization

use crate::error::{classify_error_body, ApiResponse, ClientError, ErrorResponse, Result};
use crate::files::Files;
use crate::Config;
use reqwest::{header, multipart::Form, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Restash API client.
///
/// Holds the immutable configuration and the underlying HTTP client; all
/// operations take `&self`, so one instance can serve concurrent calls.
#[derive(Debug)]
pub struct RestashClient {
    config: Config,
    http: reqwest::Client,
}

/// Request body for a POST dispatch.
///
/// JSON bodies keep the `application/json` content type; multipart bodies
/// let the transport pick the boundary content type instead.
pub(crate) enum Payload {
    // no JSON-bodied endpoint on the current surface
    #[allow(dead_code)]
    Json(serde_json::Value),
    Multipart(Form),
}

impl RestashClient {
    /// Create a client for the production endpoint with the given key.
    ///
    /// Fails fast on an empty key; no request is ever sent without
    /// credentials.
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(Config::new(secret_key))
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: Config) -> Result<Self> {
        if config.secret_key.is_empty() {
            return Err(ClientError::MissingSecretKey);
        }

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.secret_key))
            .map_err(|err| ClientError::Config(format!("invalid secret key: {err}")))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|err| ClientError::Config(format!("invalid user agent: {err}")))?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;

        Ok(Self { config, http })
    }

    /// Access file operations
    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        self.dispatch(self.http.get(self.url(path))).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        self.dispatch(self.http.delete(self.url(path))).await
    }

    #[instrument(skip(self, payload))]
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Payload,
    ) -> ApiResponse<T> {
        let request = self.http.post(self.url(path));
        let request = match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(form) => request.multipart(form),
        };
        self.dispatch(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    /// Send a request and normalize every outcome into an [`ApiResponse`].
    ///
    /// Transport failures, unreadable bodies, and undecodable success
    /// bodies all land on the fallback error; nothing past this point
    /// returns `Err` or panics.
    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResponse<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("transport failure: {err}");
                return ApiResponse::failure(ErrorResponse::fallback());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!("failed to read error body: {err}");
                    return ApiResponse::failure(ErrorResponse::fallback());
                }
            };
            debug!("request failed with status {status}");
            return ApiResponse::failure(classify_error_body(&body));
        }

        match response.json::<T>().await {
            Ok(data) => ApiResponse::success(data),
            Err(err) => {
                debug!("failed to decode success body: {err}");
                ApiResponse::failure(ErrorResponse::fallback())
            }
        }
    }
}
