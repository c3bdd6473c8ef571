use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

pub use error::{Error, Result};

pub mod chat;
pub mod error;
pub mod inference;
pub mod model;
pub mod transcription;
pub mod usage;

pub const DEFAULT_BASE_URL: &str = "https://api.nataris.ai/v1";

/// Model used by inference requests that do not pick one
pub const DEFAULT_INFERENCE_MODEL: &str = "qwen2.5-0.5b-instruct-q6_k";

/// Model used by chat completion requests that do not pick one
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.2-1b-instruct-q4_k_m";

/// Token budget applied when a request does not set its own
pub const DEFAULT_MAX_TOKENS: u32 = 100;

const REQUEST_ID_HEADER: &str = "x-request-id";

/**
Authenticated handle to the Nataris API

Owns the bearer token and base endpoint URL, nothing else. Every operation
builds its own request and decodes its own response, so a single instance can
serve concurrent calls. Connection pooling, timeouts and cancellation belong
to the underlying `reqwest::Client`, which the caller may supply.
*/
#[derive(Debug, Clone)]
pub struct NatarisApi {
    base_url: String,
    auth_header: HeaderValue,
    http: reqwest::Client,
}

impl NatarisApi {
    /**
    Creates a client for the given bearer token against the default base URL

    Fails if the token is empty or cannot be carried in an `Authorization`
    header. No network call is made.
    */
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("api key not provided".to_string()));
        }
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::Configuration("api key is not a valid header value".to_string()))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_header,
            http: reqwest::Client::new(),
        })
    }

    /// Points the client at a different base URL, e.g. a staging deployment
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /**
    Replaces the HTTP transport with one configured by the caller

    This is where timeout and proxy policy come from; the client itself does
    not impose any.
    */
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "sending request");
        let res = self
            .http
            .get(self.endpoint(path))
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(Error::Transport)?;
        self.handle_response(res, request_id, path).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "sending request");
        let res = self
            .http
            .post(self.endpoint(path))
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.handle_response(res, request_id, path).await
    }

    pub(crate) async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "sending multipart request");
        let res = self
            .http
            .post(self.endpoint(path))
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.handle_response(res, request_id, path).await
    }

    /**
    Translates a response into the typed result or one of the error kinds

    Non-success statuses become api errors carrying the service message,
    success bodies that do not match the expected shape become decode errors.
    */
    async fn handle_response<T>(
        &self,
        res: reqwest::Response,
        request_id: Uuid,
        path: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(%request_id, path, %status, "request failed");
            return Err(error::api_error(status, &body));
        }

        let body = res.text().await.map_err(Error::Transport)?;
        let parsed = serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;
        debug!(%request_id, path, "request completed");
        Ok(parsed)
    }
}
