use std::{error::Error, fmt, sync::Arc, time::Duration};

use fatebook_store::models::{AddForecastBody, Question, QuestionsPage};
use fatebook_store::schema::{
    DEFAULT_BASE_URL,
    PARAM_API_KEY,
    PARAM_QUESTION_ID,
    ROUTE_ADD_FORECAST,
    ROUTE_GET_QUESTION,
    ROUTE_GET_QUESTIONS,
    route_url,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::query::QuestionQuery;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug)]
pub enum ClientError {
    Transport(Box<reqwest::Error>),
    Timeout,
    Status { status: u16, body: String },
    Decode(String),
    InvalidInput(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "unexpected HTTP status {status}")
            }
            Self::Status { status, body } => write!(f, "unexpected HTTP status {status}: {body}"),
            Self::Decode(message) => write!(f, "invalid response payload: {message}"),
            Self::InvalidInput(message) => write!(f, "Invalid input: {message}"),
        }
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            // The request URL carries the api key in its query string.
            Self::Transport(Box::new(err.without_url()))
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Fatebook API key. `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// Wraps a raw key.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidInput` if the key is blank.
    pub fn new(value: impl Into<String>) -> ClientResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidInput("api key is required".to_string()));
        }
        Ok(Self(Arc::from(trimmed)))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Connection settings for the Fatebook API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Clone)]
pub struct FatebookClient {
    http: reqwest::Client,
    api_key: ApiKey,
    base_url: Arc<str>,
}

impl FatebookClient {
    /// Builds a client with a pooled connection and a per-request timeout.
    ///
    /// # Errors
    /// Returns `ClientError` if the base URL is blank or the HTTP client cannot be built.
    pub fn new(api_key: ApiKey, config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(ClientError::InvalidInput("base url is required".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists questions matching the query.
    ///
    /// # Errors
    /// Returns `ClientError` if the request fails, returns non-2xx, or cannot be decoded.
    pub async fn get_questions(&self, query: &QuestionQuery) -> ClientResult<Vec<Question>> {
        let request = self
            .http
            .get(route_url(&self.base_url, ROUTE_GET_QUESTIONS))
            .query(&query.to_params());
        let response = self.send(ROUTE_GET_QUESTIONS, request).await?;
        let page: QuestionsPage = decode(response).await?;
        debug!(count = page.items.len(), "fetched questions");
        Ok(page.items)
    }

    /// Fetches a single question with its forecast history.
    ///
    /// Returns `Ok(None)` when the API answers 404, with an empty payload, or
    /// with a question that carries no id.
    ///
    /// # Errors
    /// Returns `ClientError` if the request fails, returns another non-2xx, or cannot be decoded.
    pub async fn get_question(&self, question_id: &str) -> ClientResult<Option<Question>> {
        let request = self
            .http
            .get(route_url(&self.base_url, ROUTE_GET_QUESTION))
            .query(&[(PARAM_QUESTION_ID, question_id)]);
        let response = match self.send(ROUTE_GET_QUESTION, request).await {
            Ok(response) => response,
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let body = response.text().await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        let question: Question =
            serde_json::from_str(trimmed).map_err(|err| ClientError::Decode(err.to_string()))?;
        if question.id.trim().is_empty() {
            debug!(question_id, "getQuestion returned a question without an id");
            return Ok(None);
        }
        Ok(Some(question))
    }

    /// Submits a forecast for a question.
    ///
    /// # Errors
    /// Returns `ClientError` if the request fails or returns non-2xx.
    pub async fn add_forecast(&self, body: &AddForecastBody) -> ClientResult<()> {
        let request = self
            .http
            .post(route_url(&self.base_url, ROUTE_ADD_FORECAST))
            .json(body);
        self.send(ROUTE_ADD_FORECAST, request).await?;
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.api_key.expose();
        request.query(&[(PARAM_API_KEY, key)]).bearer_auth(key)
    }

    async fn send(&self, route: &'static str, request: RequestBuilder) -> ClientResult<Response> {
        let response = match self.authorize(request).send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ClientError::from(err);
                warn!(route, error = %err, "fatebook request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(route, status = status.as_u16(), "fatebook request completed");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(route, status = status.as_u16(), "fatebook request rejected");
        Err(ClientError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
