#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fatebook_core::client::{ApiKey, ClientConfig, FatebookClient};
use fatebook_core::control::FatebookControlPlane;
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "test-key";

/// A request observed by the mock API.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Canned answers served by the mock API.
#[derive(Debug, Clone)]
pub struct MockResponses {
    pub questions_status: StatusCode,
    pub questions: Value,
    pub question_status: StatusCode,
    pub question: Value,
    pub add_forecast_status: StatusCode,
    pub delay: Duration,
}

impl Default for MockResponses {
    fn default() -> Self {
        Self {
            questions_status: StatusCode::OK,
            questions: json!({ "items": [] }),
            question_status: StatusCode::OK,
            question: sample_question(),
            add_forecast_status: StatusCode::OK,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Clone)]
struct MockState {
    responses: Arc<MockResponses>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// In-process stand-in for the Fatebook API bound to an ephemeral port.
pub struct MockFatebook {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockFatebook {
    pub async fn start(responses: MockResponses) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responses: Arc::new(responses),
            calls: calls.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock listener should bind");
        let addr = listener.local_addr().expect("mock listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server should run");
        });
        Self {
            base_url: format!("http://{addr}/api"),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn control(&self, timeout: Duration) -> FatebookControlPlane {
        let key = ApiKey::new(TEST_API_KEY).expect("test key");
        let config = ClientConfig::new(self.base_url.clone()).with_timeout(timeout);
        let client = FatebookClient::new(key, &config).expect("client should build");
        FatebookControlPlane::new(client)
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    state.calls.lock().expect("calls lock").push(RecordedCall {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });

    let responses = state.responses.clone();
    if !responses.delay.is_zero() {
        tokio::time::sleep(responses.delay).await;
    }

    match uri.path() {
        "/api/v0/getQuestions" => {
            (responses.questions_status, Json(responses.questions.clone())).into_response()
        }
        "/api/v0/getQuestion" => {
            (responses.question_status, Json(responses.question.clone())).into_response()
        }
        "/api/v0/addForecast" => {
            (responses.add_forecast_status, Json(json!({ "ok": true }))).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn sample_question() -> Value {
    json!({
        "id": "abc123",
        "title": "Will the bridge reopen by June?",
        "createdDate": "2024-01-05T09:30:00.000Z",
        "resolveBy": "2024-06-30T00:00:00.000Z",
        "resolved": false,
        "resolution": null,
        "sharedPublicly": false,
        "user": { "id": "u1", "name": "Ada" },
        "forecasts": [
            { "forecast": "0.2", "createdAt": "2024-01-05T09:30:00.000Z", "user": { "name": "Ada" } },
            { "forecast": 0.45, "createdAt": "2024-02-11T12:00:00.000Z", "user": { "name": "Grace" } },
            { "forecast": "0.6", "createdAt": "2024-03-02T08:15:00.000Z", "user": { "name": "Ada" } }
        ]
    })
}

pub fn mixed_questions_page() -> Value {
    json!({
        "items": [
            {
                "id": "open-1",
                "title": "Will it rain in London tomorrow?",
                "resolved": false,
                "sharedPublicly": false,
                "user": { "name": "Ada" },
                "forecasts": [{ "forecast": 0.7, "user": { "name": "Ada" } }]
            },
            {
                "id": "resolved-1",
                "title": "Did the launch happen on time?",
                "resolved": true,
                "resolution": "YES",
                "sharedPublicly": false,
                "user": { "name": "Ada" }
            },
            {
                "id": "public-1",
                "title": "Will the public vote pass?",
                "resolved": false,
                "sharedPublicly": true,
                "user": { "name": "Linus" }
            },
            {
                "id": "open-2",
                "title": "Will the bridge reopen by June?",
                "resolved": false,
                "user": { "name": "Ada" }
            }
        ]
    })
}
