//! AssemblyAI speech-to-text client.
//!
//! https://www.assemblyai.com/docs/api-reference/transcripts

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::server::{
    error::AppError,
    service::transcription::{TimedWord, Transcriber, Transcript},
};

pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com";
const POLL_INTERVAL: Duration = Duration::from_secs(3);
const MAX_POLL_ATTEMPTS: u32 = 100;

const FAILURE: &str = "Failed to transcribe audio";

#[derive(Serialize)]
struct SubmitRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: TranscriptStatus,
    text: Option<String>,
    words: Option<Vec<WordResponse>>,
    error: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

#[derive(Deserialize)]
struct WordResponse {
    text: String,
    start: u64,
    end: u64,
}

impl TranscriptResponse {
    fn into_transcript(self) -> Transcript {
        Transcript {
            text: self.text.unwrap_or_default(),
            words: self
                .words
                .unwrap_or_default()
                .into_iter()
                .map(|w| TimedWord {
                    text: w.text,
                    start_ms: w.start,
                    end_ms: w.end,
                })
                .collect(),
        }
    }
}

pub struct AssemblyAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl AssemblyAiClient {
    pub fn new(http_client: reqwest::Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            max_attempts: MAX_POLL_ATTEMPTS,
        }
    }

    /// Points the client at another deployment of the API, e.g. `https://api.eu.assemblyai.com`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_attempts = max_attempts;
        self
    }

    async fn submit(&self, audio_url: &str) -> Result<TranscriptResponse, AppError> {
        let response = self
            .http_client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&SubmitRequest { audio_url })
            .send()
            .await?;

        read_response(response).await
    }

    async fn poll(&self, id: &str) -> Result<TranscriptResponse, AppError> {
        let response = self
            .http_client
            .get(format!("{}/v2/transcript/{}", self.base_url, id))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<TranscriptResponse, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(
            FAILURE.to_string(),
            format!("AssemblyAI returned {}: {}", status, body),
        ));
    }

    Ok(response.json().await?)
}

#[async_trait]
impl Transcriber for AssemblyAiClient {
    /// Submits the audio and polls until the transcript completes, fails, or polling gives up.
    async fn transcribe(&self, audio_url: &str) -> Result<Transcript, AppError> {
        let submitted = self.submit(audio_url).await?;
        let id = submitted.id;

        tracing::debug!(transcript_id = %id, "Submitted audio for transcription");

        for _ in 0..self.max_attempts {
            let transcript = self.poll(&id).await?;

            match transcript.status {
                TranscriptStatus::Completed => return Ok(transcript.into_transcript()),
                TranscriptStatus::Error => {
                    return Err(AppError::Upstream(
                        FAILURE.to_string(),
                        transcript
                            .error
                            .unwrap_or_else(|| format!("transcript {} failed", id)),
                    ))
                }
                TranscriptStatus::Queued | TranscriptStatus::Processing => {
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        Err(AppError::Upstream(
            FAILURE.to_string(),
            format!(
                "transcript {} not completed after {} polls",
                id, self.max_attempts
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;

    const API_KEY: &str = "test-key";

    #[derive(Clone)]
    struct Stub {
        polls: Arc<AtomicUsize>,
        script: Arc<Vec<Value>>,
    }

    async fn stub_submit(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API key"})));
        }
        assert_eq!(body["audio_url"], "https://cdn.example.com/a.mp3");

        (StatusCode::OK, Json(json!({"id": "t1", "status": "queued"})))
    }

    async fn stub_poll(State(stub): State<Stub>, Path(id): Path<String>) -> Json<Value> {
        let attempt = stub.polls.fetch_add(1, Ordering::SeqCst);
        let mut response = stub.script[attempt.min(stub.script.len() - 1)].clone();
        response["id"] = Value::String(id);

        Json(response)
    }

    /// Serves the transcript API locally, answering polls from `script` in order and repeating
    /// the last entry.
    async fn serve(script: Vec<Value>) -> (String, Arc<AtomicUsize>) {
        let polls = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/v2/transcript", post(stub_submit))
            .route("/v2/transcript/{id}", get(stub_poll))
            .with_state(Stub {
                polls: polls.clone(),
                script: Arc::new(script),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{}/", addr), polls)
    }

    fn client(base_url: &str, api_key: &str, max_attempts: u32) -> AssemblyAiClient {
        AssemblyAiClient::new(reqwest::Client::new(), api_key.to_string())
            .with_base_url(base_url)
            .with_polling(Duration::from_millis(1), max_attempts)
    }

    #[tokio::test]
    async fn polls_until_completed() {
        let (base_url, polls) = serve(vec![
            json!({"status": "processing"}),
            json!({
                "status": "completed",
                "text": "Hi there.",
                "words": [
                    {"text": "Hi", "start": 10, "end": 200},
                    {"text": "there.", "start": 210, "end": 500}
                ]
            }),
        ])
        .await;

        let transcript = client(&base_url, API_KEY, 5)
            .transcribe("https://cdn.example.com/a.mp3")
            .await
            .unwrap();

        assert_eq!(transcript.text, "Hi there.");
        assert_eq!(transcript.words.len(), 2);
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn error_status_carries_upstream_message() {
        let (base_url, polls) = serve(vec![
            json!({"status": "queued"}),
            json!({"status": "error", "error": "Download failed"}),
        ])
        .await;

        let result = client(&base_url, API_KEY, 5)
            .transcribe("https://cdn.example.com/a.mp3")
            .await;

        match result {
            Err(AppError::Upstream(message, detail)) => {
                assert_eq!(message, FAILURE);
                assert_eq!(detail, "Download failed");
            }
            other => panic!("expected upstream error, got {:?}", other.map(|t| t.text)),
        }
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let (base_url, polls) = serve(vec![json!({"status": "processing"})]).await;

        let result = client(&base_url, API_KEY, 3)
            .transcribe("https://cdn.example.com/a.mp3")
            .await;

        assert!(matches!(result, Err(AppError::Upstream(_, ref detail)) if detail.contains("after 3 polls")));
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn rejected_submit_is_upstream_error() {
        let (base_url, polls) = serve(vec![json!({"status": "completed"})]).await;

        let result = client(&base_url, "wrong-key", 3)
            .transcribe("https://cdn.example.com/a.mp3")
            .await;

        assert!(matches!(result, Err(AppError::Upstream(_, _))));
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn parses_completed_transcript() {
        let body = r#"{
            "id": "abc",
            "status": "completed",
            "text": "Hi there.",
            "words": [
                {"text": "Hi", "start": 10, "end": 200, "confidence": 0.9},
                {"text": "there.", "start": 210, "end": 500, "confidence": 0.8}
            ]
        }"#;

        let response: TranscriptResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, TranscriptStatus::Completed);

        let transcript = response.into_transcript();
        assert_eq!(transcript.text, "Hi there.");
        assert_eq!(transcript.words[1].start_ms, 210);
        assert_eq!(transcript.words[1].end_ms, 500);
    }

    #[test]
    fn parses_pending_transcript_without_words() {
        let body = r#"{"id": "abc", "status": "queued", "text": null, "words": null}"#;

        let response: TranscriptResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, TranscriptStatus::Queued);
        assert!(response.into_transcript().words.is_empty());
    }
}
