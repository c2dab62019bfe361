// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use chrono::Utc;
use flashmaster_core::Flashcard;
use flashmaster_core::parse_cards;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::gemini::API_KEY_VAR;
use crate::gemini::CARD_COUNT;
use crate::gemini::CardSource;
use crate::gemini::GenerateError;
use crate::gemini::prompt::compose_prompt;
use crate::gemini::prompt::response_schema;
use crate::settings::Difficulty;
use crate::settings::Era;

pub const MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A card source backed by the Gemini `generateContent` endpoint. One call
/// per batch, no retry, no timeout beyond the transport's own.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint. Used by the tests to talk
    /// to a local stub server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        GeminiClient {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Read the credential from the environment. Checked on every call, so
    /// the key can be rotated without restarting the server.
    fn api_key() -> Result<String, GenerateError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GenerateError::Configuration),
        }
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        GeminiClient::new()
    }
}

#[async_trait]
impl CardSource for GeminiClient {
    async fn generate(
        &self,
        era: Era,
        difficulty: Difficulty,
    ) -> Result<Vec<Flashcard>, GenerateError> {
        let key = GeminiClient::api_key()?;
        log::debug!("Requesting {CARD_COUNT} cards (era: {era}, difficulty: {difficulty})");
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: compose_prompt(era, difficulty),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, MODEL, key
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Generation(format!("request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Generation(format!("HTTP {status}")));
        }
        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Generation(format!("malformed envelope: {e}")))?;
        let text = envelope.text();
        if text.trim().is_empty() {
            return Err(GenerateError::Generation("empty response".to_string()));
        }
        let stamp = Utc::now().timestamp_millis().to_string();
        parse_cards(text, &stamp, era.label())
            .map_err(|e| GenerateError::Generation(e.to_string()))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    /// The text of the first part of the first candidate, or the empty
    /// string when the response carries none.
    fn text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use portpicker::pick_unused_port;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::spawn;

    use super::*;
    use crate::utils::wait_for_server;

    // The credential is process-global state, so tests touching it take
    // this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_key() {
        unsafe { std::env::set_var(API_KEY_VAR, "test-key") }
    }

    fn clear_key() {
        unsafe { std::env::remove_var(API_KEY_VAR) }
    }

    async fn start_stub(status: StatusCode, body: Value) -> u16 {
        let port = pick_unused_port().unwrap();
        let app = Router::new().route(
            "/models/{rest}",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await.unwrap();
        spawn(async move { axum::serve(listener, app).await });
        wait_for_server("127.0.0.1", port).await.unwrap();
        port
    }

    fn envelope(text: &str) -> Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    fn card_batch_text() -> String {
        let cards: Vec<Value> = (0..CARD_COUNT)
            .map(|i| {
                if i % 3 == 0 {
                    // Some elements arrive without id/era despite the schema.
                    json!({
                        "question": format!("질문 {i}"),
                        "answer": format!("답 {i}"),
                        "explanation": format!("해설 {i}"),
                    })
                } else {
                    json!({
                        "id": format!("q{i}"),
                        "era": "조선",
                        "question": format!("질문 {i}"),
                        "answer": format!("답 {i}"),
                        "explanation": format!("해설 {i}"),
                    })
                }
            })
            .collect();
        serde_json::to_string(&cards).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_request() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_key();
        // Nothing is listening on this port: an attempted request would
        // surface as a Generation error, not a Configuration one.
        let port = pick_unused_port().unwrap();
        let client = GeminiClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let result = client.generate(Era::All, Difficulty::Medium).await;
        assert!(matches!(result, Err(GenerateError::Configuration)));
    }

    #[tokio::test]
    async fn test_blank_credential_fails() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe { std::env::set_var(API_KEY_VAR, "  ") }
        let client = GeminiClient::new();
        let result = client.generate(Era::All, Difficulty::Low).await;
        assert!(matches!(result, Err(GenerateError::Configuration)));
        clear_key();
    }

    #[tokio::test]
    async fn test_generate_success() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_key();
        let port = start_stub(StatusCode::OK, envelope(&card_batch_text())).await;
        let client = GeminiClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let cards = client.generate(Era::PreModern, Difficulty::High).await.unwrap();
        assert_eq!(cards.len(), CARD_COUNT);
        for card in &cards {
            assert!(!card.id.is_empty());
            assert!(!card.era.is_empty());
            assert!(!card.question.is_empty());
            assert!(!card.answer.is_empty());
            assert!(!card.explanation.is_empty());
        }
        // Elements that arrived without an era get the requested one.
        assert_eq!(cards[0].era, Era::PreModern.label());
        assert_eq!(cards[1].era, "조선");
        clear_key();
    }

    #[tokio::test]
    async fn test_malformed_response_text() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_key();
        let port = start_stub(StatusCode::OK, envelope("죄송하지만 생성할 수 없습니다.")).await;
        let client = GeminiClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let result = client.generate(Era::All, Difficulty::Medium).await;
        assert!(matches!(result, Err(GenerateError::Generation(_))));
        clear_key();
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_key();
        let port = start_stub(StatusCode::OK, json!({ "candidates": [] })).await;
        let client = GeminiClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let result = client.generate(Era::Modern, Difficulty::Low).await;
        match result {
            Err(GenerateError::Generation(detail)) => {
                assert_eq!(detail, "empty response");
            }
            other => panic!("expected a Generation error, got {other:?}"),
        }
        clear_key();
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_key();
        let port = start_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
        let client = GeminiClient::with_base_url(format!("http://127.0.0.1:{port}"));
        let result = client.generate(Era::All, Difficulty::High).await;
        match result {
            Err(GenerateError::Generation(detail)) => {
                assert!(detail.contains("HTTP"));
            }
            other => panic!("expected a Generation error, got {other:?}"),
        }
        clear_key();
    }
}
