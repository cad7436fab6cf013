//! Gemini-backed documentation generator

use super::{DocGenError, DocGenerator};
use crate::config::GeminiSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Timeout for a generation request (LLM responses can be slow)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiDocs {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiDocs {
    pub fn new(settings: GeminiSettings, user_agent: &str) -> Self {
        Self {
            settings,
            client: Client::builder()
                .user_agent(user_agent)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    /// `{base}/models/{model}:generateContent?key={key}`, keeping any existing query
    fn endpoint(&self, api_key: &str) -> Result<Url, DocGenError> {
        let base = &self.settings.base_url;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| DocGenError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .push("models")
            .push(&format!("{}:generateContent", self.settings.model));
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

impl DocGenerator for GeminiDocs {
    async fn generate(&self, prompt: &str) -> Result<String, DocGenError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(DocGenError::MissingKey)?;
        let url = self.endpoint(api_key)?;

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self.client.post(url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DocGenError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(DocGenError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GEMINI_URL;
    use serde_json::json;

    fn docs(api_key: Option<&str>, base: &str) -> GeminiDocs {
        let settings =
            GeminiSettings::new(api_key.map(String::from), "gemini-pro".to_string(), base)
                .unwrap();
        GeminiDocs::new(settings, "pkgforge-test")
    }

    #[test]
    fn test_endpoint() {
        let url = docs(Some("abc"), DEFAULT_GEMINI_URL).endpoint("abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent?key=abc"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let url = docs(Some("abc"), "http://localhost:8080/api/").endpoint("abc").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/models/gemini-pro:generateContent?key=abc"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let client = docs(None, DEFAULT_GEMINI_URL);
        assert!(!client.is_configured());
        assert!(matches!(
            client.generate("prompt").await,
            Err(DocGenError::MissingKey)
        ));
    }

    #[test]
    fn test_response_text_extraction() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "# Docs\n"}, {"text": "more"}]}}]
        });
        let parsed: GenerateResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("# Docs\nmore"));
    }

    #[test]
    fn test_empty_response() {
        let parsed: GenerateResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(parsed.into_text().is_none());

        let blocked: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(blocked.into_text().is_none());
    }

    mod http {
        use super::*;
        use wiremock::matchers::{body_json, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

        fn mock_docs(server: &MockServer) -> GeminiDocs {
            docs(Some("abc"), &format!("{}/v1beta", server.uri()))
        }

        #[tokio::test]
        async fn test_generate_posts_prompt_and_returns_text() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(GENERATE_PATH))
                .and(query_param("key", "abc"))
                .and(body_json(json!({
                    "contents": [{"parts": [{"text": "Document my_package"}]}]
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "candidates": [{"content": {"parts": [{"text": "# my_package\n"}]}}]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let text = mock_docs(&server).generate("Document my_package").await.unwrap();
            assert_eq!(text, "# my_package\n");
        }

        #[tokio::test]
        async fn test_error_status_is_reported() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(GENERATE_PATH))
                .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
                .mount(&server)
                .await;

            match mock_docs(&server).generate("prompt").await {
                Err(DocGenError::Status { status, body }) => {
                    assert_eq!(status, 403);
                    assert_eq!(body, "API key not valid");
                }
                other => panic!("expected Status error, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_success_without_text_is_empty_response() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(GENERATE_PATH))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({"candidates": []})),
                )
                .mount(&server)
                .await;

            assert!(matches!(
                mock_docs(&server).generate("prompt").await,
                Err(DocGenError::EmptyResponse)
            ));
        }

        #[tokio::test]
        async fn test_failure_degrades_through_fallback() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(GENERATE_PATH))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let fallback = crate::docgen::StaticDocs::new("# static\n");
            let outcome =
                crate::docgen::generate_or_fallback(&mock_docs(&server), "prompt", &fallback)
                    .await;
            assert_eq!(outcome.content, "# static\n");
            assert!(outcome.warning.unwrap().contains("500"));
        }
    }
}
