use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::summary::Summary;

/// Failures from the summarization backend, split the way the UI reports
/// them: backend-supplied error text is shown verbatim, everything else maps
/// to a generic connectivity message.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Connection(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest {
    transcript: String,
    user_instruction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefineRequest {
    session_id: String,
    prompt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub summary: Summary,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineResponse {
    pub summary: Summary,
}

// Error bodies look like {"error": "..."}; anything else falls back to the
// HTTP status line
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: Option<String>,
}

fn create_client() -> Result<reqwest::Client, BackendError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| BackendError::Connection(format!("Failed to build HTTP client: {}", e)))
}

async fn post_json<T, R>(url: &str, body: &T) -> Result<R, BackendError>
where
    T: Serialize,
    R: for<'de> Deserialize<'de>,
{
    debug!("Sending summarization request to: {}", url);

    let client = create_client()?;
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| BackendError::Connection(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<BackendErrorBody>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
            Err(_) => format!("Request failed with status {}", status),
        };
        return Err(BackendError::Api(message));
    }

    response
        .json::<R>()
        .await
        .map_err(|e| BackendError::Connection(format!("Failed to parse backend response: {}", e)))
}

/// Start a new summarization session. The backend answers with the first
/// summary and the session id that correlates later refinements.
pub async fn start_session(
    base_url: &str,
    transcript: String,
    user_instruction: String,
) -> Result<StartSessionResponse, BackendError> {
    let url = format!("{}/start-session", base_url.trim_end_matches('/'));
    post_json(
        &url,
        &StartSessionRequest {
            transcript,
            user_instruction,
        },
    )
    .await
}

/// Apply a follow-up instruction to an existing session, replacing its summary.
pub async fn refine(
    base_url: &str,
    session_id: String,
    prompt: String,
) -> Result<RefineResponse, BackendError> {
    let url = format!("{}/summarize", base_url.trim_end_matches('/'));
    post_json(&url, &RefineRequest { session_id, prompt }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_session_request_uses_camel_case_wire_names() {
        let request = StartSessionRequest {
            transcript: "the transcript".to_string(),
            user_instruction: "be brief".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["transcript"], "the transcript");
        assert_eq!(value["userInstruction"], "be brief");
    }

    #[test]
    fn test_refine_request_uses_camel_case_wire_names() {
        let request = RefineRequest {
            session_id: "abc".to_string(),
            prompt: "shorter".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sessionId"], "abc");
        assert_eq!(value["prompt"], "shorter");
    }

    #[test]
    fn test_start_session_response_parses_session_id() {
        let response: StartSessionResponse = serde_json::from_value(serde_json::json!({
            "summary": {
                "initial_bullet_summary": ["point"],
                "user_customized_summary": "details"
            },
            "sessionId": "abc"
        }))
        .unwrap();
        assert_eq!(response.session_id, "abc");
        assert_eq!(response.summary.initial_bullet_summary, vec!["point"]);
        assert!(response.summary.clarifications_or_notes.is_empty());
    }

    #[test]
    fn test_error_body_tolerates_missing_error_field() {
        let body: BackendErrorBody = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(body.error.is_none());
    }
}
