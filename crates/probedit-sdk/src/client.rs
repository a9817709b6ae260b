//! Probedit client implementation.

use crate::error::SdkError;
use probedit_domain::Problem;
use serde::{Deserialize, Serialize};

const PROBLEMS_PATH: &str = "/api/problems";

/// Save request body
#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    #[serde(rename = "editableProblem")]
    editable_problem: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Probedit SDK client
///
/// Requests are sent as issued: no retry, no deduplication, no cancellation.
#[derive(Debug, Clone)]
pub struct ProblemClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProblemClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn problems_url(&self) -> String {
        format!("{}{}", self.base_url, PROBLEMS_PATH)
    }

    /// Fetch the latest problem record
    pub async fn fetch_latest(&self) -> Result<Problem, SdkError> {
        let response = self.http.get(self.problems_url()).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound);
        }

        let body = success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Overwrite the editable text of the latest problem
    ///
    /// Returns the server's confirmation message.
    pub async fn save_editable(&self, editable_problem: &str) -> Result<String, SdkError> {
        let response = self
            .http
            .post(self.problems_url())
            .json(&SaveRequest { editable_problem })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound);
        }

        let body = success_body(response).await?;
        let message: MessageBody = serde_json::from_str(&body)?;
        Ok(message.message)
    }
}

/// Read the body of a successful response, or turn a failure into `SdkError::Server`
async fn success_body(response: reqwest::Response) -> Result<String, SdkError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SdkError::Server {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(body)
}

/// Prefer the `error` field of a JSON error body; fall back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}
