use anyhow::{Error, Result, anyhow, bail};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::ai::{GenerativeModel, Part};
use crate::core::AppConfig;

// {
//   "contents": [{
//     "role": "user",
//     "parts": [
//       {"text": "Describe this image in detail."},
//       {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/4AAQ..."}}
//     ]
//   }]
// }
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
pub struct Content {
    pub role: String,
    pub parts: Vec<WirePart>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum WirePart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize, Debug, PartialEq)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

impl From<&Part> for WirePart {
    fn from(part: &Part) -> Self {
        match part {
            Part::Text(text) => WirePart::Text { text: text.clone() },
            Part::Blob { mime_type, data } => WirePart::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: STANDARD.encode(data),
                },
            },
        }
    }
}

impl GenerateContentRequest {
    /// A single user turn made of `parts`.
    pub fn from_parts(parts: &[Part]) -> Self {
        Self {
            contents: vec![Content {
                role: String::from("user"),
                parts: parts.iter().map(WirePart::from).collect(),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
    pub error: Option<ErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
pub struct ResponsePart {
    pub text: Option<String>,
    // Thinking models may return their reasoning as separate parts
    #[serde(default)]
    pub thought: bool,
}

#[derive(Deserialize, Debug)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate. A reply without
    /// any text is an error.
    pub fn text(&self) -> Result<String, Error> {
        if let Some(error) = &self.error {
            bail!("Gemini error: {}", error.message);
        }
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            bail!("Prompt was blocked: {}", reason);
        }

        let candidate = self
            .candidates
            .first()
            .ok_or(anyhow!("Gemini returned no candidates"))?;
        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            bail!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }
        Ok(text)
    }
}

pub fn generate_content_url(api_hostname: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        api_hostname.trim_end_matches('/'),
        model
    )
}

/// Client for the `generateContent` endpoint. No retries and no
/// request timeout; a call either completes or fails.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_hostname: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.gemini_api_hostname, &config.gemini_api_key)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, parts: &[Part], model: &str) -> Result<String, Error> {
        let payload = GenerateContentRequest::from_parts(parts);
        let url = generate_content_url(&self.api_hostname, model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            bail!("Gemini API error ({}): {}", status, message);
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text()
    }
}
