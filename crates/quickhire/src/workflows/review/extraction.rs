use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::config::AiConfig;

use super::classify::{ExperienceTier, SalaryBand};
use super::domain::EducationLevel;
use super::filter::FilterSpec;

/// Failure modes of the filter-extraction collaborator. Each maps to a
/// distinct user-facing message; none of them leaves partially applied
/// filters behind.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("extraction quota exceeded")]
    RateLimited,
    #[error("extraction credential rejected")]
    InvalidCredential,
    #[error("extraction service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("extraction service returned no content")]
    EmptyResponse,
    #[error("extraction service returned unparseable content: {0}")]
    MalformedResponse(String),
    #[error("network failure reaching extraction service: {0}")]
    Network(String),
}

impl ExtractionError {
    /// Message shown to the recruiter; the original wording of the tool.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::MissingApiKey => {
                "Please provide a Google Gemini API key to use AI search"
            }
            ExtractionError::RateLimited => {
                "API quota exceeded. Please try again later or check your billing."
            }
            ExtractionError::InvalidCredential => {
                "Invalid API key. Please check your Google Gemini API key."
            }
            ExtractionError::Service { .. } => "API error. Please try again.",
            ExtractionError::EmptyResponse => "No response received from AI. Please try again.",
            ExtractionError::MalformedResponse(_) => {
                "AI returned invalid response. Please try rephrasing your query."
            }
            ExtractionError::Network(_) => {
                "Network error. Please check your internet connection."
            }
        }
    }
}

/// Best-effort structured criteria extracted from a free-text prompt. Keys
/// are a subset of the filter dimensions; an unrecognized/ambiguous prompt
/// yields the empty value, never an error by itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractedFilters {
    pub locations: Vec<String>,
    pub skills: Vec<String>,
    #[serde(rename = "educationLevel")]
    pub education_level: Option<String>,
    #[serde(rename = "experienceLevel")]
    pub experience_level: Option<String>,
    #[serde(rename = "salaryExpectation")]
    pub salary_expectation: Option<String>,
    #[serde(rename = "workAvailability")]
    pub work_availability: Option<String>,
}

impl ExtractedFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge into a filter specification. Enum-valued dimensions go through
    /// their label parsers; a label outside the fixed vocabulary leaves that
    /// dimension unchanged rather than failing the whole merge.
    pub fn apply_to(&self, spec: &mut FilterSpec) {
        if !self.locations.is_empty() {
            spec.locations = self.locations.clone();
        }
        if !self.skills.is_empty() {
            spec.skills = self.skills.clone();
        }
        if let Some(label) = self.education_level.as_deref() {
            match EducationLevel::from_label(label) {
                Some(level) => spec.education_level = Some(level),
                None => warn!(label, "ignoring unknown education level from extraction"),
            }
        }
        if let Some(label) = self.experience_level.as_deref() {
            match ExperienceTier::from_label(label) {
                Some(tier) => spec.experience_level = Some(tier),
                None => warn!(label, "ignoring unknown experience level from extraction"),
            }
        }
        if let Some(label) = self.salary_expectation.as_deref() {
            match SalaryBand::from_label(label) {
                Some(band) => spec.salary_expectation = Some(band),
                None => warn!(label, "ignoring unknown salary band from extraction"),
            }
        }
        if let Some(value) = self.work_availability.as_deref() {
            if !value.is_empty() {
                spec.work_availability = Some(value.to_string());
            }
        }
    }
}

/// Seam for the external prompt-to-filters collaborator so the service can be
/// exercised with a stub.
#[async_trait]
pub trait FilterExtractor: Send + Sync {
    async fn extract(&self, prompt: &str) -> Result<ExtractedFilters, ExtractionError>;
}

/// Gemini `generateContent` client.
pub struct GeminiExtractor {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiExtractor {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        let instructions = format!(
            "You are a helpful assistant for filtering job candidates.\n\n\
             Given this natural language query: \"{prompt}\"\n\n\
             Extract relevant filter criteria and return ONLY a valid JSON object with the following possible keys:\n\
             - \"locations\": array of strings (e.g., [\"New York\", \"San Francisco\"])\n\
             - \"skills\": array of strings (e.g., [\"JavaScript\", \"React\"])\n\
             - \"educationLevel\": string (one of: \"High School\", \"Bachelor's Degree\", \"Master's Degree\", \"PhD\")\n\
             - \"experienceLevel\": string (one of: \"Junior\", \"Mid-level\", \"Senior\")\n\
             - \"salaryExpectation\": string (one of: \"$0 - $50k\", \"$50k - $100k\", \"$100k - $150k\", \"$150k - $200k\", \"$200k - $250k\", \"$250k+\")\n\
             - \"workAvailability\": string (one of: \"full-time\", \"part-time\", \"contract\", \"internship\")\n\n\
             Only include keys that are explicitly mentioned or strongly implied in the query.\n\
             Return empty object {{}} if no clear filters can be extracted.\n\
             Do not include any explanation, just the JSON."
        );

        json!({
            "contents": [{ "parts": [{ "text": instructions }] }],
            "generationConfig": { "temperature": 0.1, "maxOutputTokens": 200 },
        })
    }
}

#[async_trait]
impl FilterExtractor for GeminiExtractor {
    async fn extract(&self, prompt: &str) -> Result<ExtractedFilters, ExtractionError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(ExtractedFilters::default());
        }

        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ExtractionError::MissingApiKey);
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|err| ExtractionError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => ExtractionError::RateLimited,
                401 | 403 => ExtractionError::InvalidCredential,
                code => ExtractionError::Service { status: code, message },
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ExtractionError::MalformedResponse(err.to_string()))?;

        let text = response_text(&body).ok_or(ExtractionError::EmptyResponse)?;
        parse_extracted(text)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

fn response_text(body: &GenerateContentResponse) -> Option<&str> {
    let text = body
        .candidates
        .first()?
        .content
        .parts
        .first()
        .map(|part| part.text.trim())?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the model's reply into filter criteria, tolerating Markdown code
/// fences around the JSON object.
pub(crate) fn parse_extracted(text: &str) -> Result<ExtractedFilters, ExtractionError> {
    let stripped = strip_code_fences(text);
    serde_json::from_str(stripped)
        .map_err(|err| ExtractionError::MalformedResponse(err.to_string()))
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
