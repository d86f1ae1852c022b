use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::core::suggestion::{ContentIdea, CourseModule, SuggestionProvider};
use crate::providers::util::with_retry;

const RETRIES: usize = 2;
const RETRY_DELAY_MS: u64 = 500;

/// Suggestion provider backed by the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiProvider {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        GeminiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    /// Sends `prompt` and decodes the JSON array the model returns.
    async fn generate<T: DeserializeOwned>(&self, prompt: &str, item_schema: Value) -> Result<Vec<T>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No API key configured for the suggestion service"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": item_schema }
            }
        });
        debug!("Requesting suggestions from {}", url);

        let client = reqwest::Client::builder().user_agent("tattva/1.0").build()?;
        let response = with_retry(
            || {
                client
                    .post(&url)
                    .header("x-goog-api-key", api_key)
                    .json(&body)
                    .send()
            },
            RETRIES,
            RETRY_DELAY_MS,
        )
        .await
        .map_err(|e| anyhow!("Request error: {} for model: {}", e, self.model))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for model: {}",
                response.status(),
                self.model
            ));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse response for {}: {}", self.model, e))?;
        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .unwrap_or_else(|| "[]".to_string());

        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Model returned malformed suggestions: {}", e))
    }
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl SuggestionProvider for GeminiProvider {
    #[instrument(name = "GeminiContentIdeas", skip(self))]
    async fn content_ideas(&self, topic: &str) -> Result<Vec<ContentIdea>> {
        let prompt = format!(
            "Generate 3 blog post titles and short excerpts for a professional blog titled \"Ambs Tattva\" about the topic: {topic}"
        );
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "excerpt": { "type": "STRING" }
            },
            "required": ["title", "excerpt"]
        });
        self.generate(&prompt, schema).await
    }

    #[instrument(name = "GeminiCourseOutline", skip(self))]
    async fn course_outline(&self, course_name: &str) -> Result<Vec<CourseModule>> {
        let prompt = format!("Create a professional 4-module course outline for: {course_name}");
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "moduleName": { "type": "STRING" },
                "topics": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["moduleName", "topics"]
        });
        self.generate(&prompt, schema).await
    }
}
