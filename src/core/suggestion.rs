//! AI content suggestions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub module_name: String,
    pub topics: Vec<String>,
}

/// Text-generation service returning structured suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn content_ideas(&self, topic: &str) -> Result<Vec<ContentIdea>>;
    async fn course_outline(&self, course_name: &str) -> Result<Vec<CourseModule>>;
}

/// Blog ideas for `topic`; provider failures yield an empty list.
pub async fn generate_content_ideas(
    provider: &(dyn SuggestionProvider + Send + Sync),
    topic: &str,
) -> Vec<ContentIdea> {
    provider.content_ideas(topic).await.unwrap_or_else(|e| {
        error!(error = %e, topic, "Content suggestion failed");
        Vec::new()
    })
}

/// Course outline for `course_name`; provider failures yield an empty list.
pub async fn generate_course_outline(
    provider: &(dyn SuggestionProvider + Send + Sync),
    course_name: &str,
) -> Vec<CourseModule> {
    provider
        .course_outline(course_name)
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, course_name, "Course outline suggestion failed");
            Vec::new()
        })
}
