// ABOUTME: Data models for seltest-client
// ABOUTME: Wire shapes for models, app context, test plans, stories, and script archives

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An AI model the backend can generate with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSelectionRequest {
    pub model_id: String,
}

/// Backend acknowledgement of a model selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    #[serde(default)]
    pub message: String,
    pub selected_model_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentModelResponse {
    pub selected_model_id: String,
}

/// The application under test: where it lives, which pages matter, and how to log in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    pub url: String,
    /// Raw comma-separated page list, sent as typed
    pub pages: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

impl AppContext {
    /// Individual page names, trimmed, empties dropped.
    pub fn page_list(&self) -> Vec<&str> {
        self.pages
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }
}

/// Backend acknowledgement of an app context update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppContextAck {
    #[serde(default)]
    pub message: String,
    pub app_context: AppContext,
}

/// A zipped codebase to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodebaseArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything `/test-plan/generate` needs
#[derive(Debug, Clone)]
pub struct TestPlanRequest {
    pub requirements: String,
    pub codebase: CodebaseArchive,
    pub model_id: Option<String>,
}

/// A single test scenario
///
/// Plans are model-generated JSON, so display fields accept null, numbers,
/// and lists as well as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "text")]
    pub page: String,
    #[serde(default, deserialize_with = "text")]
    pub url: String,
    #[serde(default, deserialize_with = "text_list")]
    pub acceptance_criteria: Vec<String>,
    /// Fields the backend may add (priority, status, story_points, ...).
    /// Kept so they reach script generation untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A named group of related stories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default, deserialize_with = "text")]
    pub epic: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stories: Vec<Story>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogMetadata {
    #[serde(default, deserialize_with = "text")]
    pub version: String,
    #[serde(default, deserialize_with = "text")]
    pub last_updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_epics: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_stories: usize,
}

/// The generated backlog of epics and stories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub backlog: Vec<Epic>,
    /// Informational only; an unreadable block is dropped rather than failing the plan.
    #[serde(
        default,
        deserialize_with = "metadata_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<BacklogMetadata>,
}

impl TestPlan {
    pub fn epic_count(&self) -> usize {
        self.backlog.len()
    }

    pub fn story_count(&self) -> usize {
        self.backlog.iter().map(|e| e.stories.len()).sum()
    }

    /// All stories across all epics, in backlog order.
    pub fn stories(&self) -> Vec<Story> {
        self.backlog
            .iter()
            .flat_map(|epic| epic.stories.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptGenerationRequest<'a> {
    pub user_stories: &'a [Story],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<&'a str>,
}

/// Generated scripts as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flatten any JSON value into display text. Lists join with ", ".
fn display_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(display_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(display_text(Value::deserialize(deserializer)?))
}

fn text_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(display_text).collect(),
        other => vec![display_text(other)],
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

fn metadata_or_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BacklogMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable plan metadata");
            Ok(None)
        }
    }
}
