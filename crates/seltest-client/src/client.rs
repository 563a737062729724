// ABOUTME: HTTP client for the test generator backend
// ABOUTME: One async method per endpoint; non-2xx responses become ApiError::Http

use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::models::{
    AppContext, AppContextAck, CurrentModelResponse, ModelInfo, ModelListResponse, ModelSelection,
    ModelSelectionRequest, ScriptArchive, ScriptGenerationRequest, Story, TestPlan,
    TestPlanRequest,
};

/// File name used when the backend does not name the archive
pub const DEFAULT_ARCHIVE_NAME: &str = "selenium_scripts.zip";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the test generator backend
#[derive(Debug, Clone)]
pub struct SeltestClient {
    http: reqwest::Client,
    base_url: String,
}

impl SeltestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Generation endpoints run an LLM per story, so the request timeout is
    /// generous and configurable.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Connection(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /models/`
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        tracing::debug!(base_url = %self.base_url, "Listing models");
        let resp: ModelListResponse = self.json(self.http.get(self.url("/models/"))).await?;
        tracing::debug!(count = resp.models.len(), "Models loaded");
        Ok(resp.models)
    }

    /// `POST /models/select/`
    pub async fn select_model(&self, model_id: &str) -> Result<ModelSelection> {
        tracing::info!(model_id, "Selecting model");
        let body = ModelSelectionRequest {
            model_id: model_id.to_string(),
        };
        self.json(self.http.post(self.url("/models/select/")).json(&body))
            .await
    }

    /// `GET /models/current`
    pub async fn current_model(&self) -> Result<String> {
        let resp: CurrentModelResponse = self.json(self.http.get(self.url("/models/current"))).await?;
        Ok(resp.selected_model_id)
    }

    /// `POST /app-context/`
    pub async fn set_app_context(&self, context: &AppContext) -> Result<AppContextAck> {
        tracing::info!(url = %context.url, pages = %context.pages, "Setting app context");
        self.json(self.http.post(self.url("/app-context/")).json(context))
            .await
    }

    /// `GET /app-context/`
    pub async fn app_context(&self) -> Result<AppContext> {
        self.json(self.http.get(self.url("/app-context/"))).await
    }

    /// `POST /test-plan/generate` as multipart: codebase file, requirements, optional model id.
    pub async fn generate_test_plan(&self, request: TestPlanRequest) -> Result<TestPlan> {
        tracing::info!(
            file = %request.codebase.file_name,
            bytes = request.codebase.bytes.len(),
            model_id = request.model_id.as_deref().unwrap_or("<backend default>"),
            "Generating test plan"
        );

        let codebase = Part::bytes(request.codebase.bytes)
            .file_name(request.codebase.file_name)
            .mime_str("application/zip")
            .map_err(|e| ApiError::Connection(format!("mime error: {e}")))?;

        let mut form = Form::new()
            .part("codebase", codebase)
            .text("requirements", request.requirements);
        if let Some(model_id) = request.model_id {
            form = form.text("model_id", model_id);
        }

        let plan: TestPlan = self
            .json(self.http.post(self.url("/test-plan/generate")).multipart(form))
            .await?;
        tracing::info!(
            epics = plan.epic_count(),
            stories = plan.story_count(),
            "Test plan received"
        );
        Ok(plan)
    }

    /// `POST /scripts/generate/` returning the zipped scripts.
    pub async fn generate_scripts(
        &self,
        stories: &[Story],
        model_id: Option<&str>,
    ) -> Result<ScriptArchive> {
        tracing::info!(stories = stories.len(), "Generating scripts");
        let body = ScriptGenerationRequest {
            user_stories: stories,
            model_id,
        };
        let resp = self
            .send(self.http.post(self.url("/scripts/generate/")).json(&body))
            .await?;

        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string());
        let bytes = resp.bytes().await?.to_vec();
        tracing::info!(file = %file_name, bytes = bytes.len(), "Scripts received");

        Ok(ScriptArchive { file_name, bytes })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), detail = ?err.detail(), "Backend returned error");
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self.send(request).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Extract the file name from a `Content-Disposition` header value.
fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, val) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = val.trim().trim_matches('"');
        // Only the final path component; the header is untrusted.
        let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = SeltestClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/models/"), "http://localhost:8000/models/");
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=selenium_scripts.zip"),
            Some("selenium_scripts.zip".to_string())
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="scripts v2.zip""#),
            Some("scripts v2.zip".to_string())
        );
    }

    #[test]
    fn test_filename_from_disposition_missing() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }

    #[test]
    fn test_filename_from_disposition_strips_paths() {
        assert_eq!(
            filename_from_disposition("attachment; filename=../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(filename_from_disposition("attachment; filename=.."), None);
    }
}
