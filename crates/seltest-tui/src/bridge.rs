// ABOUTME: Runs wizard actions against the backend
// ABOUTME: Each action is spawned as its own task and reports back as a Response over a channel

use seltest_client::{ApiError, SeltestClient, TestPlanRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::download;
use crate::types::{Action, Response};

pub const TEST_PLAN_FALLBACK: &str = "Failed to generate test plan.";

/// Message shown when test plan generation fails: the backend's detail, or a generic fallback.
pub fn test_plan_error_message(err: &ApiError) -> String {
    err.detail().unwrap_or(TEST_PLAN_FALLBACK).to_string()
}

pub struct Bridge {
    client: Arc<SeltestClient>,
    output_dir: PathBuf,
    tx: UnboundedSender<Response>,
}

impl Bridge {
    pub fn new(client: SeltestClient, output_dir: PathBuf, tx: UnboundedSender<Response>) -> Self {
        Self {
            client: Arc::new(client),
            output_dir,
            tx,
        }
    }

    /// Spawn `action`; its result arrives on the response channel.
    pub fn dispatch(&self, action: Action) {
        let client = self.client.clone();
        let output_dir = self.output_dir.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(response) = execute(&client, &output_dir, action).await {
                let _ = tx.send(response);
            }
        });
    }
}

pub async fn execute(client: &SeltestClient, output_dir: &Path, action: Action) -> Option<Response> {
    let response = match action {
        Action::Quit => return None,
        Action::LoadModels => Response::ModelsLoaded(
            client
                .list_models()
                .await
                .map_err(|e| log_failure("list models", e)),
        ),
        Action::SelectModel(id) => Response::ModelSelected(
            client
                .select_model(&id)
                .await
                .map(|ack| ack.selected_model_id)
                .map_err(|e| log_failure("select model", e)),
        ),
        Action::SubmitAppContext(ctx) => Response::AppContextSaved(
            client
                .set_app_context(&ctx)
                .await
                .map(|ack| ack.app_context)
                .map_err(|e| log_failure("save app context", e)),
        ),
        Action::GenerateTestPlan {
            requirements,
            codebase,
            model_id,
        } => Response::TestPlanGenerated(
            generate_test_plan(client, requirements, &codebase, model_id).await,
        ),
        Action::DownloadScripts { stories, model_id } => {
            let result = match client.generate_scripts(&stories, model_id.as_deref()).await {
                Ok(archive) => download::save_archive(output_dir, &archive)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(log_failure("generate scripts", e)),
            };
            Response::ScriptsDownloaded(result)
        }
        Action::ExportPlan(plan) => Response::PlanExported(
            download::export_plan(output_dir, &plan, chrono::Local::now())
                .await
                .map_err(|e| e.to_string()),
        ),
    };
    Some(response)
}

async fn generate_test_plan(
    client: &SeltestClient,
    requirements: String,
    codebase: &Path,
    model_id: Option<String>,
) -> Result<seltest_client::TestPlan, String> {
    // An unreadable archive never reaches the backend
    let codebase = download::read_codebase(codebase)
        .await
        .map_err(|e| e.to_string())?;

    let request = TestPlanRequest {
        requirements,
        codebase,
        model_id,
    };
    client.generate_test_plan(request).await.map_err(|e| {
        tracing::error!(error = %e, "Test plan generation failed");
        test_plan_error_message(&e)
    })
}

fn log_failure(what: &str, err: ApiError) -> String {
    tracing::error!(error = %err, "Failed to {}", what);
    err.to_string()
}
