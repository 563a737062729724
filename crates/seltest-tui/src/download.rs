// ABOUTME: Filesystem side of the wizard
// ABOUTME: Reads the codebase archive, saves script archives, exports test plans as JSON

use chrono::{DateTime, Local};
use seltest_client::{CodebaseArchive, ScriptArchive, TestPlan};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Load the archive to upload as the `codebase` part.
pub async fn read_codebase(path: &Path) -> Result<CodebaseArchive> {
    let path = expand_home(path);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        AppError::Validation(format!(
            "Could not read codebase archive {}: {}",
            path.display(),
            e
        ))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "codebase.zip".to_string());

    if !file_name.to_lowercase().ends_with(".zip") {
        tracing::warn!(file = %file_name, "Codebase archive does not look like a .zip");
    }

    Ok(CodebaseArchive { file_name, bytes })
}

/// Write the archive into `dir` under its own name, returning the full path.
pub async fn save_archive(dir: &Path, archive: &ScriptArchive) -> Result<PathBuf> {
    let dir = expand_home(dir);
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(&archive.file_name);
    tokio::fs::write(&path, &archive.bytes).await?;
    tracing::info!(path = %path.display(), bytes = archive.bytes.len(), "Saved script archive");
    Ok(path)
}

pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("test_plan_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Write `plan` as pretty JSON into `dir`.
pub async fn export_plan(dir: &Path, plan: &TestPlan, at: DateTime<Local>) -> Result<PathBuf> {
    let dir = expand_home(dir);
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(export_file_name(at));
    let json = serde_json::to_string_pretty(plan)?;
    tokio::fs::write(&path, json).await?;
    tracing::info!(path = %path.display(), "Exported test plan");
    Ok(path)
}
