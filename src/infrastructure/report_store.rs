// JSON persistence for assessment runs
use crate::application::assessment_service::AssessmentRun;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ReportStore {
    directory: PathBuf,
    file_prefix: String,
}

impl ReportStore {
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
        }
    }

    /// `{prefix}_{YYYYMMDD_HHMMSS}.json`, stamped with the run's UTC time.
    pub fn file_path(&self, run: &AssessmentRun) -> PathBuf {
        let timestamp = run.generated_at.format("%Y%m%d_%H%M%S");
        self.directory.join(format!("{}_{}.json", self.file_prefix, timestamp))
    }

    pub async fn save(&self, run: &AssessmentRun) -> Result<PathBuf> {
        let path = self.file_path(run);
        let json = serde_json::to_vec_pretty(run).context("Failed to serialize assessment run")?;
        write_file(&path, &json).await?;
        tracing::info!("Saved JSON report to {}", path.display());
        Ok(path)
    }
}

pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
