use super::Source;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Package stored on the local filesystem
pub struct LocalFileSource {
    path: PathBuf,
    display: String,
}

impl LocalFileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            display: path.display().to_string(),
        }
    }
}

#[async_trait]
impl Source for LocalFileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.display))
    }

    fn describe(&self) -> &str {
        &self.display
    }
}
