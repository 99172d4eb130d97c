use crate::domain::model::PostingId;
use crate::domain::ports::WatermarkStore;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Watermark kept as a single line of text in a local file.
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl WatermarkStore for FileWatermarkStore {
    async fn load(&self) -> Result<Option<PostingId>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = content.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(PostingId::new(value)))
    }

    async fn save(&self, id: &PostingId) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so an interrupted save never leaves a torn file.
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, id.as_str()).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}
