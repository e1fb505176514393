//! Uploads written into the public uploads directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use menu_core::domain::UploadedFile;
use menu_core::error::DomainError;
use menu_core::repositories::UploadStorage;
use menu_shared::constants::UPLOADS_PREFIX;

pub struct DiskUploadStorage {
    dir: PathBuf,
}

impl DiskUploadStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `u_<token>` plus the original extension, lower-cased.
    fn stored_name(file: &UploadedFile) -> String {
        let token = Uuid::new_v4().simple();
        match file.extension() {
            Some(ext) => format!("u_{token}.{ext}"),
            None => format!("u_{token}"),
        }
    }
}

#[async_trait]
impl UploadStorage for DiskUploadStorage {
    async fn save(&self, file: &UploadedFile) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::UploadError(format!("Failed to create {}: {e}", self.dir.display())))?;

        let name = Self::stored_name(file);
        let target = self.dir.join(&name);
        tokio::fs::write(&target, &file.bytes)
            .await
            .map_err(|e| DomainError::UploadError(format!("Failed to write {}: {e}", target.display())))?;

        info!("Stored upload {} as {} ({} bytes)", file.file_name, name, file.bytes.len());
        Ok(format!("{UPLOADS_PREFIX}/{name}"))
    }
}
