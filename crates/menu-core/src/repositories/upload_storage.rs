//! Upload storage trait (port)

use async_trait::async_trait;

use crate::domain::UploadedFile;
use crate::error::DomainError;

#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Stores the file under a fresh collision-resistant name and returns the
    /// relative reference to record (e.g. `uploads/u_<token>.png`).
    async fn save(&self, file: &UploadedFile) -> Result<String, DomainError>;
}
