//! Whole-document JSON reads and atomic writes

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use menu_core::error::DomainError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::{debug, warn};
use uuid::Uuid;

/// Reads and parses a document.
///
/// `None` when the file is missing, unreadable, blank or not valid JSON;
/// every case except a missing file is logged.
pub async fn load_document(path: &Path) -> Option<Value> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            return None;
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed JSON in {}: {}", path.display(), e);
            None
        }
    }
}

/// Four-space pretty JSON with non-ASCII text left unescaped.
pub fn to_pretty_json<T: Serialize + ?Sized>(document: &T) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|e| DomainError::StorageError(format!("Failed to serialise document: {e}")))?;
    Ok(buf)
}

/// Replaces the document at `path` by writing a sibling temporary file and
/// renaming it over the target, so readers see either the old or new file.
pub async fn save_document<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<(), DomainError> {
    let bytes = to_pretty_json(document)?;
    write_atomic(path, &bytes).await
}

pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainError::StorageError(format!("Failed to create {}: {e}", parent.display())))?;
    }

    let tmp = temp_path(path);
    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        return Err(DomainError::StorageError(format!("Failed to write {}: {e}", tmp.display())));
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(DomainError::StorageError(format!("Failed to replace {}: {e}", path.display())));
    }

    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
}
