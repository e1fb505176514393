//! Uploaded file payload

/// A file received from an admin form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Filename as sent by the browser; only its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// `None` for the empty part a browser sends when no file was chosen.
    pub fn new(file_name: String, bytes: Vec<u8>) -> Option<Self> {
        if file_name.trim().is_empty() || bytes.is_empty() {
            return None;
        }
        Some(Self { file_name, bytes })
    }

    /// Lower-cased extension of the original name, if it has a usable one.
    pub fn extension(&self) -> Option<String> {
        let base = self.file_name.rsplit(['/', '\\']).next().unwrap_or_default();
        let (stem, ext) = base.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}
