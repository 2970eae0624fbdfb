use std::path::Path;

use bytes::Bytes;

use crate::errors::ClientError;

const ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".docx"];

/// A resume picked from disk or dropped onto the upload area.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, content))
    }

    /// Mirrors the backend's own acceptance rule so obviously bad picks never
    /// leave the client.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.file_name.trim().is_empty() {
            return Err(ClientError::Validation("No file selected".to_string()));
        }
        let lower = self.file_name.to_lowercase();
        if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ClientError::Validation(
                "Unsupported file type. Please upload a PDF or DOCX resume.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn mime_type(&self) -> &'static str {
        if self.file_name.to_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
    }
}
