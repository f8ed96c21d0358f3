//! Form submission parsing

use axum::extract::Multipart;

use crate::config::UiConfig;
use crate::error::{Error, Result};
use crate::types::document::Upload;

/// Multipart field carrying the query text
pub const QUERY_FIELD: &str = "query";
/// Multipart field carrying uploaded files (repeated)
pub const FILES_FIELD: &str = "files";

/// One press of the submit button
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Query text as typed
    pub query: String,
    /// Uploads in the order they were sent
    pub uploads: Vec<Upload>,
}

impl Submission {
    /// Read a submission from a multipart body
    pub async fn from_multipart(mut multipart: Multipart, ui: &UiConfig) -> Result<Self> {
        let mut submission = Submission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::Multipart(format!("Failed to read multipart field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            let filename = field.file_name().map(|s| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| Error::Multipart(format!("Failed to read field '{}': {}", name, e)))?;

            match name.as_str() {
                QUERY_FIELD => {
                    submission.query = String::from_utf8(data.to_vec())
                        .map_err(|_| Error::Multipart("query is not valid UTF-8".to_string()))?;
                }
                FILES_FIELD => {
                    submission.push_file(filename.unwrap_or_default(), data.to_vec(), ui)?;
                }
                other => {
                    tracing::debug!("Ignoring unknown form field '{}'", other);
                }
            }
        }

        tracing::debug!(
            uploads = submission.uploads.len(),
            query_len = submission.query.len(),
            "Form submission parsed"
        );

        Ok(submission)
    }

    /// Add a file part. Browsers send an empty, unnamed part when nothing was
    /// chosen; those are skipped.
    pub fn push_file(&mut self, filename: String, data: Vec<u8>, ui: &UiConfig) -> Result<()> {
        if filename.is_empty() && data.is_empty() {
            return Ok(());
        }
        if !ui.accepts(&filename) {
            return Err(Error::UnsupportedFileType(filename));
        }
        self.uploads.push(Upload::new(filename, data));
        Ok(())
    }
}
