//! File operations

use crate::client::{Payload, RestashClient};
use crate::error::{ApiResponse, ClientError, Result};
use crate::types::{DeletedFile, FileMetadata, FileSelector, UploadFile, UploadOptions};
use rand::RngCore;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

/// Single-request upload ceiling; larger files go through the resumable
/// upload API.
pub const MAX_UPLOAD_BYTES: u64 = 4 * 1024 * 1024;

/// File operations on a [`RestashClient`]
pub struct Files<'a> {
    client: &'a RestashClient,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a RestashClient) -> Self {
        Self { client }
    }

    /// Upload a file.
    ///
    /// The stored name is `options.name`, the payload's own name, or a
    /// generated token for anonymous payloads, in that order. Payloads over
    /// [`MAX_UPLOAD_BYTES`] are rejected before any request is sent.
    #[instrument(skip(self, file, options))]
    pub async fn upload(
        &self,
        file: UploadFile,
        options: UploadOptions,
    ) -> Result<ApiResponse<FileMetadata>> {
        if file.size() > MAX_UPLOAD_BYTES {
            return Err(ClientError::FileTooLarge { size: file.size() });
        }

        let name = options
            .name
            .or_else(|| file.name.clone())
            .unwrap_or_else(random_name);
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(name.clone())
            .mime_str(&content_type)
            .map_err(|err| ClientError::InvalidUpload(format!("content type: {err}")))?;

        let mut form = Form::new().part("file", part).text("name", name);
        if let Some(path) = options.path {
            form = form.text("path", path);
        }
        if let Some(metadata) = options.metadata {
            let encoded = serde_json::to_string(&metadata)
                .map_err(|err| ClientError::InvalidUpload(format!("metadata: {err}")))?;
            form = form.text("metadata", encoded);
        }

        Ok(self
            .client
            .post("/files/upload", Payload::Multipart(form))
            .await)
    }

    /// Retrieve a file's metadata. The selector must carry an id or a key.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, selector: FileSelector) -> Result<ApiResponse<FileMetadata>> {
        let query = selector.to_query()?;
        Ok(self.client.get(&format!("/files/retrieve?{query}")).await)
    }

    /// Delete a file. The selector must carry an id or a key.
    #[instrument(skip(self))]
    pub async fn delete(&self, selector: FileSelector) -> Result<ApiResponse<DeletedFile>> {
        let query = selector.to_query()?;
        Ok(self.client.delete(&format!("/files/delete?{query}")).await)
    }
}

/// Name token for anonymous payloads: 8 random bytes, hex-encoded, so the
/// result is unpredictable and safe in URLs and file names.
fn random_name() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_name_is_hex_and_distinct() {
        let first = random_name();
        let second = random_name();

        assert_eq!(first.len(), 16);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
