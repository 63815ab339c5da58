//! Wire types for the files API

use crate::error::{ClientError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use url::form_urlencoded;

/// Stored-file metadata, returned by both upload and retrieve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Server-assigned file id
    pub id: String,
    /// Display name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME content type
    pub content_type: String,
    /// Path-like storage key
    pub key: String,
    /// Public URL the file is served from
    pub url: String,
    /// User-supplied metadata, when any was attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

/// Result of a delete call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletedFile {
    /// Whether the file was removed
    pub deleted: bool,
    /// Id of the affected file
    pub file: String,
}

/// Options for an upload
#[derive(Clone, Debug, Default)]
pub struct UploadOptions {
    /// Override the stored file name. Falls back to the payload's own name,
    /// or a generated token for anonymous payloads.
    pub name: Option<String>,
    /// Folder-like prefix to store the file under
    pub path: Option<String>,
    /// String metadata attached to the file
    pub metadata: Option<HashMap<String, String>>,
}

impl UploadOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the storage path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Addresses a stored file by server id or storage key.
///
/// At least one of the two must be set before a retrieve or delete call.
#[derive(Clone, Debug, Default)]
pub struct FileSelector {
    /// Server-assigned file id
    pub id: Option<String>,
    /// Path-like storage key
    pub key: Option<String>,
}

impl FileSelector {
    /// Select by server-assigned id
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            key: None,
        }
    }

    /// Select by storage key
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            id: None,
            key: Some(key.into()),
        }
    }

    /// Encode the selector as a query string, rejecting an empty selector
    /// before any request is built.
    pub(crate) fn to_query(&self) -> Result<String> {
        if self.id.is_none() && self.key.is_none() {
            return Err(ClientError::MissingIdentifier);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(id) = &self.id {
            query.append_pair("id", id);
        }
        if let Some(key) = &self.key {
            query.append_pair("key", key);
        }
        Ok(query.finish())
    }
}

/// A file payload for upload.
///
/// Carries the raw bytes plus whatever name and content type the source
/// provided; both are optional for payloads built from bare bytes.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub(crate) bytes: Bytes,
    pub(crate) name: Option<String>,
    pub(crate) content_type: Option<String>,
}

impl UploadFile {
    /// Wrap raw bytes as an anonymous payload
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            name: None,
            content_type: None,
        }
    }

    /// Read a payload from disk, taking the file name and guessing the
    /// content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from);
        let content_type = mime_guess::from_path(path).first().map(|m| m.to_string());

        Ok(Self {
            bytes: bytes.into(),
            name,
            content_type,
        })
    }

    /// Set the file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the MIME content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Payload size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
