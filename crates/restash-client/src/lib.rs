//! # Restash Rust SDK
//!
//! Client SDK for the Restash file storage API: upload files, look up
//! their metadata, and delete them.
//!
//! Every network operation resolves to an [`ApiResponse`] carrying either
//! the parsed response body or a normalized API error; transport and
//! server failures never surface as `Err`. The `Err` channel is reserved
//! for caller mistakes caught before any request is sent: a missing secret
//! key, a lookup without an id or key, an oversize or unreadable upload.
//!
//! ## Example
//!
//! ```rust,ignore
//! use restash_client::{FileSelector, RestashClient, UploadFile, UploadOptions};
//!
//! #[tokio::main]
//! async fn main() -> restash_client::Result<()> {
//!     let client = RestashClient::new("sk_live_...")?;
//!
//!     // Upload a file from disk
//!     let file = UploadFile::from_path("photo.jpg").await?;
//!     let uploaded = client.files().upload(file, UploadOptions::default()).await?;
//!     if let Some(meta) = uploaded.data() {
//!         println!("stored at {}", meta.url);
//!     }
//!
//!     // Look it up again by id
//!     let lookup = client.files().retrieve(FileSelector::id("file_123")).await?;
//!     match lookup.into_result() {
//!         Ok(meta) => println!("{} ({} bytes)", meta.name, meta.size),
//!         Err(err) => eprintln!("API error {}: {}", err.code.status(), err.message),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod files;
mod types;

pub use client::RestashClient;
pub use config::Config;
pub use error::{ApiResponse, ClientError, ErrorCode, ErrorResponse, Result};
pub use files::{Files, MAX_UPLOAD_BYTES};
pub use types::*;
