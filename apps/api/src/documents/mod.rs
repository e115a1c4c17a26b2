//! Storage for the documents attached to an application.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// The three documents every application must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    Portfolio,
}

impl DocumentKind {
    /// Multipart field name the document is uploaded under.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
            DocumentKind::Portfolio => "portfolio",
        }
    }
}

/// Builds the object key for an uploaded document.
///
/// Layout: `applications/<user_id>/<submission_id>/<field>-<file name>`. The client file name
/// is reduced to ASCII alphanumerics, `.`, `-` and `_`.
pub fn document_key(
    user_id: Uuid,
    submission_id: Uuid,
    kind: DocumentKind,
    file_name: &str,
) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.is_empty() { "upload" } else { cleaned };

    format!(
        "applications/{user_id}/{submission_id}/{}-{cleaned}",
        kind.field_name()
    )
}

#[async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// S3 / MinIO backed document storage.
pub struct S3DocumentStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStorage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl DocumentStorage for S3DocumentStorage {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), AppError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}
