use async_trait::async_trait;

use crate::core::error::AppError;

/// Write side of a public object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `path` in the publicly readable area and return its URL.
    async fn put_public(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}
