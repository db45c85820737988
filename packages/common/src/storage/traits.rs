use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;
use super::hash::ContentHash;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Content-addressed storage for user-uploaded media (avatars).
///
/// Objects are keyed by the SHA-256 hash of their content, so identical
/// uploads dedupe to a single stored object.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store bytes and return the content hash.
    async fn put(&self, data: &[u8]) -> Result<ContentHash, StorageError>;

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, hash: &ContentHash) -> Result<bool, StorageError>;

    /// Delete an object by its content hash.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError>;
}
