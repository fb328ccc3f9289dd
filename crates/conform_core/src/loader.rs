//! Byte source abstraction.
//!
//! The validator never touches storage directly. Whoever drives a batch
//! injects a [`FileLoader`] that knows how to turn a configured path into
//! bytes, whether the path is local or a `scheme://bucket/key` locator.

use crate::LoadError;
use async_trait::async_trait;

/// Reads the raw content of a configured source location.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use conform_core::{FileLoader, LoadError};
///
/// struct InMemory(Vec<u8>);
///
/// #[async_trait]
/// impl FileLoader for InMemory {
///     async fn read(&self, _path: &str) -> Result<Vec<u8>, LoadError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Reads the whole content at `path`.
    async fn read(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}
