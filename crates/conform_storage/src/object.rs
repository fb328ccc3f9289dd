//! S3 loader backed by the `object_store` crate.

use crate::RemoteLocation;
use async_trait::async_trait;
use conform_core::{FileLoader, LoadError};
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{ObjectStore, RetryConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

const S3_SCHEME: &str = "s3";

/// Reads `s3://bucket/key` objects.
///
/// Credentials come from the standard AWS environment variables. One client
/// is built per bucket and reused for later reads.
pub struct ObjectStoreLoader {
    region: Option<String>,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl ObjectStoreLoader {
    /// Creates a loader for the given region.
    pub fn new(region: Option<String>) -> Self {
        Self {
            region,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Serves `bucket` from an already built store.
    pub fn with_store(self, bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(bucket.into(), store);
        self
    }

    fn store(&self, location: &RemoteLocation) -> Result<Arc<dyn ObjectStore>, LoadError> {
        let path = location.to_string();
        // Client cache only: entries stay valid after a poisoning panic.
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(store) = stores.get(&location.bucket) {
            return Ok(Arc::clone(store));
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&location.bucket)
            .with_retry(RetryConfig {
                max_retries: 3,
                retry_timeout: Duration::from_secs(30),
                ..Default::default()
            });
        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }

        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| LoadError::storage(&path, format!("Failed to create S3 client: {}", e)))?,
        );
        debug!("Created S3 client for bucket [{}]", location.bucket);
        stores.insert(location.bucket.clone(), Arc::clone(&store));
        Ok(store)
    }
}

#[async_trait]
impl FileLoader for ObjectStoreLoader {
    async fn read(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let location = RemoteLocation::parse(path)?;
        if location.scheme != S3_SCHEME {
            return Err(LoadError::UnsupportedScheme(location.scheme));
        }

        let store = self.store(&location)?;
        let key = Path::from(location.key.as_str());

        let result = store.get(&key).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => LoadError::NotFound(path.to_string()),
            other => LoadError::storage(path, other.to_string()),
        })?;
        let bytes = result
            .bytes()
            .await
            .map_err(|e| LoadError::storage(path, e.to_string()))?;

        debug!("Read {} bytes from [{}]", bytes.len(), path);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::PutPayload;
    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;

    async fn loader_with(key: &str, content: &str) -> ObjectStoreLoader {
        let store = InMemory::new();
        store
            .put(&Path::from(key), PutPayload::from(content.as_bytes().to_vec()))
            .await
            .unwrap();
        ObjectStoreLoader::new(None).with_store("exports", Arc::new(store))
    }

    #[tokio::test]
    async fn test_read_object() {
        let loader = loader_with("2022/pricing.csv", "Price\n440\n").await;

        let content = loader.read("s3://exports/2022/pricing.csv").await.unwrap();
        assert_eq!(content, b"Price\n440\n");
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let loader = loader_with("2022/pricing.csv", "Price\n440\n").await;

        let err = loader.read("s3://exports/2023/pricing.csv").await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_other_scheme_is_unsupported() {
        let loader = ObjectStoreLoader::new(None);

        let err = loader.read("gs://exports/pricing.csv").await.unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedScheme(s) if s == "gs"));
    }

    #[tokio::test]
    async fn test_store_survives_poisoned_lock() {
        let loader = ObjectStoreLoader::new(None);
        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = loader.stores.lock().unwrap();
            panic!("poison the store cache");
        }));
        assert!(poisoned.is_err());
        assert!(loader.stores.is_poisoned());

        let store = InMemory::new();
        store
            .put(&Path::from("2022/pricing.csv"), PutPayload::from(b"Price\n440\n".to_vec()))
            .await
            .unwrap();
        let loader = loader.with_store("exports", Arc::new(store));

        let content = loader.read("s3://exports/2022/pricing.csv").await.unwrap();
        assert_eq!(content, b"Price\n440\n");
    }
}
