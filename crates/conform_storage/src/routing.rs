use crate::{LocalFileLoader, RemoteLocation};
use async_trait::async_trait;
use conform_core::{FileLoader, LoadError};

#[cfg(feature = "s3")]
use crate::ObjectStoreLoader;

/// Dispatches each path to the loader matching its scheme.
///
/// Paths without a scheme and `file://` paths are read locally, `s3://`
/// paths go to object storage. Any other scheme, or `s3://` when the crate
/// is built without the `s3` feature, fails with
/// [`LoadError::UnsupportedScheme`].
pub struct RoutingLoader {
    local: LocalFileLoader,
    #[cfg(feature = "s3")]
    remote: ObjectStoreLoader,
}

impl RoutingLoader {
    /// Creates a router; `region` is used by the object storage client.
    #[cfg_attr(not(feature = "s3"), allow(unused_variables))]
    pub fn new(region: Option<String>) -> Self {
        Self {
            local: LocalFileLoader::new(),
            #[cfg(feature = "s3")]
            remote: ObjectStoreLoader::new(region),
        }
    }

    #[cfg(feature = "s3")]
    async fn read_remote(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        self.remote.read(path).await
    }

    #[cfg(not(feature = "s3"))]
    async fn read_remote(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let location = RemoteLocation::parse(path)?;
        Err(LoadError::UnsupportedScheme(location.scheme))
    }
}

#[async_trait]
impl FileLoader for RoutingLoader {
    async fn read(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match RemoteLocation::scheme_of(path).map(str::to_ascii_lowercase) {
            None => self.local.read(path).await,
            Some(scheme) if scheme == "file" => {
                let local = &path["file://".len()..];
                self.local.read(local).await
            }
            Some(scheme) if scheme == "s3" => self.read_remote(path).await,
            Some(scheme) => Err(LoadError::UnsupportedScheme(scheme)),
        }
    }
}
