use async_trait::async_trait;
use conform_core::{FileLoader, LoadError};
use std::io::ErrorKind;
use tracing::debug;

/// Reads files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileLoader;

impl LocalFileLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLoader for LocalFileLoader {
    async fn read(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(LoadError::NotFound(path.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path.to_string()));
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: path.to_string(),
                    source,
                });
            }
        }

        let content = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })?;
        debug!("Read {} bytes from [{}]", content.len(), path);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricing.csv");
        std::fs::write(&path, "Price\n440\n").unwrap();

        let content = LocalFileLoader::new()
            .read(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(content, b"Price\n440\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let err = LocalFileLoader::new()
            .read(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let dir = TempDir::new().unwrap();

        let err = LocalFileLoader::new()
            .read(dir.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
