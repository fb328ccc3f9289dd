use conform_core::LoadError;
use std::fmt;

const SCHEME_DELIMITER: &str = "://";

/// A `scheme://bucket/key` object locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    /// Storage scheme, lowercased (`s3`)
    pub scheme: String,
    /// Bucket name
    pub bucket: String,
    /// Object key inside the bucket
    pub key: String,
}

impl RemoteLocation {
    /// Splits a locator into scheme, bucket and key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conform_storage::RemoteLocation;
    ///
    /// let location = RemoteLocation::parse("s3://exports/2022/pricing.csv").unwrap();
    /// assert_eq!(location.bucket, "exports");
    /// assert_eq!(location.key, "2022/pricing.csv");
    /// ```
    pub fn parse(path: &str) -> Result<Self, LoadError> {
        let invalid = || LoadError::InvalidLocation(path.to_string());

        let (scheme, rest) = path.split_once(SCHEME_DELIMITER).ok_or_else(invalid)?;
        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        let key = key.trim_start_matches('/');
        if scheme.is_empty() || bucket.is_empty() || key.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Returns the scheme of `path`, if it has one.
    pub fn scheme_of(path: &str) -> Option<&str> {
        path.split_once(SCHEME_DELIMITER)
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.is_empty())
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
