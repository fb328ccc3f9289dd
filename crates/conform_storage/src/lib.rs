//! # Conform Storage
//!
//! [`FileLoader`](conform_core::FileLoader) implementations used by the
//! command line:
//!
//! - [`LocalFileLoader`] reads files from the local filesystem
//! - `ObjectStoreLoader` reads `s3://bucket/key` objects (feature `s3`)
//! - [`RoutingLoader`] picks one of the two from the path scheme
//!
//! ## Example
//!
//! ```rust,no_run
//! use conform_core::FileLoader;
//! use conform_storage::RoutingLoader;
//!
//! # async fn example() -> Result<(), conform_core::LoadError> {
//! let loader = RoutingLoader::new(Some("eu-west-1".to_string()));
//! let bytes = loader.read("data/pricing.csv").await?;
//! println!("{} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

mod local;
mod location;
#[cfg(feature = "s3")]
mod object;
mod routing;

pub use local::LocalFileLoader;
pub use location::RemoteLocation;
#[cfg(feature = "s3")]
pub use object::ObjectStoreLoader;
pub use routing::RoutingLoader;
