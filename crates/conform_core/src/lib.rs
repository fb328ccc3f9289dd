//! # Conform Core
//!
//! Core data structures and types for the Conform dataset validator.
//!
//! Conform certifies that delimited text exports (CSV-like files) match a
//! declared shape before they are ingested downstream: every declared column
//! must be present, and every value must satisfy the column's type.
//!
//! ## Key Concepts
//!
//! - **Schema**: the declared columns of one dataset with their types, the
//!   separator and the date layout ([`ValidationSchema`])
//! - **Type spec**: `STRING`, `INTEGER`, `FLOAT` or `DATE`, optionally `|NULLABLE`
//! - **Date layout**: a strftime-style format translated and parsed once per schema
//! - **Error record**: one reported violation, tied to a row and usually a column
//!
//! ## Example
//!
//! ```rust
//! use conform_core::{BaseType, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .path("exports/pricing.csv")
//!     .date_format("%Y-%m-%d %H:%M:%S")
//!     .column("Price", "FLOAT")
//!     .column("Season", "STRING")
//!     .column("Subclass", "INTEGER|NULLABLE")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.column("Price").unwrap().base_type, BaseType::Float);
//! assert!(schema.date_layout().parse("2022-05-17 13:45:00").is_ok());
//! ```

pub mod builder;
pub mod check;
pub mod date_format;
pub mod error;
pub mod loader;
pub mod record;
pub mod schema;
pub mod types;

pub use builder::*;
pub use check::*;
pub use date_format::*;
pub use error::*;
pub use loader::*;
pub use record::*;
pub use schema::*;
pub use types::*;
