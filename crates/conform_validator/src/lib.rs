//! # Conform Validator
//!
//! Validation engine for Conform. This crate provides the logic for checking
//! delimited data against a [`ValidationSchema`](conform_core::ValidationSchema):
//!
//! - Header checks (column count, declared columns present, byte-order marks)
//! - Field classification (`STRING`, `INTEGER`, `FLOAT`, `DATE`, nullability)
//! - Parsing of raw file content into a header and rows
//! - Concurrent batch validation of every declared file
//!
//! ## Example
//!
//! ```rust
//! use conform_core::SchemaBuilder;
//! use conform_validator::{Dataset, SchemaValidator};
//!
//! let schema = SchemaBuilder::new()
//!     .path("pricing.csv")
//!     .date_format("%d/%m/%Y")
//!     .column("Price", "FLOAT")
//!     .column("Launch", "DATE|NULLABLE")
//!     .build()
//!     .unwrap();
//!
//! let content = b"Price,Launch\n440,17/05/2022\n405,\n";
//! let dataset = Dataset::from_bytes(content, schema.separator()).unwrap();
//! let errors = SchemaValidator::new().validate_dataset(&dataset, &schema).unwrap();
//!
//! if errors.is_empty() {
//!     println!("Dataset is valid!");
//! } else {
//!     for error in &errors {
//!         println!("{}", error);
//!     }
//! }
//! ```

mod batch;
pub mod bom;
mod dataset;
mod engine;
mod error;

pub use batch::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
