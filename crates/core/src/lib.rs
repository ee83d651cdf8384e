//! Core data model for recordstore
//!
//! This crate defines the types shared by every layer of the store:
//! - [`Value`]: the field value model
//! - [`Record`] and [`RecordPatch`]: stored records and partial updates
//! - [`TableName`] and [`RecordId`]: how records are addressed

#![warn(missing_docs)]

pub mod record;
pub mod types;
pub mod value;

pub use record::{Record, RecordPatch};
pub use types::{RecordId, TableName};
pub use value::Value;
