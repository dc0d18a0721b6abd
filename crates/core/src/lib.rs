//! Shared types for the retrospective board core.
//!
//! This crate has no internal dependencies so that the database layer, the
//! change-notification bus, and the client can all reference the same id
//! aliases, column categories, error taxonomy, and export formats.

pub mod columns;
pub mod error;
pub mod export;
pub mod types;

pub use columns::RetroColumn;
pub use error::{CoreError, CoreResult};
