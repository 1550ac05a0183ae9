//! scout-core: Core types and traits for scout
//!
//! This crate provides the error type and the tool abstraction shared by the
//! scout search toolkit.

pub mod error;
pub mod tool;

pub use error::Error;
pub use tool::{PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters, ToolRegistry};

pub type Result<T> = std::result::Result<T, Error>;
