//! Core traits and types for the FieldOps agent tools.
//!
//! - [`Tool`]: a typed, async operation with a static name and description
//! - [`ToolCodec`]: the serialization boundary between wire JSON and native types
//! - [`ToolContext`]: per-request session carrying the caller's credential
//! - [`ToolRegistry`]: JSON dispatch, [`ToolOutcome`] results and the capability manifest
//! - [`TextFormat`]: human-readable rendering of tool outputs

pub mod context;
pub mod error;
pub mod fmt;
pub mod outcome;
pub mod registry;
pub mod schema;
pub mod tool;

pub use context::ToolContext;
pub use error::ToolError;
pub use fmt::{TextFormat, TextOptions, fallback_text_from_json};
pub use outcome::ToolOutcome;
pub use registry::{FormattedResult, ManifestEntry, ToolRegistry, ToolRegistryBuilder};
pub use tool::{Tool, ToolCodec};

pub use futures::future::BoxFuture;
