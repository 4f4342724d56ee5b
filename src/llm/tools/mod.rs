//! Tool catalog and execution routing
//!
//! The catalog declares the two lookup tools every provider sees; the
//! router executes normalized calls against the injected services.

pub mod catalog;
pub mod router;

pub use catalog::{tool_catalog, SearchArgs, VIDEO_SEARCH, WEB_SEARCH};
pub use router::{ToolError, ToolOutput, ToolRouter};
