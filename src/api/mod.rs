//! Input and display API between the terminal front end and the session.
//!
//! - commands (commands.rs): parsing and validating what the user typed;
//! - queries (queries.rs): read-only table snapshot;
//! - DTO (dto.rs): structures for rendering;
//! - errors (errors.rs): what the user sees before a reprompt.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
