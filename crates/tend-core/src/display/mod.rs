//! Markdown rendering of models and operation results.
//!
//! Models implement [`std::fmt::Display`] directly; collections and
//! operation outcomes get small wrapper types so the CLI and the MCP server
//! print exactly the same text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Plant, Task)   │───▶│ Result Types    │───▶│  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `Plants`, `Tasks`
//! - [`results`]: `CreateResult`, `DeleteResult`, `CompletionResult`
//! - [`schedule`]: recurrence rules and schedules in words
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: date formatting
//! - [`models`]: `Display` for the domain models
//!
//! ```rust
//! use tend_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Marked 2 tasks late".to_string());
//! assert_eq!(status.to_string(), "Success: Marked 2 tasks late\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod schedule;
pub mod status;

pub use collections::{Plants, Tasks};
pub use datetime::{LocalDate, UtcDateTime};
pub use results::{CompletionResult, CreateResult, DeleteResult};
pub use status::OperationStatus;
