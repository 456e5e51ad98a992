//! Repository modules implementing operations for all dashboard entities.
//!
//! Each module adds methods to `DashboardService` via `impl DashboardService` blocks.

pub mod dashboard;
pub mod document;
pub mod evaluation;
pub mod evaluator;
pub mod metric;
pub mod milestone;
pub mod phase;
pub mod project;
pub mod timeline;
