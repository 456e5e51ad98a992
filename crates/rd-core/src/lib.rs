//! # rd-core
//!
//! Core types, lifecycle rules, and error types for the research dashboard.
//!
//! This crate provides the foundational types shared across all dashboard crates:
//! - Entity structs for all domain objects (projects, phases, milestones, etc.)
//! - Status enums, including the milestone state machine
//! - Project completion calculation
//! - Timeline aggregation for Gantt-style views
//! - Evaluation validation
//! - ID prefix constants
//! - Cross-cutting error types
//! - API/CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod milestone;
pub mod progress;
pub mod responses;
pub mod timeline;
pub mod validation;
