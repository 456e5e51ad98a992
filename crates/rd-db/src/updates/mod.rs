//! Update builder types for partial entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. `Option<Option<T>>`
//! distinguishes "leave unchanged" from "clear".

pub mod milestone;
pub mod project;
