//! # rd-survey
//!
//! Reporting data layer over the facility baseline survey export.
//!
//! - [`dataset`]: load the CSV and apply the cleaning rules
//! - [`cache`]: time-limited shared copy of the cleaned table
//! - [`filters`]: county → level/ownership dependent filters
//! - [`averages`]: average monthly patient load per condition group
//! - [`geo`]: county boundary `GeoJSON`
//!
//! Chart rendering is left to the client; this crate only serves data.

pub mod averages;
pub mod cache;
pub mod dataset;
pub mod error;
pub mod filters;
pub mod geo;

pub use averages::{ConditionGroup, Dimension, GroupedLoad, PatientLoad, average_patient_loads, mean_by};
pub use cache::{SurveyCache, SurveyData};
pub use dataset::{Cell, SurveyTable};
pub use error::SurveyError;
pub use filters::{FilterOptions, FilterSelection, dependent_filters};
pub use geo::CountyBoundaries;
