pub mod dashboard;
pub mod dispatch;
pub mod document;
pub mod evaluation;
pub mod evaluator;
pub mod metric;
pub mod milestone;
pub mod phase;
pub mod project;
pub mod serve;
pub mod shared;
pub mod survey;
pub mod timeline;
