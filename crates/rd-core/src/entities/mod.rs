//! Entity structs for all dashboard domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `rd-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod document;
mod evaluation;
mod evaluator;
mod metric;
mod milestone;
mod phase;
mod project;

pub use document::ResearchDocument;
pub use evaluation::Evaluation;
pub use evaluator::Evaluator;
pub use metric::ProgressMetric;
pub use milestone::ProjectMilestone;
pub use phase::EvaluationPhase;
pub use project::ResearchProject;
