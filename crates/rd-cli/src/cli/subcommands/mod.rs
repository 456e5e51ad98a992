mod document;
mod evaluation;
mod evaluator;
mod metric;
mod milestone;
mod phase;
mod project;
mod survey;
mod timeline;

pub use document::DocumentCommands;
pub use evaluation::{EvaluationArgs, EvaluationCommands};
pub use evaluator::{EvaluatorArgs, EvaluatorCommands};
pub use metric::MetricCommands;
pub use milestone::MilestoneCommands;
pub use phase::{PhaseArgs, PhaseCommands};
pub use project::{ProjectCommands, ProjectEditArgs};
pub use survey::{SelectionArgs, SurveyCommands};
pub use timeline::TimelineCommands;
