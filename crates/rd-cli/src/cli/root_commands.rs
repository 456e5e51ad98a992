use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    DocumentCommands, EvaluationCommands, EvaluatorCommands, MetricCommands, MilestoneCommands,
    PhaseCommands, ProjectCommands, SurveyCommands, TimelineCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Paginated project dashboard with status counts.
    Dashboard(DashboardArgs),
    /// Research projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Evaluation phases.
    Phase {
        #[command(subcommand)]
        action: PhaseCommands,
    },
    /// Project milestones.
    Milestone {
        #[command(subcommand)]
        action: MilestoneCommands,
    },
    /// Combined phase and milestone timeline.
    Timeline {
        #[command(subcommand)]
        action: TimelineCommands,
    },
    /// Progress metrics.
    Metric {
        #[command(subcommand)]
        action: MetricCommands,
    },
    /// Project documents.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
    /// Evaluators.
    Evaluator {
        #[command(subcommand)]
        action: EvaluatorCommands,
    },
    /// Evaluation records.
    Evaluation {
        #[command(subcommand)]
        action: EvaluationCommands,
    },
    /// Facility survey reports.
    Survey {
        #[command(subcommand)]
        action: SurveyCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Only projects with this status.
    #[arg(long)]
    pub status: Option<String>,
    /// Projects starting on or after this date.
    #[arg(long)]
    pub date_from: Option<NaiveDate>,
    /// Projects ending on or before this date.
    #[arg(long)]
    pub date_to: Option<NaiveDate>,
    /// Title substring, case-insensitive.
    #[arg(long)]
    pub project_name: Option<String>,
    /// Page number; out-of-range values clamp, non-numeric ones mean page 1.
    #[arg(long)]
    pub page: Option<String>,
}
