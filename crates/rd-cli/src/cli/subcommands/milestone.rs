use chrono::NaiveDate;
use clap::Subcommand;

/// Milestone commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MilestoneCommands {
    /// Add a milestone to a project.
    Add {
        project_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        due_date: Option<NaiveDate>,
        /// pending, completed or overdue.
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        completed_date: Option<NaiveDate>,
    },
    /// List a project's milestones.
    List { project_id: String },
    /// Update fields of a milestone. Pass `none` to clear a date.
    Update {
        project_id: String,
        milestone_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        completed_date: Option<String>,
    },
    /// Change only the status and completion date.
    Status {
        milestone_id: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        completed_date: Option<NaiveDate>,
    },
    /// Delete a milestone.
    Delete {
        project_id: String,
        milestone_id: String,
    },
    /// Re-run the overdue check on every milestone.
    Refresh,
}
