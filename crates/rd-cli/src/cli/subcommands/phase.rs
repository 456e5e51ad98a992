use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Evaluation phase commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PhaseCommands {
    /// Add a phase to a project.
    Add {
        project_id: String,
        #[command(flatten)]
        fields: PhaseArgs,
    },
    /// List a project's phases.
    List { project_id: String },
    /// Replace a phase's fields.
    Update {
        project_id: String,
        phase_id: String,
        #[command(flatten)]
        fields: PhaseArgs,
    },
    /// Mark a phase completed, or not with `--undo`.
    Complete {
        phase_id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Delete a phase.
    Delete { project_id: String, phase_id: String },
}

#[derive(Clone, Debug, Args)]
pub struct PhaseArgs {
    /// baseline, midline, endline, inception, design, data_collection,
    /// analysis, reporting or dissemination.
    #[arg(long = "type")]
    pub phase_type: String,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    #[arg(long)]
    pub completed: bool,
    #[arg(long, default_value = "")]
    pub notes: String,
}
