use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Evaluation record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EvaluationCommands {
    Create(EvaluationArgs),
    /// List evaluations, optionally for one project.
    List {
        #[arg(long)]
        project: Option<String>,
    },
    Show { id: String },
    /// Replace an evaluation's fields.
    Update {
        id: String,
        #[command(flatten)]
        fields: EvaluationArgs,
    },
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct EvaluationArgs {
    #[arg(long)]
    pub project: String,
    /// planning, data_collection, analysis, reporting or completed.
    #[arg(long)]
    pub phase: Option<String>,
    #[arg(long)]
    pub start_date: NaiveDate,
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    #[arg(long)]
    pub objectives: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub patient_outcomes: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub compliance: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub safety: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub efficacy: Option<i64>,
    #[arg(long, default_value = "")]
    pub notes: String,
}
