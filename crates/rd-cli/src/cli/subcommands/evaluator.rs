use clap::{Args, Subcommand};

/// Evaluator commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EvaluatorCommands {
    Create(EvaluatorArgs),
    List,
    Show { id: String },
    /// Replace an evaluator's fields and project assignments.
    Update {
        id: String,
        #[command(flatten)]
        fields: EvaluatorArgs,
    },
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct EvaluatorArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Assigned project, repeatable.
    #[arg(long = "project")]
    pub projects: Vec<String>,
}
