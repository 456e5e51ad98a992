use clap::{Args, Subcommand};

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        edit: ProjectEditArgs,
        /// Lead researcher username.
        #[arg(long)]
        lead: Option<String>,
    },
    /// List all projects.
    List,
    /// Show a project with its completion percentage.
    Show { id: String },
    /// Show a project with documents, metrics and evaluators.
    Overview { id: String },
    /// Update fields of a project. Pass `none` to clear a date or URL.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        edit: ProjectEditArgs,
    },
    /// Delete a project and everything attached to it.
    Delete { id: String },
}

#[derive(Clone, Debug, Default, Args)]
pub struct ProjectEditArgs {
    #[arg(long)]
    pub description: Option<String>,
    /// planned, active, on_hold, completed or cancelled.
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub dashboard_url: Option<String>,
}
