use clap::Subcommand;

/// Timeline commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TimelineCommands {
    /// Phases, milestones and Gantt tasks for a project.
    Show { project_id: String },
    /// Set display order, one `--item kind:id:order` per entry.
    Reorder {
        #[arg(long, required = true)]
        item: Vec<String>,
    },
}
