use clap::{Args, Subcommand};

/// Facility survey commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SurveyCommands {
    /// Filter options for the current selection.
    Filters(SelectionArgs),
    /// Average monthly patient load per condition.
    PatientLoad(SelectionArgs),
    /// County boundaries as GeoJSON.
    Counties,
}

/// Repeatable filter values; none selects everything.
#[derive(Clone, Debug, Default, Args)]
pub struct SelectionArgs {
    #[arg(long)]
    pub county: Vec<String>,
    #[arg(long)]
    pub level: Vec<String>,
    #[arg(long)]
    pub ownership: Vec<String>,
}
