use chrono::NaiveDate;
use clap::Subcommand;

/// Progress metric commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MetricCommands {
    /// Record a metric value.
    Add {
        project_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
        #[arg(long)]
        target: Option<f64>,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List a project's metrics, newest first.
    List { project_id: String },
    /// Delete a metric.
    Delete { project_id: String, metric_id: String },
}
