use rd_core::validation::MetricFields;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MetricCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash metric`.
pub async fn handle(action: &MetricCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        MetricCommands::Add {
            project_id,
            name,
            value,
            target,
            date,
            notes,
        } => {
            let fields = MetricFields {
                name: name.clone(),
                value: *value,
                target: *target,
                date_recorded: date.unwrap_or_else(|| ctx.service.today()),
                notes: notes.clone(),
            };
            let metric = ctx.service.record_metric(project_id, &fields).await?;
            output(&metric, flags.format)
        }
        MetricCommands::List { project_id } => {
            let metrics = ctx.service.list_metrics(project_id).await?;
            output(&apply_limit(metrics, flags.limit), flags.format)
        }
        MetricCommands::Delete {
            project_id,
            metric_id,
        } => {
            ctx.service.delete_metric(project_id, metric_id).await?;
            output(&json!({ "deleted": metric_id }), flags.format)
        }
    }
}
