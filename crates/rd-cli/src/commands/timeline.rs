use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TimelineCommands;
use crate::commands::shared::parse::parse_order_item;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash timeline`.
pub async fn handle(action: &TimelineCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TimelineCommands::Show { project_id } => {
            output(&ctx.service.project_timeline(project_id).await?, flags.format)
        }
        TimelineCommands::Reorder { item } => {
            let items = item
                .iter()
                .map(|raw| parse_order_item(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let updated = ctx.service.reorder_timeline(&items).await?;
            output(&json!({ "success": true, "updated": updated }), flags.format)
        }
    }
}
