use rd_core::enums::MilestoneStatus;
use rd_core::milestone::StatusPatch;
use rd_core::responses::MilestoneStatusResponse;
use rd_core::validation::MilestoneFields;
use rd_db::updates::milestone::{MilestoneUpdate, MilestoneUpdateBuilder};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MilestoneCommands;
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::{parse_clearable_date, parse_enum, parse_enum_opt};
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash milestone`.
pub async fn handle(
    action: &MilestoneCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MilestoneCommands::Add {
            project_id,
            name,
            description,
            due_date,
            status,
            completed_date,
        } => {
            let fields = MilestoneFields {
                name: name.clone(),
                description: description.clone(),
                due_date: *due_date,
                status: parse_enum_opt(status.as_deref(), "status")?.unwrap_or_default(),
                completed_date: *completed_date,
            };
            let milestone = ctx.service.create_milestone(project_id, &fields).await?;
            output(&milestone, flags.format)
        }
        MilestoneCommands::List { project_id } => {
            let milestones = ctx.service.list_milestones(project_id).await?;
            output(&apply_limit(milestones, flags.limit), flags.format)
        }
        MilestoneCommands::Update {
            project_id,
            milestone_id,
            name,
            description,
            due_date,
            status,
            completed_date,
        } => {
            let update = build_update(
                name.as_deref(),
                description.as_deref(),
                due_date.as_deref(),
                status.as_deref(),
                completed_date.as_deref(),
            )?;
            let milestone = ctx
                .service
                .update_milestone(project_id, milestone_id, &update)
                .await?;
            output(&milestone, flags.format)
        }
        MilestoneCommands::Status {
            milestone_id,
            status,
            completed_date,
        } => {
            let patch = StatusPatch {
                status: parse_enum_opt(status.as_deref(), "status")?,
                completed_date: *completed_date,
            };
            let milestone = ctx.service.patch_milestone_status(milestone_id, patch).await?;
            output(&MilestoneStatusResponse::from(&milestone), flags.format)
        }
        MilestoneCommands::Delete {
            project_id,
            milestone_id,
        } => {
            ctx.service.delete_milestone(project_id, milestone_id).await?;
            output(&json!({ "deleted": milestone_id }), flags.format)
        }
        MilestoneCommands::Refresh => {
            let updated = ctx.service.refresh_milestone_statuses().await?;
            output(&json!({ "success": true, "updated": updated }), flags.format)
        }
    }
}

fn build_update(
    name: Option<&str>,
    description: Option<&str>,
    due_date: Option<&str>,
    status: Option<&str>,
    completed_date: Option<&str>,
) -> anyhow::Result<MilestoneUpdate> {
    let mut builder = MilestoneUpdateBuilder::new();
    if let Some(name) = name {
        builder = builder.name(name);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(raw) = due_date {
        builder = builder.due_date(parse_clearable_date(raw, "due date")?);
    }
    if let Some(raw) = status {
        builder = builder.status(parse_enum::<MilestoneStatus>(raw, "status")?);
    }
    if let Some(raw) = completed_date {
        builder = builder.completed_date(parse_clearable_date(raw, "completed date")?);
    }
    Ok(builder.build())
}
