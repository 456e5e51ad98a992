use rd_core::enums::PhaseType;
use rd_core::validation::PhaseFields;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PhaseArgs, PhaseCommands};
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash phase`.
pub async fn handle(action: &PhaseCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        PhaseCommands::Add { project_id, fields } => {
            let phase = ctx.service.create_phase(project_id, &to_fields(fields)?).await?;
            output(&phase, flags.format)
        }
        PhaseCommands::List { project_id } => {
            let phases = ctx.service.list_phases(project_id).await?;
            output(&apply_limit(phases, flags.limit), flags.format)
        }
        PhaseCommands::Update {
            project_id,
            phase_id,
            fields,
        } => {
            let phase = ctx
                .service
                .update_phase(project_id, phase_id, &to_fields(fields)?)
                .await?;
            output(&phase, flags.format)
        }
        PhaseCommands::Complete { phase_id, undo } => {
            let phase = ctx.service.set_phase_completed(phase_id, !undo).await?;
            output(&json!({ "success": true, "completed": phase.completed }), flags.format)
        }
        PhaseCommands::Delete {
            project_id,
            phase_id,
        } => {
            ctx.service.delete_phase(project_id, phase_id).await?;
            output(&json!({ "deleted": phase_id }), flags.format)
        }
    }
}

fn to_fields(args: &PhaseArgs) -> anyhow::Result<PhaseFields> {
    Ok(PhaseFields {
        phase_type: parse_enum::<PhaseType>(&args.phase_type, "phase type")?,
        start_date: args.start_date,
        end_date: args.end_date,
        completed: args.completed,
        notes: args.notes.clone(),
    })
}
