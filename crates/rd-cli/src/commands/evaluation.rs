use rd_core::validation::EvaluationFields;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{EvaluationArgs, EvaluationCommands};
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_enum_opt;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash evaluation`.
pub async fn handle(
    action: &EvaluationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EvaluationCommands::Create(args) => {
            let evaluation = ctx.service.create_evaluation(&to_fields(args)?).await?;
            output(&evaluation, flags.format)
        }
        EvaluationCommands::List { project } => {
            let project = project.as_deref().filter(|p| !p.trim().is_empty());
            let evaluations = ctx.service.list_evaluations(project).await?;
            output(&apply_limit(evaluations, flags.limit), flags.format)
        }
        EvaluationCommands::Show { id } => {
            output(&ctx.service.get_evaluation(id).await?, flags.format)
        }
        EvaluationCommands::Update { id, fields } => {
            let evaluation = ctx.service.update_evaluation(id, &to_fields(fields)?).await?;
            output(&evaluation, flags.format)
        }
        EvaluationCommands::Delete { id } => {
            ctx.service.delete_evaluation(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

fn to_fields(args: &EvaluationArgs) -> anyhow::Result<EvaluationFields> {
    Ok(EvaluationFields {
        project_id: args.project.clone(),
        phase: parse_enum_opt(args.phase.as_deref(), "phase")?.unwrap_or_default(),
        start_date: args.start_date,
        end_date: args.end_date,
        objectives: args.objectives.clone(),
        patient_outcomes: args.patient_outcomes,
        compliance: args.compliance,
        safety: args.safety,
        efficacy: args.efficacy,
        notes: args.notes.clone(),
    })
}
