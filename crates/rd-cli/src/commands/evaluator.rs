use rd_core::validation::EvaluatorFields;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{EvaluatorArgs, EvaluatorCommands};
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash evaluator`.
pub async fn handle(
    action: &EvaluatorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EvaluatorCommands::Create(args) => {
            let evaluator = ctx.service.create_evaluator(&to_fields(args)).await?;
            output(&evaluator, flags.format)
        }
        EvaluatorCommands::List => {
            let evaluators = ctx.service.list_evaluators().await?;
            output(&apply_limit(evaluators, flags.limit), flags.format)
        }
        EvaluatorCommands::Show { id } => output(&ctx.service.get_evaluator(id).await?, flags.format),
        EvaluatorCommands::Update { id, fields } => {
            let evaluator = ctx.service.update_evaluator(id, &to_fields(fields)).await?;
            output(&evaluator, flags.format)
        }
        EvaluatorCommands::Delete { id } => {
            ctx.service.delete_evaluator(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

fn to_fields(args: &EvaluatorArgs) -> EvaluatorFields {
    EvaluatorFields {
        name: args.name.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        project_ids: args.projects.clone(),
    }
}
