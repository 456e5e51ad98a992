use rd_core::enums::ProjectStatus;
use rd_core::validation::ProjectFields;
use rd_db::updates::project::{ProjectUpdate, ProjectUpdateBuilder};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProjectCommands, ProjectEditArgs};
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::{
    parse_clearable_date, parse_clearable_text, parse_enum, parse_enum_opt,
};
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash project`.
pub async fn handle(action: &ProjectCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { title, edit, lead } => {
            let fields = create_fields(title, edit)?;
            let project = ctx.service.create_project(&fields, lead.as_deref()).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List => {
            let projects = ctx.service.list_projects().await?;
            output(&apply_limit(projects, flags.limit), flags.format)
        }
        ProjectCommands::Show { id } => output(&ctx.service.project_summary(id).await?, flags.format),
        ProjectCommands::Overview { id } => {
            output(&ctx.service.project_overview(id).await?, flags.format)
        }
        ProjectCommands::Update { id, title, edit } => {
            let update = build_update(title.as_deref(), edit)?;
            if update.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field flag");
            }
            let project = ctx.service.update_project(id, &update).await?;
            output(&project, flags.format)
        }
        ProjectCommands::Delete { id } => {
            let files = ctx.service.delete_project(id).await?;
            let store = ctx.documents();
            for file in &files {
                if let Err(error) = store.remove(file).await {
                    tracing::warn!(file = %file, %error, "failed to remove project document");
                }
            }
            output(
                &json!({ "deleted": id, "files_removed": files.len() }),
                flags.format,
            )
        }
    }
}

fn create_fields(title: &str, edit: &ProjectEditArgs) -> anyhow::Result<ProjectFields> {
    Ok(ProjectFields {
        title: title.to_string(),
        description: edit.description.clone().unwrap_or_default(),
        status: parse_enum_opt(edit.status.as_deref(), "status")?.unwrap_or_default(),
        start_date: edit
            .start_date
            .as_deref()
            .map(|raw| parse_clearable_date(raw, "start date"))
            .transpose()?
            .flatten(),
        end_date: edit
            .end_date
            .as_deref()
            .map(|raw| parse_clearable_date(raw, "end date"))
            .transpose()?
            .flatten(),
        dashboard_url: edit.dashboard_url.as_deref().and_then(parse_clearable_text),
    })
}

fn build_update(title: Option<&str>, edit: &ProjectEditArgs) -> anyhow::Result<ProjectUpdate> {
    let mut builder = ProjectUpdateBuilder::new();
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(description) = &edit.description {
        builder = builder.description(description.as_str());
    }
    if let Some(status) = &edit.status {
        builder = builder.status(parse_enum::<ProjectStatus>(status, "status")?);
    }
    if let Some(raw) = &edit.start_date {
        builder = builder.start_date(parse_clearable_date(raw, "start date")?);
    }
    if let Some(raw) = &edit.end_date {
        builder = builder.end_date(parse_clearable_date(raw, "end date")?);
    }
    if let Some(raw) = &edit.dashboard_url {
        builder = builder.dashboard_url(parse_clearable_text(raw));
    }
    Ok(builder.build())
}
