use rd_core::enums::ProjectStatus;
use rd_core::responses::DashboardFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DashboardArgs;
use crate::commands::shared::parse::parse_enum_opt;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash dashboard`.
pub async fn handle(args: &DashboardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = DashboardFilter {
        status: parse_enum_opt::<ProjectStatus>(args.status.as_deref(), "status")?,
        date_from: args.date_from,
        date_to: args.date_to,
        project_name: args
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from),
    };
    let response = ctx.service.dashboard(&filter, args.page.as_deref()).await?;
    output(&response, flags.format)
}
