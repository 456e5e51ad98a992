use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
        Commands::Dashboard(args) => commands::dashboard::handle(&args, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Phase { action } => commands::phase::handle(&action, ctx, flags).await,
        Commands::Milestone { action } => commands::milestone::handle(&action, ctx, flags).await,
        Commands::Timeline { action } => commands::timeline::handle(&action, ctx, flags).await,
        Commands::Metric { action } => commands::metric::handle(&action, ctx, flags).await,
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
        Commands::Evaluator { action } => commands::evaluator::handle(&action, ctx, flags).await,
        Commands::Evaluation { action } => commands::evaluation::handle(&action, ctx, flags).await,
        Commands::Survey { action } => commands::survey::handle(&action, ctx, flags).await,
    }
}
