use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use rd_server::AppState;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `rdash serve`.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr: SocketAddr = match &args.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid --bind address '{bind}'"))?,
        None => ctx.config.server.bind_addr()?,
    };

    let refreshed = ctx
        .service
        .refresh_milestone_statuses()
        .await
        .context("failed to refresh milestone statuses")?;
    if refreshed > 0 {
        tracing::info!(refreshed, "milestone statuses brought up to date");
    }

    let state = Arc::new(AppState::new(&ctx.config, Arc::clone(&ctx.service)));
    rd_server::serve(state, addr)
        .await
        .with_context(|| format!("server on {addr} failed"))
}
