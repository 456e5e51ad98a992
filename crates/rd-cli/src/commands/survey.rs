use std::path::PathBuf;

use anyhow::Context;
use rd_survey::{
    CountyBoundaries, Dimension, FilterSelection, SurveyTable, average_patient_loads,
    dependent_filters, mean_by,
};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{SelectionArgs, SurveyCommands};
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdash survey`.
pub async fn handle(action: &SurveyCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SurveyCommands::Filters(args) => {
            let table = load_table(ctx).await?;
            let (filters, rows) = dependent_filters(&table, &selection(args))?;
            output(
                &json!({ "filters": filters, "facility_count": rows.len() }),
                flags.format,
            )
        }
        SurveyCommands::PatientLoad(args) => {
            let table = load_table(ctx).await?;
            let (filters, rows) = dependent_filters(&table, &selection(args))?;
            let facilities = average_patient_loads(&rows);
            output(
                &json!({
                    "filters": filters,
                    "by_county": mean_by(&facilities, Dimension::County),
                    "by_level": mean_by(&facilities, Dimension::Level),
                    "by_ownership": mean_by(&facilities, Dimension::Ownership),
                    "facilities": apply_limit(facilities, flags.limit),
                }),
                flags.format,
            )
        }
        SurveyCommands::Counties => {
            let survey = &ctx.config.survey;
            let boundaries =
                CountyBoundaries::new(&survey.geojson_path, survey.target_counties.clone());
            let collection = boundaries
                .get()
                .await
                .with_context(|| format!("failed to load county boundaries from {}", survey.geojson_path))?;
            output(&*collection, flags.format)
        }
    }
}

fn selection(args: &SelectionArgs) -> FilterSelection {
    FilterSelection {
        county: args.county.clone(),
        level: args.level.clone(),
        ownership: args.ownership.clone(),
    }
}

async fn load_table(ctx: &AppContext) -> anyhow::Result<SurveyTable> {
    let path = PathBuf::from(&ctx.config.survey.csv_path);
    let display = path.display().to_string();
    tokio::task::spawn_blocking(move || SurveyTable::load_and_clean(&path))
        .await
        .context("survey loader task failed")?
        .with_context(|| format!("failed to load survey data from {display}"))
}
