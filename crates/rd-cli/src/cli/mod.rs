use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `rdash` binary.
#[derive(Debug, Parser)]
#[command(name = "rdash", version, about = "Research project dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return from list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path, overriding `database.path` from configuration
    #[arg(long, global = true)]
    pub database: Option<String>,
}

impl Cli {
    /// Flags command handlers need; logging flags are consumed in `main`.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            database: self.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    use super::subcommands::{MilestoneCommands, ProjectCommands, SurveyCommands, TimelineCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "rdash", "--format", "table", "--limit", "10", "--verbose", "project", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["rdash", "dashboard", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["rdash", "--format", "xml", "dashboard"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn database_override_is_copied() {
        let cli = Cli::try_parse_from(["rdash", "--database", "/tmp/rd.db", "serve"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some("/tmp/rd.db"));
    }

    #[test]
    fn dashboard_filters_parse_dates() {
        let cli = Cli::try_parse_from([
            "rdash",
            "dashboard",
            "--status",
            "active",
            "--date-from",
            "2024-01-01",
            "--page",
            "2",
        ])
        .expect("cli should parse");
        let Commands::Dashboard(args) = cli.command else {
            panic!("expected dashboard");
        };
        assert_eq!(args.status.as_deref(), Some("active"));
        assert_eq!(args.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.page.as_deref(), Some("2"));
    }

    #[test]
    fn bad_date_is_rejected() {
        let parsed = Cli::try_parse_from(["rdash", "dashboard", "--date-to", "15/06/2024"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn timeline_reorder_collects_items() {
        let cli = Cli::try_parse_from([
            "rdash",
            "timeline",
            "reorder",
            "--item",
            "phase:phs-1:2",
            "--item",
            "milestone:mst-9:1",
        ])
        .expect("cli should parse");
        let Commands::Timeline {
            action: TimelineCommands::Reorder { item },
        } = cli.command
        else {
            panic!("expected timeline reorder");
        };
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn milestone_refresh_takes_no_arguments() {
        let cli = Cli::try_parse_from(["rdash", "milestone", "refresh"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Milestone {
                action: MilestoneCommands::Refresh
            }
        ));
    }

    #[test]
    fn survey_filters_accept_repeated_counties() {
        let cli = Cli::try_parse_from([
            "rdash", "survey", "filters", "--county", "Kitui", "--county", "Nairobi",
        ])
        .expect("cli should parse");
        let Commands::Survey {
            action: SurveyCommands::Filters(selection),
        } = cli.command
        else {
            panic!("expected survey filters");
        };
        assert_eq!(selection.county, vec!["Kitui", "Nairobi"]);
    }
}
