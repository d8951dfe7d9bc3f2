//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod event;
pub mod group;
pub mod handlers;
pub mod init;
pub mod progress;
pub mod sso;
pub mod user;

pub use args::{
    AdminEventFilterArgs, ListArgs, LoginEventFilterArgs, OutputFormat, PaginationArgs, SortDir,
};
pub use context::CommandContext;
pub use sso::SsoArgs;

/// atlanop - companion CLI for the Atlan admin API
#[derive(Parser, Debug)]
#[command(name = "atlanop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ATLANOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ATLANOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Atlan tenant URL (e.g. https://acme.atlan.com)
    #[arg(long, global = true, env = "ATLAN_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Atlan API key
    #[arg(long, global = true, env = "ATLAN_API_KEY", hide = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ATLANOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize atlanop configuration
    Init,

    /// Display version information
    Version,

    /// List workspace groups
    #[command(subcommand)]
    Group(GroupCommands),

    /// List workspace users
    #[command(subcommand)]
    User(UserCommands),

    /// Browse login and admin events
    #[command(subcommand)]
    Event(EventCommands),

    /// Diagnose and clean up SSO group mappings
    #[command(subcommand)]
    Sso(SsoCommands),
}

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            atlanop group list                       # All groups, sorted by name\n  \
            atlanop group list -n 10                 # First 10\n  \
            atlanop group list --sort-dir desc       # Reverse order\n  \
            atlanop group list --format json"
    )]
    List(ListArgs),
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

/// Event subcommands
#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List login events
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            atlanop event list --type LOGIN_ERROR    # Failed logins\n  \
            atlanop event list --from 2024-01-01 -n 50"
    )]
    List {
        #[command(flatten)]
        filters: LoginEventFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// List admin events
    Admin {
        #[command(flatten)]
        filters: AdminEventFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// SSO subcommands
#[derive(Subcommand, Debug)]
pub enum SsoCommands {
    /// Report group mappings that point at groups which no longer exist
    ///
    /// Exits with status 1 when orphaned mappings are found.
    #[command(after_help = "EXAMPLES:\n  \
            atlanop sso diagnose --sso-alias okta\n  \
            atlanop sso diagnose --sso-alias azure --group-name Sales\n  \
            atlanop sso diagnose --sso-alias okta --format json")]
    Diagnose(SsoArgs),

    /// List every group mapping with its status
    #[command(visible_alias = "ls")]
    List(SsoArgs),

    /// Delete orphaned group mappings
    #[command(after_help = "EXAMPLES:\n  \
            atlanop sso cleanup --sso-alias okta                    # Confirm each deletion\n  \
            atlanop sso cleanup --sso-alias okta --non-interactive  # Confirm once, delete all")]
    Cleanup {
        #[command(flatten)]
        args: SsoArgs,

        /// Delete every orphaned mapping after a single typed confirmation
        #[arg(long)]
        non_interactive: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sso_cleanup() {
        let cli = Cli::try_parse_from([
            "atlanop",
            "sso",
            "cleanup",
            "--sso-alias",
            "okta",
            "--group-name",
            "Sales",
            "--non-interactive",
        ])
        .unwrap();

        match cli.command {
            Commands::Sso(SsoCommands::Cleanup {
                args,
                non_interactive,
            }) => {
                assert_eq!(args.sso_alias, "okta");
                assert_eq!(args.group_name.as_deref(), Some("Sales"));
                assert!(non_interactive);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sso_alias_is_required() {
        assert!(Cli::try_parse_from(["atlanop", "sso", "diagnose"]).is_err());
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli =
            Cli::try_parse_from(["atlanop", "group", "list", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
