//! atlanop - companion CLI for the Atlan admin API

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use atlanop::cli::args::GlobalOptions;
use atlanop::cli::{self, Cli, Commands, EventCommands, GroupCommands, SsoCommands, UserCommands};
use atlanop::error::{Error, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    tokio::select! {
        result = run(cli) => match result {
            Ok(code) => code,
            Err(Error::Interrupted) => ExitCode::from(Error::Interrupted.exit_code()),
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::from(err.exit_code())
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            ExitCode::from(Error::Interrupted.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let opts = GlobalOptions::from_cli(&cli);
    debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await?,
        Commands::Version => println!("atlanop version {}", env!("CARGO_PKG_VERSION")),
        Commands::Group(GroupCommands::List(args)) => cli::group::list(&opts, &args).await?,
        Commands::User(UserCommands::List(args)) => cli::user::list(&opts, &args).await?,
        Commands::Event(event_cmd) => match event_cmd {
            EventCommands::List {
                filters,
                pagination,
            } => cli::event::list(&opts, &filters, &pagination).await?,
            EventCommands::Admin {
                filters,
                pagination,
            } => cli::event::admin(&opts, &filters, &pagination).await?,
        },
        Commands::Sso(sso_cmd) => match sso_cmd {
            SsoCommands::Diagnose(args) => return cli::sso::diagnose(&opts, &args).await,
            SsoCommands::List(args) => cli::sso::list(&opts, &args).await?,
            SsoCommands::Cleanup {
                args,
                non_interactive,
            } => cli::sso::cleanup(&opts, &args, non_interactive).await?,
        },
    }

    Ok(ExitCode::SUCCESS)
}
