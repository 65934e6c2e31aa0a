//! aqbank CLI - HBCI user setup for AqBanking in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{add_user, config, get_sysid, logs, reset, setup, status, GlobalArgs, UserArgs};

/// aqb - manage AqBanking HBCI users through aqhbci-tool4
#[derive(Parser)]
#[command(name = "aqb", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete the aqhbci configuration directory and the PIN file
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Register a user with aqhbci-tool4 and set its HTTP version
    AddUser {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Fetch the system ID for a registered user
    GetSysid {
        #[command(flatten)]
        user: UserArgs,
        /// PIN (prompted for when not given)
        #[arg(long, env = "AQ_PIN", hide_env_values = true)]
        pin: Option<String>,
    },

    /// Add a user and fetch its system ID in one step
    Setup {
        #[command(flatten)]
        user: UserArgs,
        /// PIN (prompted for when not given)
        #[arg(long, env = "AQ_PIN", hide_env_values = true)]
        pin: Option<String>,
        /// Reset the configuration directory first
        #[arg(long)]
        reset: bool,
    },

    /// Show configuration paths and registered user files
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Reset { force } => reset::run(&global, force),
        Commands::AddUser { user } => add_user::run(&global, user),
        Commands::GetSysid { user, pin } => get_sysid::run(&global, user, pin),
        Commands::Setup { user, pin, reset } => setup::run(&global, user, pin, reset),
        Commands::Status { json } => status::run(&global, json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
