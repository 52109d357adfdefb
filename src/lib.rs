//! hotelmaint library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (workbook backend, tables, domain logic, services).

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod services;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use context::AppContext;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Order { .. } => cli::commands::order::handle(&cli.command, cfg),
        Commands::Preventive { .. } => cli::commands::preventive::handle(&cli.command, cfg),
        Commands::Sweep { .. } => cli::commands::sweep::handle(&cli.command, cfg),
        Commands::Suggest { .. } => cli::commands::suggest::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Diagnose { .. } => cli::commands::diagnose::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1. parse CLI
    let cli = Cli::parse();

    // 2. load the config once; test mode never reads the user's file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load_from(&Config::config_file())?
    };

    // 3. apply the workbook override from the command line
    if let Some(custom) = &cli.workbook {
        cfg.workbook = custom.clone();
    }

    dispatch(&cli, &cfg)
}
