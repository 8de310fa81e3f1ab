//! grubwiz CLI - safe editor for the GRUB defaults file
//!
//! Usage: grubwiz <COMMAND>
//!
//! Commands:
//!   show, get, set, unset          Inspect and edit variables
//!   check                          Validate the file
//!   backup create|list|delete|restore
//!   hide, unhide, suppress, unsuppress, reset

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use grubwiz::presentation::{Cli, Commands};

use commands::App;

fn main() {
    let cli = Cli::parse();
    grubwiz::logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        if cli.json {
            let _ = ui::json::emit(serde_json::json!({
                "event": "error",
                "message": err.to_string(),
            }));
        }
        eprint!("{}", ui::error::format_error(&err));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let app = App::from_cli(cli)?;

    match &cli.command {
        Commands::Show { all } => commands::show::cmd_show(&app, *all),
        Commands::Get { key } => commands::edit::cmd_get(&app, key),
        Commands::Set { key, value, commit } => commands::edit::cmd_set(&app, key, value, commit),
        Commands::Unset { key, commit } => commands::edit::cmd_unset(&app, key, commit),
        Commands::Check { all } => commands::check::cmd_check(&app, *all),
        Commands::Backup { action } => commands::backup::cmd_backup(&app, action),
        Commands::Hide { key } => commands::suppress::cmd_hide(&app, key),
        Commands::Unhide { key } => commands::suppress::cmd_unhide(&app, key),
        Commands::Suppress { id } => commands::suppress::cmd_suppress(&app, id),
        Commands::Unsuppress { id } => commands::suppress::cmd_unsuppress(&app, id),
        Commands::Reset => commands::suppress::cmd_reset(&app),
    }
}
