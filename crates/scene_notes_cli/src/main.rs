//! `scene-notes` command-line host.
//!
//! # Responsibility
//! - Wire `scene_notes_core` into a terminal front end over a simulated scene.
//! - Resolve configuration precedence: flags > environment > file > defaults.

use anyhow::{Context, Result};
use clap::Parser;
use scene_notes_core::{init_from_config, load_from_toml, NotesConfig};

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_from_config(&config.logging).context("failed to initialize logging")?;

    let mut conn = scene_notes_core::db::open_db(&config.storage.db_path).with_context(|| {
        format!(
            "failed to open project `{}`",
            config.storage.db_path.display()
        )
    })?;

    match cli.command {
        Commands::Scene(cmd) => commands::scene::run(&mut conn, cmd),
        command => commands::notes::run(&mut conn, &config, command),
    }
}

fn resolve_config(cli: &Cli) -> Result<NotesConfig> {
    let file_config = match cli.config.as_deref() {
        Some(path) => load_from_toml(path)?,
        None => NotesConfig::default(),
    };
    let mut config = file_config.with_process_env();
    if let Some(db) = cli.db.clone() {
        config.storage.db_path = db;
    }
    config.validate()?;
    Ok(config)
}
