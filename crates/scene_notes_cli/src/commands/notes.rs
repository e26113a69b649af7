//! Note sequence commands.

use crate::commands::Commands;
use crate::output;
use anyhow::{bail, Result};
use rusqlite::Connection;
use scene_notes_core::db::with_write_batch;
use scene_notes_core::{
    Direction, NotesConfig, NotesService, NoteStoreRepository, SceneRepository, SceneState,
    SqliteNoteStoreRepository, SqliteSceneRepository,
};

/// Runs one note command against the project document.
///
/// Store and scene writes share one write batch; a failed scene save also
/// undoes the cursor move that triggered it. The scene is saved only when
/// navigation restored a view into it.
pub fn run(conn: &mut Connection, config: &NotesConfig, command: Commands) -> Result<()> {
    with_write_batch(conn, |conn| -> Result<()> {
        let mut scene = SqliteSceneRepository::try_new(conn)?.load_scene()?;
        let scene_changed = {
            let repo = SqliteNoteStoreRepository::try_new(conn)?;
            let mut service = NotesService::load(repo)?;
            execute(&mut service, &mut scene, config, command)?
        };

        if scene_changed {
            SqliteSceneRepository::try_new(conn)?.save_scene(&scene)?;
        }
        Ok(())
    })
}

fn execute<R: NoteStoreRepository>(
    service: &mut NotesService<R>,
    scene: &mut SceneState,
    config: &NotesConfig,
    command: Commands,
) -> Result<bool> {
    match command {
        Commands::Add => {
            service.add_note(&*scene)?;
            println!("Added {}", output::label(service.store().active_index()));
        }
        Commands::Next => return navigate(service, scene, Direction::Next),
        Commands::Prev => return navigate(service, scene, Direction::Previous),
        Commands::Delete => {
            let index = service.store().active_index();
            match service.delete_active()? {
                Some(_) => println!("Deleted {}", output::label(index)),
                None => println!("No notes to delete."),
            }
        }
        Commands::Edit { text } => {
            service.edit_active_text(text)?;
            println!("Updated {}", output::label(service.store().active_index()));
        }
        Commands::Show => {
            print!(
                "{}",
                output::render_active(&config.display.panel_title, service.store())
            );
        }
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(service.store())?);
            } else {
                print!("{}", output::render_list(service.store()));
            }
        }
        Commands::Status => {
            if let Some(summary) = service.summary() {
                println!("{summary}");
            }
        }
        Commands::Scene(_) => bail!("scene commands are handled by the scene module"),
    }
    Ok(false)
}

fn navigate<R: NoteStoreRepository>(
    service: &mut NotesService<R>,
    scene: &mut SceneState,
    direction: Direction,
) -> Result<bool> {
    let outcome = service.navigate(scene, direction)?;
    for warning in &outcome.restore.warnings {
        eprintln!("warning: {warning}");
    }

    let store = service.store();
    if outcome.moved {
        println!("Now at {}", output::label(store.active_index()));
    } else if store.is_empty() {
        println!("No notes yet.");
    } else {
        let edge = match direction {
            Direction::Next => "last",
            Direction::Previous => "first",
        };
        println!(
            "Already at the {edge} note ({}).",
            output::label(store.active_index())
        );
    }
    Ok(outcome.moved)
}
