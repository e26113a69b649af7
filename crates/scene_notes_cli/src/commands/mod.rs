//! Argument model for the `scene-notes` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod notes;
pub mod scene;

#[derive(Debug, Parser)]
#[command(
    name = "scene-notes",
    version,
    about = "Ordered project notes with captured viewport snapshots"
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "SCENE_NOTES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project database; overrides config and environment.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Capture the current view and append a new note.
    Add,
    /// Move to the next note and restore its view.
    Next,
    /// Move to the previous note and restore its view.
    Prev,
    /// Delete the active note.
    Delete,
    /// Replace the text of the active note.
    Edit {
        /// New note text; quote it to keep newlines.
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Show the active note.
    Show,
    /// List all notes.
    List {
        /// Emit the store as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the status-bar summary of the latest note.
    Status,
    /// Inspect or drive the simulated viewport.
    #[command(subcommand)]
    Scene(SceneCommand),
}

#[derive(Debug, Subcommand)]
pub enum SceneCommand {
    /// Print the viewport state and camera objects.
    Show,
    /// Set the timeline frame.
    #[command(allow_negative_numbers = true)]
    Frame { frame: i64 },
    /// Look through the scene camera.
    Lock,
    /// Switch to free orbit.
    Unlock,
    /// Create a camera object.
    CameraAdd { name: String },
    /// Delete a camera object.
    CameraRemove { name: String },
    /// Make an existing camera the scene camera.
    CameraSet { name: String },
    /// Clear the scene camera slot.
    CameraClear,
    /// Set free-orbit rotation `(w, x, y, z)` and distance.
    #[command(allow_negative_numbers = true)]
    Orbit {
        w: f64,
        x: f64,
        y: f64,
        z: f64,
        distance: f64,
    },
}
