//! Simulated viewport commands.

use crate::commands::SceneCommand;
use crate::output;
use anyhow::{bail, Result};
use log::info;
use rusqlite::Connection;
use scene_notes_core::{
    ProjectionMode, Quaternion, SceneHost, SceneRepository, SceneState, SqliteSceneRepository,
};

pub fn run(conn: &mut Connection, command: SceneCommand) -> Result<()> {
    let mut repo = SqliteSceneRepository::try_new(conn)?;
    let mut scene = repo.load_scene()?;

    if let SceneCommand::Show = command {
        print!("{}", output::render_scene(&scene));
        return Ok(());
    }

    apply(&mut scene, command)?;
    repo.save_scene(&scene)?;
    info!(
        "event=scene_update module=cli status=ok frame={} mode={:?} cameras={}",
        scene.frame,
        scene.mode,
        scene.cameras.len()
    );
    print!("{}", output::render_scene(&scene));
    Ok(())
}

fn apply(scene: &mut SceneState, command: SceneCommand) -> Result<()> {
    match command {
        SceneCommand::Show => {}
        SceneCommand::Frame { frame } => scene.set_frame(frame),
        SceneCommand::Lock => scene.set_projection_mode(ProjectionMode::CameraLocked),
        SceneCommand::Unlock => scene.set_projection_mode(ProjectionMode::Free),
        SceneCommand::CameraAdd { name } => {
            if name.trim().is_empty() {
                bail!("camera name must not be blank");
            }
            if !scene.add_camera(name.clone()) {
                bail!("camera `{name}` already exists");
            }
        }
        SceneCommand::CameraRemove { name } => {
            if !scene.remove_camera(&name) {
                bail!("camera `{name}` does not exist");
            }
        }
        SceneCommand::CameraSet { name } => {
            if !scene.has_camera(&name) {
                bail!("camera `{name}` does not exist");
            }
            scene.set_scene_camera(&name);
        }
        SceneCommand::CameraClear => scene.clear_scene_camera(),
        SceneCommand::Orbit {
            w,
            x,
            y,
            z,
            distance,
        } => {
            let rotation = Quaternion::new(w, x, y, z);
            if !rotation.is_finite() || !distance.is_finite() {
                bail!("rotation and distance must be finite numbers");
            }
            scene.set_projection_mode(ProjectionMode::Free);
            scene.set_view_rotation(rotation);
            scene.set_view_distance(distance);
        }
    }
    Ok(())
}
