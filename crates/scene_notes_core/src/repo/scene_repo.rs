//! Scene repository for the simulated viewport.
//!
//! # Responsibility
//! - Persist `SceneState` alongside the note store in the project document.
//!
//! # Invariants
//! - `scene` holds exactly one row (`id = 1`).
//! - `scene_cameras` is replaced as a whole on save, under one savepoint.

use crate::model::note::Quaternion;
use crate::repo::{ensure_columns, RepoError, RepoResult};
use crate::view::{ProjectionMode, SceneState};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

/// Repository interface for the simulated scene.
pub trait SceneRepository {
    fn load_scene(&self) -> RepoResult<SceneState>;
    fn save_scene(&mut self, scene: &SceneState) -> RepoResult<()>;
}

/// SQLite-backed scene repository.
pub struct SqliteSceneRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSceneRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_columns(
            conn,
            "scene",
            &[
                "id",
                "frame",
                "mode",
                "scene_camera",
                "rot_w",
                "rot_x",
                "rot_y",
                "rot_z",
                "distance",
            ],
        )?;
        ensure_columns(conn, "scene_cameras", &["name"])?;
        Ok(Self { conn })
    }
}

impl SceneRepository for SqliteSceneRepository<'_> {
    fn load_scene(&self) -> RepoResult<SceneState> {
        let (frame, mode, scene_camera, rotation, distance) = self.conn.query_row(
            "SELECT frame, mode, scene_camera, rot_w, rot_x, rot_y, rot_z, distance
             FROM scene
             WHERE id = 1;",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>("frame")?,
                    row.get::<_, String>("mode")?,
                    row.get::<_, Option<String>>("scene_camera")?,
                    Quaternion::new(
                        row.get("rot_w")?,
                        row.get("rot_x")?,
                        row.get("rot_y")?,
                        row.get("rot_z")?,
                    ),
                    row.get::<_, f64>("distance")?,
                ))
            },
        )?;

        let mut scene = SceneState {
            frame,
            mode: parse_mode(&mode)?,
            scene_camera,
            rotation,
            distance,
            cameras: BTreeSet::new(),
        };

        let mut stmt = self
            .conn
            .prepare("SELECT name FROM scene_cameras ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            scene.cameras.insert(row.get("name")?);
        }

        Ok(scene)
    }

    fn save_scene(&mut self, scene: &SceneState) -> RepoResult<()> {
        let tx = self.conn.savepoint()?;

        tx.execute(
            "INSERT INTO scene (id, frame, mode, scene_camera, rot_w, rot_x, rot_y, rot_z, distance)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                frame = excluded.frame,
                mode = excluded.mode,
                scene_camera = excluded.scene_camera,
                rot_w = excluded.rot_w,
                rot_x = excluded.rot_x,
                rot_y = excluded.rot_y,
                rot_z = excluded.rot_z,
                distance = excluded.distance;",
            params![
                scene.frame,
                mode_to_db(scene.mode),
                scene.scene_camera.as_deref(),
                scene.rotation.w,
                scene.rotation.x,
                scene.rotation.y,
                scene.rotation.z,
                scene.distance,
            ],
        )?;

        tx.execute("DELETE FROM scene_cameras;", [])?;
        for name in &scene.cameras {
            tx.execute(
                "INSERT INTO scene_cameras (name) VALUES (?1);",
                [name.as_str()],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn mode_to_db(mode: ProjectionMode) -> &'static str {
    match mode {
        ProjectionMode::CameraLocked => "camera_locked",
        ProjectionMode::Free => "free",
    }
}

fn parse_mode(value: &str) -> RepoResult<ProjectionMode> {
    match value {
        "camera_locked" => Ok(ProjectionMode::CameraLocked),
        "free" => Ok(ProjectionMode::Free),
        other => Err(RepoError::InvalidData(format!(
            "invalid projection mode `{other}` in scene.mode"
        ))),
    }
}
