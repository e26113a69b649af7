//! Note store repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and save the whole note sequence plus its cursor.
//! - Map `ViewSnapshot` variants onto nullable columns.
//!
//! # Invariants
//! - `notes.position` mirrors sequence order, `0..len` with no gaps.
//! - `save_store` replaces every row under one savepoint, so it commits on its
//!   own or together with an enclosing write batch.
//! - A `free` row must carry all four rotation components and a distance.

use crate::model::note::{CameraRef, FreeView, Note, Quaternion, ViewSnapshot};
use crate::model::store::NoteStore;
use crate::repo::{ensure_columns, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const VIEW_KIND_CAMERA: &str = "camera";
const VIEW_KIND_FREE: &str = "free";

const NOTE_COLUMNS: &[&str] = &[
    "uuid",
    "position",
    "text",
    "created_at",
    "frame",
    "view_kind",
    "camera_name",
    "rot_w",
    "rot_x",
    "rot_y",
    "rot_z",
    "distance",
];

/// Repository interface for the project's note store.
pub trait NoteStoreRepository {
    /// Loads the full sequence in order with its cursor.
    fn load_store(&self) -> RepoResult<NoteStore>;
    /// Persists the full sequence and cursor, replacing prior state.
    fn save_store(&mut self, store: &NoteStore) -> RepoResult<()>;
}

/// SQLite-backed note store repository.
pub struct SqliteNoteStoreRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteStoreRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_columns(conn, "notes", NOTE_COLUMNS)?;
        ensure_columns(conn, "store_state", &["id", "active_index"])?;
        Ok(Self { conn })
    }
}

impl NoteStoreRepository for SqliteNoteStoreRepository<'_> {
    fn load_store(&self) -> RepoResult<NoteStore> {
        let mut stmt = self.conn.prepare(
            "SELECT
                uuid,
                text,
                created_at,
                frame,
                view_kind,
                camera_name,
                rot_w,
                rot_x,
                rot_y,
                rot_z,
                distance
             FROM notes
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        let active_index: i64 = self.conn.query_row(
            "SELECT active_index FROM store_state WHERE id = 1;",
            [],
            |row| row.get(0),
        )?;
        let active_index = usize::try_from(active_index).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid active_index `{active_index}` in store_state.active_index"
            ))
        })?;

        Ok(NoteStore::from_parts(notes, active_index))
    }

    fn save_store(&mut self, store: &NoteStore) -> RepoResult<()> {
        for note in store.notes() {
            note.validate()?;
        }

        let tx = self.conn.savepoint()?;
        tx.execute("DELETE FROM notes;", [])?;

        for (position, note) in store.notes().iter().enumerate() {
            let columns = ViewColumns::from_snapshot(note.view.as_ref());
            tx.execute(
                "INSERT INTO notes (
                    uuid,
                    position,
                    text,
                    created_at,
                    frame,
                    view_kind,
                    camera_name,
                    rot_w,
                    rot_x,
                    rot_y,
                    rot_z,
                    distance
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
                params![
                    note.id.to_string(),
                    to_db_index(position)?,
                    note.text.as_str(),
                    note.created_at.as_deref(),
                    note.frame,
                    columns.kind,
                    columns.camera_name,
                    columns.rotation.map(|q| q.w),
                    columns.rotation.map(|q| q.x),
                    columns.rotation.map(|q| q.y),
                    columns.rotation.map(|q| q.z),
                    columns.distance,
                ],
            )?;
        }

        tx.execute(
            "INSERT INTO store_state (id, active_index) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET active_index = excluded.active_index;",
            [to_db_index(store.active_index())?],
        )?;

        tx.commit()?;
        Ok(())
    }
}

struct ViewColumns<'a> {
    kind: Option<&'static str>,
    camera_name: Option<&'a str>,
    rotation: Option<Quaternion>,
    distance: Option<f64>,
}

impl<'a> ViewColumns<'a> {
    fn from_snapshot(view: Option<&'a ViewSnapshot>) -> Self {
        match view {
            Some(ViewSnapshot::Camera(camera)) => Self {
                kind: Some(VIEW_KIND_CAMERA),
                camera_name: camera.name.as_deref(),
                rotation: None,
                distance: None,
            },
            Some(ViewSnapshot::Free(free)) => Self {
                kind: Some(VIEW_KIND_FREE),
                camera_name: None,
                rotation: Some(free.rotation),
                distance: Some(free.distance),
            },
            None => Self {
                kind: None,
                camera_name: None,
                rotation: None,
                distance: None,
            },
        }
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    let view = match row.get::<_, Option<String>>("view_kind")?.as_deref() {
        None => None,
        Some(VIEW_KIND_CAMERA) => Some(ViewSnapshot::Camera(CameraRef {
            name: row.get("camera_name")?,
        })),
        Some(VIEW_KIND_FREE) => Some(ViewSnapshot::Free(parse_free_view(row, &uuid_text)?)),
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid view kind `{other}` in notes.view_kind"
            )));
        }
    };

    let mut note = Note::with_id(id);
    note.text = row.get("text")?;
    note.created_at = row.get("created_at")?;
    note.frame = row.get("frame")?;
    note.view = view;
    note.validate()?;
    Ok(note)
}

fn parse_free_view(row: &Row<'_>, uuid_text: &str) -> RepoResult<FreeView> {
    let values: [Option<f64>; 5] = [
        row.get("rot_w")?,
        row.get("rot_x")?,
        row.get("rot_y")?,
        row.get("rot_z")?,
        row.get("distance")?,
    ];
    match values {
        [Some(w), Some(x), Some(y), Some(z), Some(distance)] => Ok(FreeView {
            rotation: Quaternion::new(w, x, y, z),
            distance,
        }),
        _ => Err(RepoError::InvalidData(format!(
            "free view for note `{uuid_text}` is missing rotation or distance"
        ))),
    }
}

fn to_db_index(value: usize) -> RepoResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("index `{value}` exceeds storage range")))
}
