//! Core domain logic for SceneNotes.
//! This crate is the single source of truth for note sequence invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{load_from_toml, ConfigError, NotesConfig};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::note::{
    CameraRef, FreeView, Note, NoteId, NoteValidationError, Quaternion, ViewSnapshot,
};
pub use model::store::{summarize, Direction, NoteStore, NoteStoreError, ViewCapture};
pub use repo::scene_repo::{SceneRepository, SqliteSceneRepository};
pub use repo::store_repo::{NoteStoreRepository, SqliteNoteStoreRepository};
pub use repo::{RepoError, RepoResult};
pub use service::notes_service::{NavigateOutcome, NotesService, NotesServiceError};
pub use view::{
    capture_view, restore_view, ProjectionMode, RestoreReport, RestoreWarning, SceneHost,
    SceneState,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
