//! Note sequence use-case service.
//!
//! # Responsibility
//! - Couple store mutation with view capture (add) and restore (navigate).
//! - Persist the store after every successful mutation.
//! - Emit metadata-only log events for each use-case.
//!
//! # Invariants
//! - No-op mutations (boundary navigation, empty delete) do not write.
//! - View restore happens only after the cursor actually moved.
//! - Note text never appears in log output.

use crate::model::note::Note;
use crate::model::store::{Direction, NoteStore, NoteStoreError};
use crate::repo::store_repo::NoteStoreRepository;
use crate::repo::RepoError;
use crate::view::{capture_view, restore_view, RestoreReport, SceneHost};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NotesServiceError {
    /// Operation needs an active note but the store is empty.
    Store(NoteStoreError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NotesServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotesServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteStoreError> for NotesServiceError {
    fn from(value: NoteStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for NotesServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOutcome {
    /// Whether the cursor moved; `false` at a boundary or on an empty store.
    pub moved: bool,
    /// Restore warnings for the newly active note.
    pub restore: RestoreReport,
}

/// Note service facade over a store repository.
pub struct NotesService<R: NoteStoreRepository> {
    repo: R,
    store: NoteStore,
}

impl<R: NoteStoreRepository> NotesService<R> {
    /// Loads the persisted store through `repo`.
    pub fn load(repo: R) -> Result<Self, NotesServiceError> {
        let store = repo.load_store()?;
        info!(
            "event=store_load module=service status=ok len={} active_index={}",
            store.len(),
            store.active_index()
        );
        Ok(Self { repo, store })
    }

    /// Read access for rendering.
    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Captures the host view and appends a new active note.
    pub fn add_note(&mut self, host: &impl SceneHost) -> Result<&Note, NotesServiceError> {
        let capture = capture_view(host);
        self.store.append(capture);
        self.persist("note_add")?;
        info!(
            "event=note_add module=service status=ok index={} len={}",
            self.store.active_index(),
            self.store.len()
        );
        self.store
            .active()
            .ok_or(NotesServiceError::Store(NoteStoreError::Empty))
    }

    /// Moves the cursor and restores the newly active note's view.
    pub fn navigate(
        &mut self,
        host: &mut impl SceneHost,
        direction: Direction,
    ) -> Result<NavigateOutcome, NotesServiceError> {
        if !self.store.advance(direction) {
            info!(
                "event=note_navigate module=service status=noop direction={direction:?} index={}",
                self.store.active_index()
            );
            return Ok(NavigateOutcome::default());
        }

        self.persist("note_navigate")?;
        let restore = match self.store.active() {
            Some(note) => restore_view(host, note),
            None => RestoreReport::default(),
        };
        info!(
            "event=note_navigate module=service status=ok direction={direction:?} index={} warnings={}",
            self.store.active_index(),
            restore.warnings.len()
        );
        Ok(NavigateOutcome {
            moved: true,
            restore,
        })
    }

    /// Deletes the active note; `Ok(None)` when the store is empty.
    pub fn delete_active(&mut self) -> Result<Option<Note>, NotesServiceError> {
        let Some(removed) = self.store.delete_active() else {
            info!("event=note_delete module=service status=noop len=0");
            return Ok(None);
        };

        self.persist("note_delete")?;
        info!(
            "event=note_delete module=service status=ok index={} len={}",
            self.store.active_index(),
            self.store.len()
        );
        Ok(Some(removed))
    }

    /// Replaces the active note's text.
    pub fn edit_active_text(&mut self, text: impl Into<String>) -> Result<(), NotesServiceError> {
        let text = text.into();
        let chars = text.chars().count();
        self.store.edit_active_text(text)?;
        self.persist("note_edit")?;
        info!(
            "event=note_edit module=service status=ok index={} chars={chars}",
            self.store.active_index()
        );
        Ok(())
    }

    /// Status-bar summary of the last note.
    pub fn summary(&self) -> Option<String> {
        self.store.summary()
    }

    fn persist(&mut self, event: &'static str) -> Result<(), NotesServiceError> {
        self.repo.save_store(&self.store).map_err(|err| {
            error!(
                "event={event} module=service status=error error_code=store_save_failed error={err}"
            );
            NotesServiceError::Repo(err)
        })
    }
}
