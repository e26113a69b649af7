//! Note domain model.
//!
//! # Responsibility
//! - Define the record stored for every entry in the note sequence.
//! - Model the optional view snapshot as a tagged variant.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation and never rewritten.
//! - Camera references are lookup keys resolved at restore time, never owners.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display format used for `Note::created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stable identifier for persisted notes.
pub type NoteId = Uuid;

/// Validation errors for note records.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteValidationError {
    /// Nil UUID is reserved and cannot identify a note.
    NilId,
    /// A rotation component is NaN or infinite.
    NonFiniteRotation(Quaternion),
    /// View distance is NaN or infinite.
    NonFiniteDistance(f64),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::NonFiniteRotation(q) => write!(
                f,
                "view rotation must be finite, got ({}, {}, {}, {})",
                q.w, q.x, q.y, q.z
            ),
            Self::NonFiniteDistance(value) => {
                write!(f, "view distance must be finite, got {value}")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Viewport orientation as a unit quaternion in `(w, x, y, z)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Weak reference to a camera object.
///
/// Stores only the camera name; the object may have been renamed or removed
/// by the time the reference is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRef {
    /// `None` when the scene had no active camera at capture time.
    pub name: Option<String>,
}

impl CameraRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn unset() -> Self {
        Self { name: None }
    }
}

/// Free-orbit orientation and zoom snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeView {
    pub rotation: Quaternion,
    pub distance: f64,
}

/// View context captured when a note is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewSnapshot {
    /// The viewport was looking through a scene camera.
    Camera(CameraRef),
    /// The viewport was orbiting freely.
    Free(FreeView),
}

/// One entry in the note sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Persistence identity; never displayed.
    pub id: NoteId,
    /// Free-form body, may contain newlines.
    pub text: String,
    /// Local wall-clock time at creation, formatted with `CREATED_AT_FORMAT`.
    pub created_at: Option<String>,
    /// Optional view context to restore when the note becomes active.
    pub view: Option<ViewSnapshot>,
    /// Timeline frame at creation.
    pub frame: i64,
}

impl Note {
    /// Creates an empty note with a generated id and no metadata.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty note with a caller-provided id.
    ///
    /// Used by load paths where identity already exists in storage.
    pub fn with_id(id: NoteId) -> Self {
        Self {
            id,
            text: String::new(),
            created_at: None,
            view: None,
            frame: 0,
        }
    }

    /// Checks record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if let Some(ViewSnapshot::Free(view)) = &self.view {
            if !view.rotation.is_finite() {
                return Err(NoteValidationError::NonFiniteRotation(view.rotation));
            }
            if !view.distance.is_finite() {
                return Err(NoteValidationError::NonFiniteDistance(view.distance));
            }
        }
        Ok(())
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the current local time for `Note::created_at`.
pub fn created_at_now() -> String {
    Local::now().format(CREATED_AT_FORMAT).to_string()
}
