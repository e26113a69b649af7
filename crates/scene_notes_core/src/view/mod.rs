//! View-context capture and restore at the scene-host boundary.
//!
//! # Responsibility
//! - Define the `SceneHost` contract for whatever owns the live viewport.
//! - Build a `ViewCapture` for new notes and apply a note's snapshot back.
//!
//! # Invariants
//! - The note store never touches the host; callers drive capture/restore.
//! - Camera references are resolved by name at restore time.
//! - A missing camera is a warning, never an error; the frame is always
//!   restored.
//! - Free views leave camera lock before rotation/distance are applied.

mod scene;

pub use scene::SceneState;

use crate::model::note::{CameraRef, FreeView, Note, Quaternion, ViewSnapshot};
use crate::model::store::ViewCapture;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Viewport projection state relevant to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// The viewport looks through the scene camera.
    CameraLocked,
    /// The viewport orbits freely.
    #[default]
    Free,
}

/// Live scene/viewport state consumed and updated by capture/restore.
pub trait SceneHost {
    fn current_frame(&self) -> i64;
    fn projection_mode(&self) -> ProjectionMode;
    /// Name of the active scene camera, if any.
    fn scene_camera(&self) -> Option<&str>;
    fn view_rotation(&self) -> Quaternion;
    fn view_distance(&self) -> f64;
    /// Returns whether a camera-like object with `name` exists right now.
    fn has_camera(&self, name: &str) -> bool;

    fn set_frame(&mut self, frame: i64);
    fn set_scene_camera(&mut self, name: &str);
    fn set_projection_mode(&mut self, mode: ProjectionMode);
    fn set_view_rotation(&mut self, rotation: Quaternion);
    fn set_view_distance(&mut self, distance: f64);
}

/// Non-fatal problem found while restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreWarning {
    /// The referenced camera no longer exists in the scene.
    CameraNotFound(String),
    /// The snapshot was captured while the scene had no camera.
    NoCameraRecorded,
}

impl Display for RestoreWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CameraNotFound(name) => write!(f, "camera `{name}` not found in scene"),
            Self::NoCameraRecorded => write!(f, "note was captured without a scene camera"),
        }
    }
}

/// Outcome of `restore_view`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub warnings: Vec<RestoreWarning>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Captures the frame and view context for a new note.
///
/// Camera-locked viewports capture a camera reference; free viewports
/// capture orientation and distance.
pub fn capture_view(host: &impl SceneHost) -> ViewCapture {
    let view = match host.projection_mode() {
        ProjectionMode::CameraLocked => ViewSnapshot::Camera(CameraRef {
            name: host.scene_camera().map(str::to_string),
        }),
        ProjectionMode::Free => ViewSnapshot::Free(FreeView {
            rotation: host.view_rotation(),
            distance: host.view_distance(),
        }),
    };

    ViewCapture {
        frame: host.current_frame(),
        view: Some(view),
    }
}

/// Applies `note`'s frame and view snapshot to the host.
pub fn restore_view(host: &mut impl SceneHost, note: &Note) -> RestoreReport {
    let mut report = RestoreReport::default();
    host.set_frame(note.frame);

    match &note.view {
        Some(ViewSnapshot::Camera(camera)) => match camera.name.as_deref() {
            Some(name) if host.has_camera(name) => {
                host.set_scene_camera(name);
                host.set_projection_mode(ProjectionMode::CameraLocked);
            }
            Some(name) => {
                warn!("event=view_restore module=view status=warn reason=camera_not_found");
                report
                    .warnings
                    .push(RestoreWarning::CameraNotFound(name.to_string()));
            }
            None => {
                warn!("event=view_restore module=view status=warn reason=no_camera_recorded");
                report.warnings.push(RestoreWarning::NoCameraRecorded);
            }
        },
        Some(ViewSnapshot::Free(view)) => {
            host.set_projection_mode(ProjectionMode::Free);
            host.set_view_rotation(view.rotation);
            host.set_view_distance(view.distance);
        }
        None => {}
    }

    report
}
