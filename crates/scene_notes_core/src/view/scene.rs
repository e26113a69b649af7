//! In-memory scene host.
//!
//! Backs the command-line adapter and tests; a real 3D host implements
//! `SceneHost` over its own objects instead.

use super::{ProjectionMode, SceneHost};
use crate::model::note::Quaternion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DEFAULT_VIEW_DISTANCE: f64 = 10.0;

/// Snapshot of a simulated viewport and its camera objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub frame: i64,
    pub mode: ProjectionMode,
    pub scene_camera: Option<String>,
    pub rotation: Quaternion,
    pub distance: f64,
    pub cameras: BTreeSet<String>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            frame: 0,
            mode: ProjectionMode::Free,
            scene_camera: None,
            rotation: Quaternion::IDENTITY,
            distance: DEFAULT_VIEW_DISTANCE,
            cameras: BTreeSet::new(),
        }
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a camera object. Returns `false` if the name is taken.
    pub fn add_camera(&mut self, name: impl Into<String>) -> bool {
        self.cameras.insert(name.into())
    }

    /// Removes a camera object.
    ///
    /// The scene camera slot keeps the stale name, mirroring hosts where a
    /// deleted object can linger as the active camera reference.
    pub fn remove_camera(&mut self, name: &str) -> bool {
        self.cameras.remove(name)
    }

    pub fn clear_scene_camera(&mut self) {
        self.scene_camera = None;
    }
}

impl SceneHost for SceneState {
    fn current_frame(&self) -> i64 {
        self.frame
    }

    fn projection_mode(&self) -> ProjectionMode {
        self.mode
    }

    fn scene_camera(&self) -> Option<&str> {
        self.scene_camera.as_deref()
    }

    fn view_rotation(&self) -> Quaternion {
        self.rotation
    }

    fn view_distance(&self) -> f64 {
        self.distance
    }

    fn has_camera(&self, name: &str) -> bool {
        self.cameras.contains(name)
    }

    fn set_frame(&mut self, frame: i64) {
        self.frame = frame;
    }

    fn set_scene_camera(&mut self, name: &str) {
        self.scene_camera = Some(name.to_string());
    }

    fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.mode = mode;
    }

    fn set_view_rotation(&mut self, rotation: Quaternion) {
        self.rotation = rotation;
    }

    fn set_view_distance(&mut self, distance: f64) {
        self.distance = distance;
    }
}
