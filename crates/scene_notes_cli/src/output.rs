//! Plain-text rendering for terminal output.

use scene_notes_core::{summarize, NoteStore, ProjectionMode, SceneState, ViewSnapshot};
use std::fmt::Write;

/// One-based `V{n}` label for a zero-based index.
pub fn label(index: usize) -> String {
    format!("V{}", index + 1)
}

pub fn describe_view(view: Option<&ViewSnapshot>) -> String {
    match view {
        Some(ViewSnapshot::Camera(camera)) => match camera.name.as_deref() {
            Some(name) => format!("camera `{name}`"),
            None => "camera (none)".to_string(),
        },
        Some(ViewSnapshot::Free(free)) => format!(
            "free rotation=({}, {}, {}, {}) distance={}",
            free.rotation.w, free.rotation.x, free.rotation.y, free.rotation.z, free.distance
        ),
        None => "none".to_string(),
    }
}

/// Detail view of the active note under a panel title header.
pub fn render_active(title: &str, store: &NoteStore) -> String {
    let mut out = format!("== {title} ==\n");
    let Some(note) = store.active() else {
        out.push_str("No notes yet. Run `scene-notes add` to create one.\n");
        return out;
    };

    let _ = writeln!(
        out,
        "{} of {}",
        label(store.active_index()),
        store.len()
    );
    let _ = writeln!(
        out,
        "created: {}",
        note.created_at.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(out, "frame: {}", note.frame);
    let _ = writeln!(out, "view: {}", describe_view(note.view.as_ref()));
    out.push_str("---\n");
    if !note.text.is_empty() {
        out.push_str(&note.text);
        out.push('\n');
    }
    out
}

/// One summarized line per note; `*` marks the active note.
pub fn render_list(store: &NoteStore) -> String {
    let mut out = String::new();
    for (index, note) in store.notes().iter().enumerate() {
        let marker = if index == store.active_index() { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {}  [frame {}]",
            summarize(index, &note.text),
            note.frame
        );
    }
    out
}

pub fn render_scene(scene: &SceneState) -> String {
    let mode = match scene.mode {
        ProjectionMode::CameraLocked => "camera",
        ProjectionMode::Free => "free",
    };
    let cameras = if scene.cameras.is_empty() {
        "(none)".to_string()
    } else {
        scene.cameras.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    let mut out = String::new();
    let _ = writeln!(out, "frame: {}", scene.frame);
    let _ = writeln!(out, "mode: {mode}");
    let _ = writeln!(
        out,
        "scene camera: {}",
        scene.scene_camera.as_deref().unwrap_or("(none)")
    );
    let _ = writeln!(
        out,
        "rotation: ({}, {}, {}, {})",
        scene.rotation.w, scene.rotation.x, scene.rotation.y, scene.rotation.z
    );
    let _ = writeln!(out, "distance: {}", scene.distance);
    let _ = writeln!(out, "cameras: {cameras}");
    out
}
