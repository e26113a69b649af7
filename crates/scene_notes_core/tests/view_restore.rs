use scene_notes_core::{
    capture_view, restore_view, CameraRef, FreeView, Note, NoteStore, ProjectionMode, Quaternion,
    RestoreWarning, SceneHost, SceneState, ViewSnapshot,
};

fn orbiting_scene() -> SceneState {
    let mut scene = SceneState::new();
    scene.frame = 120;
    scene.rotation = Quaternion::new(0.7071067811865476, 0.0, 0.0, 0.7071067811865475);
    scene.distance = 17.333333333333332;
    scene
}

#[test]
fn free_viewport_captures_rotation_and_distance() {
    let scene = orbiting_scene();
    let capture = capture_view(&scene);

    assert_eq!(capture.frame, 120);
    assert_eq!(
        capture.view,
        Some(ViewSnapshot::Free(FreeView {
            rotation: scene.rotation,
            distance: scene.distance,
        }))
    );
}

#[test]
fn camera_locked_viewport_captures_camera_name_or_unset() {
    let mut scene = SceneState::new();
    scene.add_camera("Camera");
    scene.set_scene_camera("Camera");
    scene.set_projection_mode(ProjectionMode::CameraLocked);
    assert_eq!(
        capture_view(&scene).view,
        Some(ViewSnapshot::Camera(CameraRef::named("Camera")))
    );

    scene.clear_scene_camera();
    assert_eq!(
        capture_view(&scene).view,
        Some(ViewSnapshot::Camera(CameraRef::unset()))
    );
}

#[test]
fn free_view_round_trip_is_exact() {
    let original = orbiting_scene();
    let mut store = NoteStore::new();
    store.append(capture_view(&original));

    let mut scene = SceneState::new();
    scene.add_camera("Camera");
    scene.set_scene_camera("Camera");
    scene.set_projection_mode(ProjectionMode::CameraLocked);

    let active = store.active().expect("store should have an active note");
    let report = restore_view(&mut scene, active);
    assert!(report.is_clean());
    assert_eq!(scene.projection_mode(), ProjectionMode::Free);
    assert_eq!(scene.view_rotation(), original.rotation);
    assert_eq!(scene.view_distance().to_bits(), original.distance.to_bits());
    assert_eq!(scene.current_frame(), 120);
}

#[test]
fn camera_snapshot_restores_camera_and_locks_view() {
    let mut scene = SceneState::new();
    scene.add_camera("Wide");
    scene.add_camera("Close");

    let mut note = Note::new();
    note.frame = 30;
    note.view = Some(ViewSnapshot::Camera(CameraRef::named("Close")));

    let report = restore_view(&mut scene, &note);
    assert!(report.is_clean());
    assert_eq!(scene.scene_camera(), Some("Close"));
    assert_eq!(scene.projection_mode(), ProjectionMode::CameraLocked);
    assert_eq!(scene.current_frame(), 30);
}

#[test]
fn missing_camera_warns_but_still_restores_frame() {
    let mut scene = SceneState::new();
    scene.add_camera("Renamed");

    let mut note = Note::new();
    note.frame = 64;
    note.view = Some(ViewSnapshot::Camera(CameraRef::named("Camera")));

    let report = restore_view(&mut scene, &note);
    assert_eq!(
        report.warnings,
        vec![RestoreWarning::CameraNotFound("Camera".to_string())]
    );
    assert_eq!(scene.current_frame(), 64);
    assert_eq!(scene.scene_camera(), None);
    assert_eq!(scene.projection_mode(), ProjectionMode::Free);
}

#[test]
fn unset_camera_reference_warns() {
    let mut scene = SceneState::new();
    let mut note = Note::new();
    note.view = Some(ViewSnapshot::Camera(CameraRef::unset()));

    let report = restore_view(&mut scene, &note);
    assert_eq!(report.warnings, vec![RestoreWarning::NoCameraRecorded]);
}

#[test]
fn note_without_snapshot_restores_frame_only() {
    let mut scene = orbiting_scene();
    let before = scene.clone();
    let mut note = Note::new();
    note.frame = 5;

    let report = restore_view(&mut scene, &note);
    assert!(report.is_clean());
    assert_eq!(scene.current_frame(), 5);
    assert_eq!(scene.rotation, before.rotation);
    assert_eq!(scene.distance, before.distance);
    assert_eq!(scene.mode, before.mode);
}
