use scene_notes_core::{
    CameraRef, Direction, FreeView, NoteStore, NoteStoreError, Quaternion, ViewCapture,
    ViewSnapshot,
};

const CREATED_AT: &str = "2026-02-13 10:00:00";

fn filled(count: usize) -> NoteStore {
    let mut store = NoteStore::new();
    for frame in 0..count {
        store.append_at(
            ViewCapture {
                frame: frame as i64,
                view: None,
            },
            CREATED_AT,
        );
    }
    store
}

#[test]
fn append_always_activates_the_new_note() {
    let mut store = NoteStore::new();
    for expected_len in 1..=5 {
        store.append(ViewCapture::default());
        assert_eq!(store.len(), expected_len);
        assert_eq!(store.active_index(), expected_len - 1);
    }
}

#[test]
fn append_sets_defaults_and_caller_capture() {
    let mut store = NoteStore::new();
    let view = ViewSnapshot::Camera(CameraRef::named("Camera.001"));
    let note = store.append_at(
        ViewCapture {
            frame: 42,
            view: Some(view.clone()),
        },
        CREATED_AT,
    );

    assert!(note.text.is_empty());
    assert_eq!(note.created_at.as_deref(), Some(CREATED_AT));
    assert_eq!(note.frame, 42);
    assert_eq!(note.view, Some(view));
}

#[test]
fn append_stamps_wall_clock_time() {
    let mut store = NoteStore::new();
    let note = store.append(ViewCapture::default());
    let created_at = note.created_at.as_deref().expect("created_at should be set");
    assert!(
        chrono::NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S").is_ok(),
        "unexpected timestamp format: {created_at}"
    );
}

#[test]
fn next_then_previous_round_trips_from_interior() {
    for start in 1..4 {
        let mut store = filled(5);
        while store.active_index() > start {
            assert!(store.advance(Direction::Previous));
        }
        assert_eq!(store.active_index(), start);

        assert!(store.advance(Direction::Next));
        assert!(store.advance(Direction::Previous));
        assert_eq!(store.active_index(), start);

        assert!(store.advance(Direction::Previous));
        assert!(store.advance(Direction::Next));
        assert_eq!(store.active_index(), start);
    }
}

#[test]
fn advance_is_noop_at_boundaries() {
    let mut store = filled(3);
    assert_eq!(store.active_index(), 2);
    assert!(!store.advance(Direction::Next));
    assert_eq!(store.active_index(), 2);

    store.advance(Direction::Previous);
    store.advance(Direction::Previous);
    assert_eq!(store.active_index(), 0);
    assert!(!store.advance(Direction::Previous));
    assert_eq!(store.active_index(), 0);
}

#[test]
fn delete_active_keeps_cursor_in_range() {
    let mut store = filled(4);
    let mut remaining = store.len();
    while remaining > 0 {
        store.delete_active().expect("non-empty store should delete");
        remaining -= 1;
        assert_eq!(store.len(), remaining);
        if remaining > 0 {
            assert!(store.active_index() < remaining);
        } else {
            assert_eq!(store.active_index(), 0);
        }
    }
    assert!(store.delete_active().is_none());
}

#[test]
fn delete_last_clamps_and_delete_first_keeps_index() {
    let mut store = filled(3);
    let ids = store.notes().iter().map(|note| note.id).collect::<Vec<_>>();

    let removed = store.delete_active().expect("non-empty store should delete");
    assert_eq!(removed.id, ids[2]);
    assert_eq!(store.active_index(), 1);

    store.advance(Direction::Previous);
    let removed = store.delete_active().expect("non-empty store should delete");
    assert_eq!(removed.id, ids[0]);
    assert_eq!(store.active_index(), 0);
    assert_eq!(store.active().expect("store should have an active note").id, ids[1]);
}

#[test]
fn edit_active_text_touches_only_the_active_note() {
    let mut store = filled(3);
    store.advance(Direction::Previous);
    let before = store.notes().to_vec();

    store
        .edit_active_text("line one\nline two")
        .expect("edit should succeed");

    assert_eq!(store.active_index(), 1);
    assert_eq!(store.notes()[1].text, "line one\nline two");
    assert_eq!(store.notes()[1].id, before[1].id);
    assert_eq!(store.notes()[1].created_at, before[1].created_at);
    assert_eq!(store.notes()[0], before[0]);
    assert_eq!(store.notes()[2], before[2]);
}

#[test]
fn edit_on_empty_store_is_reported() {
    let mut store = NoteStore::new();
    assert_eq!(store.edit_active_text("x"), Err(NoteStoreError::Empty));
    assert!(store.is_empty());
}

#[test]
fn summary_of_empty_store_is_none() {
    assert_eq!(NoteStore::new().summary(), None);
}

#[test]
fn summary_of_empty_text_is_bare_label() {
    let store = filled(3);
    assert_eq!(store.summary().as_deref(), Some("V3"));
}

#[test]
fn summary_truncates_long_text_to_budget() {
    let mut store = filled(1);
    store.edit_active_text("a".repeat(100)).expect("edit should succeed");
    let expected = format!("V1 - {}...", "a".repeat(75));
    assert_eq!(store.summary(), Some(expected));
}

#[test]
fn summary_tracks_last_note_not_active_note() {
    let mut store = filled(2);
    store.edit_active_text("latest").expect("edit should succeed");
    store.advance(Direction::Previous);
    store.edit_active_text("older").expect("edit should succeed");

    assert_eq!(store.active_index(), 0);
    assert_eq!(store.summary().as_deref(), Some("V2 - latest"));
}

#[test]
fn store_serializes_view_snapshots_with_kind_tag() {
    let mut store = NoteStore::new();
    store.append_at(
        ViewCapture {
            frame: 7,
            view: Some(ViewSnapshot::Free(FreeView {
                rotation: Quaternion::new(0.5, 0.5, 0.5, 0.5),
                distance: 12.5,
            })),
        },
        CREATED_AT,
    );
    store.append_at(
        ViewCapture {
            frame: 8,
            view: Some(ViewSnapshot::Camera(CameraRef::unset())),
        },
        CREATED_AT,
    );

    let json = serde_json::to_value(&store).expect("store should serialize");
    assert_eq!(json["active_index"], 1);
    assert_eq!(json["notes"][0]["view"]["kind"], "free");
    assert_eq!(json["notes"][0]["view"]["distance"], 12.5);
    assert_eq!(json["notes"][1]["view"]["kind"], "camera");
    assert!(json["notes"][1]["view"]["name"].is_null());
}
