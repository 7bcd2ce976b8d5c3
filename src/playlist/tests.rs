use super::*;
use crate::library::{ImportEntry, MediaFilter, TrackId};

fn entries(names: &[&str]) -> Vec<ImportEntry> {
    names
        .iter()
        .map(|n| ImportEntry::from_path(format!("/music/{n}")))
        .collect()
}

#[test]
fn append_keeps_order_and_derives_display_names() {
    let mut store = PlaylistStore::default();
    let ids = store.append(entries(&["a.mp3", "b.wav"]));

    assert_eq!(ids.len(), 2);
    let names: Vec<&str> = store.list().iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(store.list()[0].id, ids[0]);
    assert!(store.list().iter().all(|t| t.duration.is_none()));
}

#[test]
fn append_silently_drops_unsupported_files() {
    let mut store = PlaylistStore::default();
    let ids = store.append(entries(&["readme.txt", "song.mp3"]));

    assert_eq!(ids.len(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].display_name, "song");
}

#[test]
fn append_does_not_deduplicate_by_default() {
    let mut store = PlaylistStore::default();
    store.append(entries(&["a.mp3"]));
    store.append(entries(&["a.mp3"]));
    assert_eq!(store.len(), 2);
    assert_ne!(store.list()[0].id, store.list()[1].id);
}

#[test]
fn skip_duplicates_ignores_known_paths() {
    let mut store = PlaylistStore::new(MediaFilter::default()).with_skip_duplicates(true);
    store.append(entries(&["a.mp3", "b.mp3"]));
    let ids = store.append(entries(&["a.mp3", "c.mp3"]));
    assert_eq!(ids.len(), 1);
    assert_eq!(store.len(), 3);
}

#[test]
fn ids_are_never_reused_after_remove() {
    let mut store = PlaylistStore::default();
    let first = store.append(entries(&["a.mp3"]))[0];
    assert!(store.remove(first).is_some());
    let second = store.append(entries(&["a.mp3"]))[0];
    assert_ne!(first, second);
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let mut store = PlaylistStore::default();
    store.append(entries(&["a.mp3"]));
    assert!(store.remove(TrackId(999)).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_hands_back_every_track() {
    let mut store = PlaylistStore::default();
    store.append(entries(&["a.mp3", "b.mp3", "c.mp3"]));
    let released = store.clear();
    assert_eq!(released.len(), 3);
    assert!(store.is_empty());
}

#[test]
fn neighbour_follows_insertion_order_without_wrapping() {
    let mut store = PlaylistStore::default();
    let ids = store.append(entries(&["a.mp3", "b.mp3", "c.mp3"]));

    assert_eq!(store.neighbour(ids[0], Direction::Next), Some(ids[1]));
    assert_eq!(store.neighbour(ids[1], Direction::Previous), Some(ids[0]));
    assert_eq!(store.neighbour(ids[2], Direction::Next), None);
    assert_eq!(store.neighbour(ids[0], Direction::Previous), None);
    assert_eq!(store.neighbour(TrackId(999), Direction::Next), None);

    store.remove(ids[1]);
    assert_eq!(store.neighbour(ids[0], Direction::Next), Some(ids[2]));
}
