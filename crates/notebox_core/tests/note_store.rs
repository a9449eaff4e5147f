use notebox_core::{Note, NoteStore, StoreError, DEFAULT_CATEGORY};

#[test]
fn add_to_unseen_category_creates_it_with_one_note() {
    let mut store = NoteStore::new();
    let note = store.add("Test Note", "This is a test note.", Some("Test Category"));

    assert_eq!(note.title, "Test Note");
    assert_eq!(note.content, "This is a test note.");
    assert_eq!(note.category, "Test Category");
    assert_eq!(store.get("Test Category"), &[note][..]);
}

#[test]
fn add_appends_in_insertion_order() {
    let mut store = NoteStore::new();
    store.add("first", "1", Some("Work"));
    store.add("second", "2", Some("Work"));
    store.add("third", "3", Some("Work"));

    let titles = store
        .get("Work")
        .iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn deleting_only_note_keeps_empty_category() {
    let mut store = NoteStore::new();
    store.add("Test Note", "This is a test note.", Some("Test Category"));

    let removed = store.delete("Test Category", 0).unwrap();
    assert_eq!(removed.title, "Test Note");
    assert!(store.contains_category("Test Category"));
    assert!(store.get("Test Category").is_empty());
}

#[test]
fn delete_shifts_following_notes() {
    let mut store = NoteStore::new();
    store.add("a", "", Some("Work"));
    store.add("b", "", Some("Work"));
    store.add("c", "", Some("Work"));

    store.delete("Work", 1);
    assert_eq!(store.get("Work")[1].title, "c");
    assert_eq!(store.note_count(), 2);
}

#[test]
fn update_changes_title_and_content_but_not_category() {
    let mut store = NoteStore::new();
    store.add("Test Note", "This is a test note.", Some("Test Category"));

    assert!(store.update("Test Category", 0, "Updated Note", "This is an updated note."));
    let note = &store.get("Test Category")[0];
    assert_eq!(note.title, "Updated Note");
    assert_eq!(note.content, "This is an updated note.");
    assert_eq!(note.category, "Test Category");
}

#[test]
fn update_at_invalid_index_changes_nothing() {
    let mut store = NoteStore::new();
    store.add("Test Note", "body", Some("Work"));
    let before = store.clone();

    assert!(!store.update("Work", 1, "x", "y"));
    assert!(!store.update("Home", 0, "x", "y"));
    assert_eq!(store, before);
}

#[test]
fn get_content_reads_by_position() {
    let mut store = NoteStore::new();
    store.add("Test Note", "This is a test note.", Some("Test Category"));

    assert_eq!(store.get_content("Test Category", 0), "This is a test note.");
    assert_eq!(store.get_content("Test Category", 1), "");
}

#[test]
fn move_note_relabels_and_keeps_source_category() {
    let mut store = NoteStore::new();
    store.add("Test Note", "body", Some("Test Category"));
    store.add("Another Note", "other", Some("Another Category"));

    let new_index = store
        .move_note("Test Category", 0, Some("Another Category"))
        .unwrap();
    assert_eq!(new_index, 1);
    assert!(store.get("Test Category").is_empty());
    assert!(store.contains_category("Test Category"));
    let moved = &store.get("Another Category")[1];
    assert_eq!(moved.title, "Test Note");
    assert_eq!(moved.category, "Another Category");

    assert_eq!(store.move_note("Test Category", 0, Some("Elsewhere")), None);
    assert!(!store.contains_category("Elsewhere"));
}

#[test]
fn move_note_without_target_uses_default_category() {
    let mut store = NoteStore::new();
    store.add("a", "", Some("Work"));
    store.move_note("Work", 0, None).unwrap();
    assert_eq!(store.get(DEFAULT_CATEGORY)[0].category, DEFAULT_CATEGORY);
}

#[test]
fn rename_category_keeps_position_and_relabels_notes() {
    let mut store = NoteStore::new();
    store.add("a", "", Some("First"));
    store.add("b", "", Some("Second"));
    store.add("c", "", Some("Second"));
    store.add("d", "", Some("Third"));

    store.rename_category("Second", "Middle").unwrap();

    let categories = store.categories().collect::<Vec<_>>();
    assert_eq!(categories, vec!["First", "Middle", "Third"]);
    assert!(store
        .get("Middle")
        .iter()
        .all(|note| note.category == "Middle"));
    assert!(store.get("Second").is_empty());
}

#[test]
fn rename_category_rejects_conflicts() {
    let mut store = NoteStore::new();
    store.add("a", "", Some("Work"));
    store.ensure_category("Home");

    assert!(matches!(
        store.rename_category("Work", "Home"),
        Err(StoreError::CategoryExists(name)) if name == "Home"
    ));
    assert!(matches!(
        store.rename_category("Missing", "New"),
        Err(StoreError::CategoryNotFound(_))
    ));
    assert!(matches!(
        store.rename_category("Work", ""),
        Err(StoreError::EmptyCategoryName)
    ));
    assert_eq!(store.get("Work").len(), 1);
}

#[test]
fn remove_category_drops_notes_and_preserves_other_order() {
    let mut store = NoteStore::new();
    store.add("a", "", Some("One"));
    store.add("b", "", Some("Two"));
    store.add("c", "", Some("Three"));

    let removed = store.remove_category("Two").unwrap();
    assert_eq!(removed, vec![Note::new("b", "", Some("Two"))]);
    assert_eq!(store.categories().collect::<Vec<_>>(), vec!["One", "Three"]);
    assert_eq!(store.remove_category("Two"), None);
}

#[test]
fn ensure_category_creates_empty_category_once() {
    let mut store = NoteStore::new();
    assert!(store.ensure_category("Ideas"));
    assert!(!store.ensure_category("Ideas"));
    assert_eq!(store.category_count(), 1);
    assert_eq!(store.note_count(), 0);
}

#[test]
fn set_title_keeps_content() {
    let mut store = NoteStore::new();
    store.add("Test Note", "This is a test note.", Some("Test Category"));
    assert!(store.set_title("Test Category", 0, "Edited Note"));
    let note = &store.get("Test Category")[0];
    assert_eq!(note.title, "Edited Note");
    assert_eq!(note.content, "This is a test note.");
}
