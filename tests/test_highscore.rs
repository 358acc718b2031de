use astro_strike::error::GameError;
use astro_strike::highscore::*;

fn names(table: &HighScoreTable) -> Vec<&str> {
    table.entries().iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn entries_are_sorted_descending() {
    let mut table = HighScoreTable::new();
    table.insert("a", 50);
    table.insert("b", 200);
    table.insert("c", 10);
    let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![200, 50, 10]);
    assert_eq!(table.best(), 200);
}

#[test]
fn insert_reports_rank() {
    let mut table = HighScoreTable::new();
    assert_eq!(table.insert("a", 100), Some(0));
    assert_eq!(table.insert("b", 300), Some(0));
    assert_eq!(table.insert("c", 200), Some(1));
}

#[test]
fn table_keeps_only_top_ten() {
    let mut table = HighScoreTable::new();
    for i in 1..=10 {
        table.insert(&format!("p{i}"), i * 100);
    }
    let before = table.clone();

    assert_eq!(table.insert("late", 50), None);
    assert_eq!(table, before);

    assert_eq!(table.insert("strong", 550), Some(5));
    assert_eq!(table.entries().len(), MAX_ENTRIES);
    assert_eq!(table.entries().last().map(|e| e.score), Some(200));
}

#[test]
fn ties_keep_insertion_order() {
    let mut table = HighScoreTable::new();
    table.insert("first", 100);
    table.insert("second", 100);
    table.insert("third", 100);
    assert_eq!(names(&table), vec!["first", "second", "third"]);
}

#[test]
fn empty_table_has_zero_best() {
    assert_eq!(HighScoreTable::new().best(), 0);
}

// ── JSON file store ───────────────────────────────────────────────────────────

#[test]
fn json_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("scores.json"));

    let mut table = HighScoreTable::new();
    table.insert("ada", 900);
    table.insert("bob", 400);
    store.save(&table).unwrap();

    assert_eq!(store.load().unwrap(), table);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nope.json"));
    assert!(store.load().unwrap().entries().is_empty());
}

#[test]
fn unsorted_file_is_normalized_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(
        &path,
        r#"{"entries":[{"name":"low","score":5},{"name":"high","score":50}]}"#,
    )
    .unwrap();

    let table = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(names(&table), vec!["high", "low"]);
}

#[test]
fn corrupt_file_is_an_error_but_play_goes_on() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "not json at all").unwrap();
    let mut store = JsonFileStore::new(&path);

    assert!(matches!(store.load(), Err(GameError::Json(_))));
    assert!(load_or_empty(&store).entries().is_empty());

    // Submitting overwrites the corrupt file with a valid table
    let table = submit(&mut store, "ada", 120);
    assert_eq!(table.best(), 120);
    assert_eq!(store.load().unwrap().best(), 120);
}

#[test]
fn submit_persists_qualifying_scores() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("scores.json"));

    submit(&mut store, "ada", 300);
    let table = submit(&mut store, "bob", 700);

    assert_eq!(names(&table), vec!["bob", "ada"]);
    assert_eq!(store.load().unwrap(), table);
}

#[test]
fn memory_store_keeps_table() {
    let mut store = MemoryStore::default();
    assert!(store.load().unwrap().entries().is_empty());
    submit(&mut store, "ada", 42);
    assert_eq!(store.load().unwrap().best(), 42);
}

#[test]
fn quitting_mid_session_still_records_the_score() {
    let mut store = MemoryStore::default();
    let table = submit_unfinished(&mut store, "ada", 340).expect("score should be recorded");
    assert_eq!(table.best(), 340);
    assert_eq!(store.load().unwrap().best(), 340);
}

#[test]
fn quitting_without_points_leaves_the_table_alone() {
    let mut store = MemoryStore::default();
    assert!(submit_unfinished(&mut store, "ada", 0).is_none());
    assert!(store.load().unwrap().entries().is_empty());
}
