// session_flow.rs — End-to-end sessions against a real state file.
//
// Each test drives a GoalSession through a scripted terminal and a
// JsonFileStore in a temp directory, then inspects the JSON on disk.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use nc_goal::{
    FixedClock, Goal, GoalError, GoalSession, JsonFileStore, Reflection, State, StateStore,
    SuccessCriteria, TerminalPrompter, TrackerConfig,
};
use tempfile::TempDir;

struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn terminal(input: &str) -> (TerminalPrompter, Arc<Mutex<Vec<u8>>>) {
    let output = Arc::new(Mutex::new(Vec::new()));
    let prompter = TerminalPrompter::new(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(SharedWriter(output.clone())),
    );
    (prompter, output)
}

fn rendered(output: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(output.lock().unwrap().clone()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn run(store: &JsonFileStore, today: NaiveDate, input: &str) -> (Result<(), GoalError>, String) {
    let clock = FixedClock(today);
    let (mut prompter, output) = terminal(input);
    let result = GoalSession::new(store, &clock, &mut prompter)
        .run()
        .map(|_| ());
    (result, rendered(&output))
}

#[test]
fn first_session_records_new_goal() {
    let dir = TempDir::new().unwrap();
    let config = TrackerConfig::for_dir(dir.path());
    let store = config.store();

    let (result, out) = run(&store, date(2024, 1, 1), "Read\n30\n1\nq\n");
    result.unwrap();

    assert!(out.contains("Welcome to the N Commandments program."));
    assert!(out.contains("Please enter your goals for the month."));
    assert!(out.contains("Goals saved successfully."));

    let json = read_json(&config.state_file);
    let goals = json["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["name"], "Read");
    assert_eq!(goals[0]["starts_at"], "2024-01-01");
    assert_eq!(goals[0]["ends_at"], "2024-01-31");
    assert!(goals[0]["was_successful"].is_null());
    assert_eq!(json["goals_last_updated"], "2024-01-01");
}

#[test]
fn next_month_reflection_persists_success() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    store
        .save(&State {
            goals: vec![Goal::new(
                "Exercise",
                SuccessCriteria::new(30, 1),
                date(2024, 1, 1),
            )],
            goals_last_updated: Some(date(2024, 1, 1)),
        })
        .unwrap();

    let (result, out) = run(&store, date(2024, 2, 1), "y\nq\n");
    result.unwrap();

    assert!(out.contains("You have previously set goals."));
    assert!(out.contains("Goal: Exercise started on 2024-01-01."));

    let json = read_json(store.path());
    assert_eq!(json["goals"][0]["was_successful"], true);
    assert_eq!(json["goals_last_updated"], "2024-02-01");
}

#[test]
fn wrong_day_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonFileStore::new(&path);

    let (result, out) = run(&store, date(2024, 1, 2), "Read\n30\n1\nq\n");
    assert!(matches!(result, Err(GoalError::WrongDay { .. })));
    assert!(!path.exists());
    assert!(out.is_empty());
}

#[test]
fn same_day_rerun_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonFileStore::new(&path);

    run(&store, date(2024, 3, 1), "Walk\n31\n2\nq\n").0.unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let (result, _) = run(&store, date(2024, 3, 1), "Swim\n10\n0\nq\n");
    match result {
        Err(GoalError::AlreadyUpdated { next_eligible }) => {
            assert_eq!(next_eligible, date(2024, 3, 31));
        }
        other => panic!("expected AlreadyUpdated, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn corrupted_state_halts_with_exit_code_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "[[[ definitely not a state file").unwrap();
    let store = JsonFileStore::new(&path);

    let (result, out) = run(&store, date(2024, 5, 1), "q\n");
    let err = result.unwrap_err();
    assert!(matches!(err, GoalError::CorruptedState { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("Please delete the state file"));
    assert!(!out.contains("Welcome"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[[[ definitely not a state file"
    );
}

#[test]
fn goals_accumulate_across_months() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));

    run(&store, date(2024, 1, 1), "Read\n30\n1\nMeditate\n30\n3\nq\n")
        .0
        .unwrap();
    run(&store, date(2024, 2, 1), "y\nn\nJournal\n29\n0\nq\n")
        .0
        .unwrap();

    let state = store.load().unwrap();
    let names: Vec<&str> = state.goals.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Read", "Meditate", "Journal"]);
    assert_eq!(state.goals[0].was_successful, Reflection::Succeeded);
    assert_eq!(state.goals[1].was_successful, Reflection::Failed);
    assert_eq!(state.goals[2].was_successful, Reflection::Unreflected);
    assert_eq!(state.goals[2].ends_at, date(2024, 3, 2));
    assert_eq!(state.goals_last_updated, Some(date(2024, 2, 1)));
}

#[test]
fn input_ending_mid_session_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonFileStore::new(&path);

    // First day-1 load creates the empty file, then input runs out.
    let (result, _) = run(&store, date(2024, 7, 1), "Read\n30\n");
    assert!(matches!(result, Err(GoalError::InputClosed)));

    let json = read_json(&path);
    assert_eq!(json["goals"], serde_json::json!([]));
    assert!(json["goals_last_updated"].is_null());
}
