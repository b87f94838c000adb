use assert_cmd::Command;
use guess_core::AppInfo;
use predicates::prelude::*;

fn mdguess() -> Command {
    Command::cargo_bin("mdguess").expect("binary built")
}

#[test]
fn version_flag_reports_the_app_metadata() {
    mdguess()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(AppInfo::name()))
        .stdout(predicate::str::contains(AppInfo::version()));
}

#[test]
fn rejects_out_of_range_threshold() {
    mdguess()
        .args(["--guess-threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("guess-threshold"));
}

#[test]
fn full_session_of_unknown_answers_saves_knowledge() {
    let dir = tempfile::tempdir().expect("temp dir");
    let knowledge = dir.path().join("knowledge.json");

    // Eight "don't know" answers exhaust the starter questions, then the
    // parting guess is declined, teaching is cancelled with an empty name,
    // and the replay prompt is declined.
    let script = format!("{}no\n\nno\n", "3\n".repeat(8));

    mdguess()
        .arg("--knowledge")
        .arg(&knowledge)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Could it be"))
        .stdout(predicate::str::contains("Teaching cancelled."))
        .stdout(predicate::str::contains("Knowledge saved"));

    let saved = std::fs::read_to_string(&knowledge).expect("knowledge file written");
    assert!(saved.contains("\"questions\""));
    assert!(saved.contains("Dog"));
}

#[test]
fn seeded_knowledge_file_is_reused_on_the_next_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let knowledge = dir.path().join("knowledge.json");

    // First run only seeds the file; eight "don't know" answers and an
    // aborted teach phase keep the defaults intact.
    let script = format!("{}no\n\nno\n", "3\n".repeat(8));
    mdguess()
        .arg("--knowledge")
        .arg(&knowledge)
        .write_stdin(script.clone())
        .assert()
        .success();

    let before = std::fs::read_to_string(&knowledge).expect("seeded");

    mdguess()
        .arg("--knowledge")
        .arg(&knowledge)
        .write_stdin(script)
        .assert()
        .success();

    let after = std::fs::read_to_string(&knowledge).expect("still present");
    assert_eq!(before, after, "an all-unknown session must not change anything");
}
