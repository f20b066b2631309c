//! End-to-end tests for the fable CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lighthouse() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../stories/lighthouse.json")
}

fn fable() -> Command {
    let mut cmd = Command::cargo_bin("fable").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// The winning route through the lighthouse story. No dice involved.
const WALKTHROUGH: &str = "greet fisherman\n\
                           a coin\n\
                           use rusty key\n\
                           go north\n\
                           say let there be light\n\
                           go north\n";

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_demo_story() {
    fable()
        .args(["check", lighthouse().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed for 'The Lighthouse'")
                .and(predicate::str::contains("4 rooms, 6 passages")),
        );
}

#[test]
fn check_reports_broken_references() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{
            "title": "Broken",
            "introduction": "",
            "initial_hero_stats": { "health": 1, "attack_power": 1, "defence": 1 },
            "rooms": [
                { "index": 0, "name": "VOID", "description": "",
                  "passages": [], "characters": [7], "enemies": [],
                  "containers": [], "is_final_room": false }
            ]
        }"#,
    )
    .unwrap();

    fable()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("character not found")
                .and(predicate::str::contains("1 broken reference")),
        );
}

#[test]
fn check_fails_on_missing_file() {
    fable()
        .args(["check", "/nonexistent/story.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn check_fails_on_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ \"title\": 3 }").unwrap();

    fable()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid story file"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_shows_introduction() {
    let dir = TempDir::new().unwrap();
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin("explore\n/quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The storm has passed.")
                .and(predicate::str::contains("[BEACH]"))
                .and(predicate::str::contains("(Type 'HELP' to view available commands)"))
                .and(predicate::str::contains("You look around the BEACH."))
                .and(predicate::str::contains("HP 60 | AP 4 | DEF 2")),
        );
    assert!(!dir.path().join("save.json").exists());
}

#[test]
fn play_walkthrough_reaches_the_end() {
    let dir = TempDir::new().unwrap();
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin(format!("{WALKTHROUGH}look south\n"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You get RUSTY KEY and add it to your inventory.")
                .and(predicate::str::contains("The padlock grinds open"))
                .and(predicate::str::contains("[LIGHTHOUSE YARD]"))
                .and(predicate::str::contains("The door shudders and swings inward."))
                .and(predicate::str::contains("[LAMP ROOM]"))
                .and(predicate::str::contains(
                    "[GAME OVER] You finished the story! Thanks for playing!",
                )),
        );
}

#[test]
fn play_handles_nonsense() {
    let dir = TempDir::new().unwrap();
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin("juggle\ngreet mermaid\ngo up\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You look confused.")
                .and(predicate::str::contains("There is no one here called 'MERMAID'."))
                .and(predicate::str::contains("UP is not a valid direction.")),
        );
}

#[test]
fn play_load_without_save() {
    let dir = TempDir::new().unwrap();
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(dir.path().join("save.json"))
        .write_stdin("/load\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("There is no saved game to load."));
}

#[test]
fn play_fails_on_missing_story() {
    fable()
        .args(["play", "/nonexistent/story.json"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

// ---------------------------------------------------------------------------
// save, load and replay
// ---------------------------------------------------------------------------

#[test]
fn save_then_replay() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("save.json");
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(&save)
        .write_stdin("greet fisherman\na coin\n/save\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved."));
    assert!(save.exists());

    fable()
        .args(["replay"])
        .arg(&save)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Lighthouse")
                .and(predicate::str::contains("> BEGIN"))
                .and(predicate::str::contains("> GREET FISHERMAN"))
                .and(predicate::str::contains("> A COIN"))
                .and(predicate::str::contains("3 turns | exploration | HP 60/60")),
        );
}

#[test]
fn load_resumes_saved_game() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("save.json");
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(&save)
        .write_stdin("greet fisherman\na coin\n/save\n")
        .assert()
        .success();

    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--no-autosave", "--save"])
        .arg(&save)
        .write_stdin("/load\nuse rusty key\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Game loaded.")
                .and(predicate::str::contains("The padlock grinds open")),
        );
}

#[test]
fn autosave_writes_the_save_file() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("save.json");
    // BEGIN plus nine turns reaches the default interval of ten
    fable()
        .args(["play", lighthouse().to_str().unwrap(), "--save"])
        .arg(&save)
        .write_stdin("explore\n".repeat(9))
        .assert()
        .success();
    assert!(save.exists());
}

#[test]
fn replay_missing_save() {
    fable()
        .args(["replay", "/nonexistent/save.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved game at"));
}
