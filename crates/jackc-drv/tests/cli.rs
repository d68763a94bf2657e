use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn compiles_a_single_file_and_exits_zero() {
    let dir = tempdir().unwrap();
    let jack_path = dir.path().join("Main.jack");
    fs::write(
        &jack_path,
        "class Main { function void main() { do Output.printString(\"hi\"); return; } }",
    )
    .unwrap();

    Command::cargo_bin("jackc")
        .unwrap()
        .arg(&jack_path)
        .assert()
        .success();

    let vm_text = fs::read_to_string(jack_path.with_extension("vm")).unwrap();
    assert!(vm_text.contains("function Main.main 0"));
    assert!(vm_text.contains("call Output.printString 1"));
}

#[test]
fn exits_non_zero_on_a_compile_error() {
    let dir = tempdir().unwrap();
    let jack_path = dir.path().join("Bad.jack");
    fs::write(&jack_path, "class Bad { does not parse }").unwrap();

    Command::cargo_bin("jackc")
        .unwrap()
        .arg(&jack_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn missing_path_argument_is_rejected() {
    Command::cargo_bin("jackc").unwrap().assert().failure();
}

#[test]
fn compiles_every_jack_file_in_a_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("A.jack"),
        "class A { function void f() { return; } }",
    )
    .unwrap();
    fs::write(
        dir.path().join("B.jack"),
        "class B { function void g() { return; } }",
    )
    .unwrap();

    Command::cargo_bin("jackc")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("A.vm").exists());
    assert!(dir.path().join("B.vm").exists());
}
