//! Data contracts (DATA-001 through DATA-003)
//!
//! Inputs are all-or-nothing; outputs are uploaded even when a sibling output
//! is missing.

use std::fs;

use crate::common::*;
use replay::{ExecutionResult, ReplayError};
use replay::domain::ports::ContentStore;

/// CONTRACT DATA-001: Inputs arrive byte-exact before the script runs
#[test]
fn contract_inputs_are_available_to_the_script() {
    let env = TestEnv::new();
    env.store.insert("data1", "OK");
    env.store.insert("deeper/data2", "exists, too");
    let script = env
        .script("check_inputs")
        .with_input("file1", "data1")
        .with_input("sub/file2", "deeper/data2");
    env.runner.on("python", |_, run_env| {
        let dir = run_env.current_dir();
        let ok = fs::read(dir.join("file1"))? == b"OK"
            && fs::read(dir.join("sub/file2"))? == b"exists, too";
        Ok(ExecutionResult::new(if ok { 0 } else { 1 }, "", ""))
    });

    let report = env.run(&script).unwrap();

    assert!(report.execution.unwrap().success());
    assert_eq!(env.store.downloads(), vec!["data1", "deeper/data2"]);
}

/// CONTRACT DATA-002: One missing input means no input is copied
#[test]
fn contract_missing_input_copies_nothing() {
    let env = TestEnv::new();
    env.store.insert("data1", "OK");
    let script = env
        .script("check_inputs")
        .with_input("file1", "data1")
        .with_input("file2", "deeper/data2");

    let err = env.run(&script).unwrap_err();

    match err {
        ReplayError::MissingInput { path } => assert_eq!(path, "deeper/data2"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(env.store.copy_count(), 0);
}

/// CONTRACT DATA-003: A missing output does not hold back the others
#[test]
fn contract_missing_output_named_after_uploading_the_rest() {
    let env = TestEnv::new();
    let script = env
        .script("write_outputs")
        .with_output("a", "out/a")
        .with_output("b", "out/b");
    env.runner.on("python", |_, run_env| {
        fs::write(run_env.current_dir().join("a"), "alpha")?;
        Ok(ExecutionResult::ok())
    });

    let err = env.run(&script).unwrap_err();

    match err {
        ReplayError::MissingOutput { path } => assert_eq!(path, std::path::PathBuf::from("b")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(env.store.get("out/a"), Some(b"alpha".to_vec()));
    assert!(!env.store.exists("out/b"));
}
