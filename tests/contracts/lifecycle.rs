//! Lifecycle contracts (LIFE-001 through LIFE-004)
//!
//! Capabilities are acquired in a fixed order and released in exactly the
//! reverse order, on success and on every kind of failure.

use std::fs;

use crate::common::*;
use replay::domain::ports::RunEvent;
use replay::{CapabilityKind, ExecutionResult, ReplayError};

use CapabilityKind::*;

/// Acquire/release steps from the event stream, as `(released, kind)`
fn steps(events: &[RunEvent]) -> Vec<(bool, CapabilityKind)> {
    events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Acquired { capability } => Some((false, *capability)),
            RunEvent::Released { capability } | RunEvent::ReleaseFailed { capability, .. } => {
                Some((true, *capability))
            }
            _ => None,
        })
        .collect()
}

/// CONTRACT LIFE-001: Release order mirrors acquire order
#[test]
fn contract_successful_run_releases_in_reverse() {
    let env = TestEnv::new();
    let script = env.script("noop");

    env.run(&script).unwrap();

    assert_eq!(
        steps(&env.events.events()),
        vec![
            (false, WorkingDirectory),
            (false, DependencySandbox),
            (false, InputOutputSync),
            (false, ScratchDatabase),
            (false, ScriptExecution),
            (true, ScriptExecution),
            (true, ScratchDatabase),
            (true, InputOutputSync),
            (true, DependencySandbox),
            (true, WorkingDirectory),
        ]
    );
    let events = env.events.events();
    assert_eq!(
        events.first(),
        Some(&RunEvent::Started {
            script: "noop".to_string()
        })
    );
    assert_eq!(events.last(), Some(&RunEvent::Finished { success: true }));
}

/// CONTRACT LIFE-002: A failed acquire releases only what came before it
///
/// Prevents: a missing input leaving the working copy behind, or the
/// script running without its inputs.
#[test]
fn contract_failed_acquire_rolls_back_prefix() {
    let env = TestEnv::new().in_place();
    let script = env.script("check_inputs").with_input("file1", "data1");

    let err = env.run(&script).unwrap_err();

    assert!(matches!(err, ReplayError::MissingInput { .. }));
    assert_eq!(
        steps(&env.events.events()),
        vec![
            (false, WorkingDirectory),
            (false, DependencySandbox),
            (true, DependencySandbox),
            (true, WorkingDirectory),
        ]
    );
    assert!(env.events.events().iter().any(|e| matches!(
        e,
        RunEvent::AcquireFailed {
            capability: InputOutputSync,
            ..
        }
    )));
    assert_eq!(env.runner.count("python"), 0);
    assert!(!env.path("work").exists());
    assert_eq!(
        env.events.events().last(),
        Some(&RunEvent::Finished { success: false })
    );
}

/// CONTRACT LIFE-003: The script runs inside its own working copy
#[test]
fn contract_script_runs_in_working_copy_which_is_removed() {
    let env = TestEnv::new().in_place();
    let script = env.script("where_am_i");
    let work = env.path("work");
    let expected = work.clone();
    env.runner.on("python", move |_, run_env| {
        let inside = run_env.current_dir() == expected && expected.join("main.py").exists();
        Ok(ExecutionResult::new(if inside { 0 } else { 1 }, "", ""))
    });

    let report = env.run(&script).unwrap();

    assert_eq!(report.working_dir.as_deref(), Some(work.as_path()));
    assert_eq!(report.execution.map(|r| r.status), Some(0));
    assert!(!work.exists());
    // the source tree is untouched
    assert!(env.path("scripts/where_am_i/main.py").exists());
}

/// CONTRACT LIFE-004: Script failure still tears everything down
#[test]
fn contract_script_failure_still_uploads_and_cleans_up() {
    let env = TestEnv::new().in_place();
    let script = env.script("half_done").with_output("partial.csv", "out/partial.csv");
    env.runner.on("python", |_, run_env| {
        fs::write(run_env.current_dir().join("partial.csv"), "a,b\n")?;
        Ok(ExecutionResult::new(1, "", "ZeroDivisionError\n"))
    });

    let err = env.run(&script).unwrap_err();

    match err {
        ReplayError::ScriptFailure { result } => {
            assert_eq!(result.status, 1);
            assert_eq!(result.stderr, "ZeroDivisionError\n");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(env.store.get("out/partial.csv"), Some(b"a,b\n".to_vec()));
    assert!(!env.path("work").exists());
}
