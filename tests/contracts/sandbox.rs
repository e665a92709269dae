//! Sandbox contracts (SANDBOX-001 through SANDBOX-003)
//!
//! A dependency set is installed once and reused by every later run,
//! whatever order the dependencies are declared in.

use crate::common::*;
use replay::{CacheKey, ExecutionResult, ReplayError};

/// CONTRACT SANDBOX-001: Second run with the same set installs nothing
#[test]
fn contract_same_dependency_set_is_installed_once() {
    let env = TestEnv::new();
    let first = env
        .script("roman_numerals")
        .with_dependency("roman==2.0.0")
        .with_dependency("attrs");
    let second = env
        .script("roman_again")
        .with_dependency("attrs")
        .with_dependency("roman==2.0.0");

    let built = env.run(&first).unwrap().sandbox.unwrap();
    let reused = env.run(&second).unwrap().sandbox.unwrap();

    assert!(!built.reused);
    assert!(reused.reused);
    assert_eq!(built.dir, reused.dir);
    assert_eq!(env.runner.count("virtualenv"), 1);
    assert_eq!(env.runner.count("pip"), 2);
}

/// CONTRACT SANDBOX-002: The script sees the sandbox first on its PATH
#[test]
fn contract_script_runs_with_sandbox_on_path() {
    let env = TestEnv::new();
    let script = env.script("uses_roman").with_dependency("roman==2.0.0");
    let key = CacheKey::from_specifiers(&["roman==2.0.0"]);
    let expected_bin = env.path("venvs").join(key.sandbox_dir_name()).join("bin");

    env.run(&script).unwrap();

    let python = env
        .runner
        .invocations()
        .into_iter()
        .find(|i| i.command.program() == "python")
        .unwrap();
    let path: Vec<_> = std::env::split_paths(python.env.get("PATH").unwrap()).collect();
    assert_eq!(path, vec![expected_bin, std::path::PathBuf::from("/usr/bin")]);
    assert!(env.path("venvs").join(key.sandbox_dir_name()).exists());
}

/// CONTRACT SANDBOX-003: A failed install stops the run before the script
#[test]
fn contract_failed_install_is_reported_and_script_skipped() {
    let mut env = TestEnv::new();
    env.runner
        .respond("pip", ExecutionResult::new(1, "", "No matching distribution"));
    env.settings.sandbox.index_url = Some("file:///srv/pypi/simple".to_string());
    let script = env.script("broken_deps").with_dependency("roman==99");

    let err = env.run(&script).unwrap_err();

    match err {
        ReplayError::DependencyInstall { specifier, result } => {
            assert_eq!(specifier, "roman==99");
            assert_eq!(result.stderr, "No matching distribution");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(env
        .runner
        .commands()
        .contains(&"pip install --index-url=file:///srv/pypi/simple roman==99".to_string()));
    assert_eq!(env.runner.count("python"), 0);
}
