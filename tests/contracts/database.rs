//! Scratch database contracts (DB-001 through DB-002)

use crate::common::*;
use replay::options;

/// CONTRACT DB-001: The script sees its scratch database; teardown sees the old one
///
/// Prevents: `dropdb` running while PGDATABASE still names the scratch
/// database, or a later command inheriting it.
#[test]
fn contract_database_variable_is_scoped_to_the_run() {
    let env = TestEnv::new();
    let script = env.script("load_sales").with_option(options::USES_PSQL);

    let report = env.run(&script).unwrap();

    let database = report.database.unwrap();
    assert!(database.starts_with("ci_load_sales_"));
    let invocations = env.runner.invocations();
    let env_of = |program: &str| {
        invocations
            .iter()
            .find(|i| i.command.program() == program)
            .unwrap()
            .env
            .get("PGDATABASE")
            .map(str::to_string)
    };
    assert_eq!(env_of("createdb"), Some(database.clone()));
    assert_eq!(env_of("python"), Some(database.clone()));
    assert_eq!(env_of("dropdb"), Some("X".to_string()));
    assert_eq!(
        env.runner.commands().last(),
        Some(&format!("dropdb {database}"))
    );
}

/// CONTRACT DB-002: Without `uses psql` no database command runs
#[test]
fn contract_no_database_without_option() {
    let env = TestEnv::new();
    let script = env.script("plain");

    let report = env.run(&script).unwrap();

    assert_eq!(report.database, None);
    assert_eq!(env.runner.count("createdb"), 0);
    assert_eq!(env.runner.count("dropdb"), 0);
}
