use crate::helpers::invocation::InvocationExt;
use crate::helpers::project::TestProject;
use anyhow::Result;
use coca::CocaError;
use coca::commands::{cmd_add, cmd_migrate, migration_plan};
use coca::invocation::{Invocation, MigrationOptions};
use coca::runner::Executor;
use std::sync::Mutex;

/// Records every invocation; optionally fails the one whose arguments mention `fail_on`.
#[derive(Default)]
struct RecordingExecutor {
    fail_on: Option<String>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingExecutor {
    fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for RecordingExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, CocaError> {
        self.calls.lock().unwrap().push(invocation.clone());

        if let Some(marker) = &self.fail_on
            && invocation.args.iter().any(|arg| arg.contains(marker.as_str()))
        {
            return Err(CocaError::ExternalProcess {
                command: invocation.to_string(),
                code: Some(1),
                message: "ERROR: relation already exists".to_string(),
            });
        }

        Ok(String::new())
    }
}

#[test]
fn test_plan_runs_plugins_then_root() -> Result<()> {
    let project = TestProject::new();
    project.add_plugin("egg-coca-auth", true);
    project.add_plugin("egg-coca-empty", false);
    project.add_file("lib/plugin/scripts", "");

    let plan = migration_plan(&project.composer(), &MigrationOptions::for_env("production"))?;

    let config = format!(
        "--config={}",
        project.root.join("database/config.json").display()
    );
    let plugin_migrations = format!(
        "--migrations-path={}",
        project
            .plugin_dir()
            .join("egg-coca-auth")
            .join("migrations")
            .display()
    );

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan[0].flags(),
        vec!["--env=production", config.as_str(), plugin_migrations.as_str()]
    );
    assert_eq!(
        plan[1].flags(),
        vec!["--env=production", config.as_str()]
    );

    Ok(())
}

#[test]
fn test_plan_without_plugins_only_migrates_root() -> Result<()> {
    let project = TestProject::new();

    let plan = migration_plan(&project.composer(), &MigrationOptions::for_env("development"))?;

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].flag_value("migrations-path"), None);

    Ok(())
}

#[test]
fn test_plan_fails_without_plugin_dir() {
    let project = TestProject::bare();

    let err = migration_plan(&project.composer(), &MigrationOptions::for_env("development"))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CocaError>(),
        Some(CocaError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_migrate_executes_in_discovery_order() -> Result<()> {
    let project = TestProject::new();
    for name in ["egg-coca-orders", "egg-coca-auth", "egg-coca-billing"] {
        project.add_plugin(name, true);
    }
    let executor = RecordingExecutor::default();

    cmd_migrate(
        &project.composer(),
        &MigrationOptions::for_env("development"),
        &executor,
    )
    .await?;

    let plugin_dir = project.plugin_dir();
    let order: Vec<Option<String>> = executor
        .calls()
        .iter()
        .map(|call| call.flag_value("migrations-path").map(str::to_string))
        .collect();

    let expected_path = |name: &str| {
        Some(
            plugin_dir
                .join(name)
                .join("migrations")
                .display()
                .to_string(),
        )
    };
    assert_eq!(
        order,
        vec![
            expected_path("egg-coca-auth"),
            expected_path("egg-coca-billing"),
            expected_path("egg-coca-orders"),
            None,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_migrate_stops_at_first_failure() {
    let project = TestProject::new();
    project.add_plugin("egg-coca-auth", true);
    project.add_plugin("egg-coca-broken", true);
    project.add_plugin("egg-coca-orders", true);
    let executor = RecordingExecutor::failing_on("egg-coca-broken");

    let err = cmd_migrate(
        &project.composer(),
        &MigrationOptions::for_env("development"),
        &executor,
    )
    .await
    .unwrap_err();

    // auth ran, broken failed, orders and root never started
    assert_eq!(executor.calls().len(), 2);
    let coca_err = err.downcast_ref::<CocaError>().unwrap();
    assert!(matches!(coca_err, CocaError::ExternalProcess { .. }));
    assert!(err.to_string().contains("relation already exists"));
}

#[tokio::test]
async fn test_add_without_name_spawns_nothing() {
    let project = TestProject::new();
    let executor = RecordingExecutor::default();
    let options = MigrationOptions {
        plugin_name: Some("auth".to_string()),
        ..Default::default()
    };

    let err = cmd_add(&project.composer(), &options, &executor)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CocaError>(),
        Some(CocaError::MissingRequiredField { field: "name" })
    ));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_add_issues_exactly_one_invocation() -> Result<()> {
    let project = TestProject::bare();
    let executor = RecordingExecutor::default();
    let options = MigrationOptions {
        name: Some("create_users".to_string()),
        plugin_name: Some("auth".to_string()),
        ..Default::default()
    };

    cmd_add(&project.composer(), &options, &executor).await?;

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args[..2], ["sequelize", "migration:generate"]);
    assert_eq!(calls[0].flag_value("name"), Some("create_users"));

    Ok(())
}
