use crate::helpers::project::TestProject;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;

/// Runs the coca binary inside a temporary project
pub struct CliTestHelper {
    pub project: TestProject,
    pub project_root: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Self {
        let project = TestProject::new();
        let project_root = project.root.clone();
        Self {
            project,
            project_root,
        }
    }

    /// Project without `lib/plugin`
    pub fn bare() -> Self {
        let project = TestProject::bare();
        let project_root = project.root.clone();
        Self {
            project,
            project_root,
        }
    }

    /// Command for the binary, run from the project root with a clean environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("coca").unwrap();
        cmd.current_dir(&self.project_root)
            .env_remove("COCA_ENV")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.project_root.join("coca.yaml"), contents).expect("Failed to write config");
    }

    pub fn calls_log(&self) -> PathBuf {
        self.project_root.join("calls.log")
    }

    /// Lines recorded by the fake tool, one per invocation
    pub fn recorded_calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Install a shell script standing in for the migration tool and openssl.
    ///
    /// The script records its arguments, fails with exit code 3 when any argument
    /// mentions `broken`, and otherwise prints `ran <first arg>`.
    #[cfg(unix)]
    pub fn install_fake_tool(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.project_root.join("fake-tool.sh");
        let contents = format!(
            r#"#!/bin/sh
echo "$*" >> "{log}"
case "$*" in
  *broken*) echo "migration failed" >&2; exit 3 ;;
esac
echo "ran $1"
"#,
            log = self.calls_log().display()
        );
        fs::write(&script, contents).expect("Failed to write fake tool");
        let mut permissions = fs::metadata(&script).unwrap().permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&script, permissions).unwrap();

        self.write_config(&format!(
            r#"migration:
  program: {program}
  args: []
rsa:
  program: {program}
"#,
            program = script.display()
        ));

        script
    }
}
