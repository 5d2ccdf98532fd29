use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_pages-deploy");
pub const FLAGS: &str = "--port 5000 --home /home/ubuntu --rbenv /usr/local/rbenv";
pub const HUB_SPEC: &str =
    "pages/hookshot.js --port 5000 --home /home/ubuntu --rbenv /usr/local/rbenv";
pub const REMOTE_STDOUT_MARKER: &str = "forever: remote stdout line";
pub const REMOTE_STDERR_MARKER: &str = "forever: remote stderr line";

/// Scratch directory holding a mock `ssh` client and a deploy.toml pointing at it.
pub struct MockSsh {
    dir: TempDir,
}

impl MockSsh {
    /// The mock appends each argument on its own line to `ssh.log`, prints one
    /// marker line to each of stdout and stderr, and exits with `exit_code`.
    pub fn new(exit_code: i32) -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create scratch directory")?;
        let script = dir.path().join("ssh");
        let log = dir.path().join("ssh.log");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\necho '{REMOTE_STDOUT_MARKER}'\necho '{REMOTE_STDERR_MARKER}' >&2\nexit {exit_code}\n",
                log.display()
            ),
        )
        .context("failed to write mock ssh")?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
            .context("failed to mark mock ssh executable")?;

        let mut document = toml::map::Map::new();
        let mut ssh = toml::map::Map::new();
        ssh.insert(
            "binary".into(),
            toml::Value::String(script.display().to_string()),
        );
        document.insert("ssh".into(), toml::Value::Table(ssh));
        fs::write(
            dir.path().join("deploy.toml"),
            toml::to_string(&toml::Value::Table(document)).context("failed to render config")?,
        )
        .context("failed to write deploy.toml")?;

        Ok(Self { dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("deploy.toml")
    }

    /// Copy the generated config to `name` in the same directory.
    pub fn config_copy(&self, name: &str) -> Result<PathBuf> {
        let target = self.dir.path().join(name);
        fs::copy(self.config_path(), &target).context("failed to copy deploy.toml")?;
        Ok(target)
    }

    /// Arguments received by the mock, or `None` if it never ran.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let log = self.dir.path().join("ssh.log");
        read_lines(&log)
    }

    /// Run the binary with this mock's config and a clean environment selection.
    pub fn run(&self, args: &[&str]) -> Output {
        pages_deploy()
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .output()
            .expect("pages-deploy should start")
    }
}

pub fn pages_deploy() -> Command {
    let mut command = Command::new(BINARY_PATH);
    command
        .env_remove("PAGES_DEPLOY_INSTANCE")
        .env_remove("PAGES_DEPLOY_CONFIG")
        .env("RUST_LOG", "warn");
    command
}

fn read_lines(path: &Path) -> Option<Vec<String>> {
    let content = fs::read_to_string(path).ok()?;
    Some(content.lines().map(str::to_string).collect())
}
