use anyhow::Result;
use serde_json::Value;

use crate::common::{MockSsh, FLAGS, HUB_SPEC, REMOTE_STDERR_MARKER, REMOTE_STDOUT_MARKER};

#[test]
fn start_runs_one_forever_start_against_the_hub() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["start"]);

    assert!(
        output.status.success(),
        "start should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        ssh.recorded_args(),
        Some(vec![
            "--".to_string(),
            "18f-hub".to_string(),
            format!("forever start -l /home/ubuntu/pages.log -a {HUB_SPEC}"),
        ])
    );
    Ok(())
}

#[test]
fn remote_output_is_streamed_to_the_operator() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["start"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stdout.contains(REMOTE_STDOUT_MARKER),
        "remote stdout should reach stdout, got `{stdout}`"
    );
    assert!(
        stderr.contains(REMOTE_STDERR_MARKER),
        "remote stderr should reach stderr, got `{stderr}`"
    );
    assert!(!stdout.contains(REMOTE_STDERR_MARKER));
    Ok(())
}

#[test]
fn config_file_without_toml_extension_is_accepted() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let config = ssh.config_copy("deploy.conf")?;
    let output = crate::common::pages_deploy()
        .arg("--config")
        .arg(&config)
        .arg("stop")
        .output()?;

    assert!(
        output.status.success(),
        "deploy.conf should load: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let args = ssh.recorded_args().expect("ssh should have been invoked");
    assert_eq!(args.last(), Some(&format!("forever stop {HUB_SPEC}")));
    Ok(())
}

#[test]
fn stop_sends_the_same_spec_as_start() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["stop"]);

    assert!(output.status.success());
    let args = ssh.recorded_args().expect("ssh should have been invoked");
    assert_eq!(args.last(), Some(&format!("forever stop {HUB_SPEC}")));
    Ok(())
}

#[test]
fn subdirectory_instance_changes_directory_for_the_command() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["--instance", "hookshot", "restart"]);

    assert!(output.status.success());
    let args = ssh.recorded_args().expect("ssh should have been invoked");
    assert_eq!(
        args,
        vec![
            "--".to_string(),
            "18f-pages".to_string(),
            format!("cd pages && forever restart ./hookshot.js {FLAGS}"),
        ]
    );
    Ok(())
}

#[test]
fn instance_can_come_from_the_environment() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = crate::common::pages_deploy()
        .env("PAGES_DEPLOY_INSTANCE", "pages")
        .arg("--config")
        .arg(ssh.config_path())
        .arg("start")
        .output()?;

    assert!(output.status.success());
    let args = ssh.recorded_args().expect("ssh should have been invoked");
    assert_eq!(
        args.last(),
        Some(&format!(
            "forever start -l /home/ubuntu/pages.log -a pages/pages.js {FLAGS}"
        ))
    );
    Ok(())
}

#[test]
fn dry_run_prints_invocation_without_calling_ssh() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["--dry-run", "stop"]);

    assert!(output.status.success());
    assert_eq!(ssh.recorded_args(), None);
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["status"], "dry_run");
    assert_eq!(payload["remote_line"], format!("forever stop {HUB_SPEC}"));
    Ok(())
}

#[test]
fn show_prints_resolved_profile() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["show"]);

    assert!(output.status.success());
    assert_eq!(ssh.recorded_args(), None);
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["instance"], "internal");
    assert_eq!(payload["log_path"], "/home/ubuntu/pages.log");
    assert_eq!(payload["command_spec"], HUB_SPEC);
    Ok(())
}
