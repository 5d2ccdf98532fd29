use anyhow::Result;

use pages_deploy::cli::{CONFIGURATION_EXIT_CODE, CONNECTION_EXIT_CODE};

use crate::common::MockSsh;

#[test]
fn unknown_instance_fails_before_connecting() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let output = ssh.run(&["--instance", "public", "start"]);

    assert_eq!(output.status.code(), Some(i32::from(CONFIGURATION_EXIT_CODE)));
    assert_eq!(ssh.recorded_args(), None, "ssh must not be invoked");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown environment `public`"),
        "stderr: {stderr}"
    );
    Ok(())
}

#[test]
fn unreachable_host_is_a_connection_error_for_every_operation() -> Result<()> {
    for operation in ["start", "stop", "restart"] {
        let ssh = MockSsh::new(255)?;
        let output = ssh.run(&[operation]);

        assert_eq!(
            output.status.code(),
            Some(i32::from(CONNECTION_EXIT_CODE)),
            "{operation} should report a connection failure"
        );
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Failed to reach 18f-hub over SSH"),
            "stderr: {stderr}"
        );
    }
    Ok(())
}

#[test]
fn remote_exit_status_is_propagated() -> Result<()> {
    let ssh = MockSsh::new(3)?;
    let output = ssh.run(&["stop"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exit=Some(3)"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn explicit_missing_config_is_a_configuration_error() {
    let output = crate::common::pages_deploy()
        .args(["--config", "/nonexistent/pages-deploy.toml", "start"])
        .output()
        .expect("pages-deploy should start");

    assert_eq!(output.status.code(), Some(i32::from(CONFIGURATION_EXIT_CODE)));
}

#[test]
fn environment_is_only_logged_once_resolved() -> Result<()> {
    let ssh = MockSsh::new(0)?;
    let run = |instance: &str| {
        crate::common::pages_deploy()
            .env("RUST_LOG", "info")
            .arg("--config")
            .arg(ssh.config_path())
            .args(["--instance", instance, "--dry-run", "stop"])
            .output()
    };

    let unknown = run("public")?;
    assert_eq!(unknown.status.code(), Some(i32::from(CONFIGURATION_EXIT_CODE)));
    let stderr = String::from_utf8_lossy(&unknown.stderr);
    assert!(!stderr.contains("Resolved environment"), "stderr: {stderr}");

    let known = run("pages")?;
    assert!(known.status.success());
    let stderr = String::from_utf8_lossy(&known.stderr);
    assert!(stderr.contains("Resolved environment"), "stderr: {stderr}");
    Ok(())
}
