//! Terminal launcher
//!
//! Runs a command in the bundled `terminal` helper.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::thread::JoinHandle;

/// Run `command` through `<bin_dir>/terminal` on a background thread.
///
/// The command line is interpreted by the platform shell. Output is logged
/// once the helper exits.
pub fn open_terminal(bin_dir: &Path, command: &str) -> Result<JoinHandle<()>> {
    let terminal = bin_dir.join("terminal");
    let command_line = format!("{} {}", shell_quote(&terminal.to_string_lossy()), command);

    tracing::debug!("Opening terminal: {}", command_line);

    let mut cmd = shell_command(&command_line);
    let handle = std::thread::Builder::new()
        .name("terminal".to_string())
        .spawn(move || match cmd.output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    tracing::info!("{}", stdout.trim_end());
                }
                if !output.status.success() {
                    tracing::warn!(
                        "Terminal exited with {}: {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim_end()
                    );
                }
            }
            Err(e) => tracing::warn!("Failed to run terminal: {}", e),
        })
        .context("Failed to spawn terminal thread")?;

    Ok(handle)
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_quote(s: &str) -> String {
    format!("\"{}\"", s)
}

#[cfg(not(windows))]
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/opt/kite"), "'/opt/kite'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_runs_helper_with_command() {
        let tmp = tempfile::tempdir().unwrap();
        let bin_dir = tmp.path().join("my resources");
        std::fs::create_dir(&bin_dir).unwrap();

        let out = tmp.path().join("out.txt");
        let script = bin_dir.join("terminal");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" > '{}'\n", out.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let handle = open_terminal(&bin_dir, "docker exec -it redis sh").unwrap();
        handle.join().unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written.trim(), "docker exec -it redis sh");
    }

    #[test]
    fn test_missing_helper_does_not_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let handle = open_terminal(tmp.path(), "true").unwrap();
        assert!(handle.join().is_ok());
    }
}
