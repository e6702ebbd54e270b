use anyhow::{Context, Result};
use tokio::process::Command;

/// Ask systemd for a unit's state, e.g. `active`, `inactive`, `failed`.
///
/// `systemctl is-active` exits non-zero for anything but `active`, so only
/// stdout is inspected.
pub async fn unit_state(unit: &str) -> Result<String> {
    let output = Command::new("systemctl")
        .args(["is-active", unit])
        .output()
        .await
        .context("failed to run systemctl")?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Profile location text for a unit state. Unknown states render as `?`.
pub fn location_text(state: &str) -> String {
    match state.trim() {
        s @ ("active" | "inactive") => format!("Status: {s}"),
        _ => "?".to_string(),
    }
}
