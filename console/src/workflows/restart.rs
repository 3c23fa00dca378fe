//! Service and container restart
//!
//! The only state-mutating workflow besides deploy. Success is reported
//! from a post-restart detection check, never from the issued command's
//! own exit status.

use colored::Colorize;

use crate::catalog::{lookup, ServiceDescriptor};
use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::parse_detection;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
    name: &str,
) -> Result<String, ConsoleError> {
    let mut report = format!("Restarting {}...\n", name);

    let restarted = match lookup(&config.services, name) {
        Some(service) => restart_service(channel, service).await?,
        // Unrecognized names fall back to a generic container restart
        None => restart_container(channel, name).await?,
    };

    if restarted {
        report.push_str(&format!("{} {} restarted\n", "✓".green(), name));
    } else {
        report.push_str(&format!("{} {} failed to restart\n", "✗".red(), name));
    }
    Ok(report)
}

/// Stop, wait, start, wait, then re-run the detection pattern.
async fn restart_service(
    channel: &dyn RemoteChannel,
    service: &ServiceDescriptor,
) -> Result<bool, ConsoleError> {
    channel
        .execute(&format!("pkill -f '{}' || true; sleep 2", service.pattern))
        .await?;

    channel
        .execute(&format!(
            "cd {} && {} sleep 2",
            service.start_dir,
            with_trailing_semicolon(&service.start_cmd)
        ))
        .await?;

    let check = channel
        .execute(&format!("pgrep -f '{}'", service.pattern))
        .await?;
    Ok(parse_detection(&check.stdout))
}

/// Generic container restart, verified against the running list.
async fn restart_container(
    channel: &dyn RemoteChannel,
    name: &str,
) -> Result<bool, ConsoleError> {
    let restart = channel.execute(&format!("docker restart {}", name)).await?;
    if !restart.success() {
        return Ok(false);
    }

    let check = channel
        .execute(&format!(
            "docker ps --format '{{{{.Names}}}}' | grep -Fx '{}'",
            name
        ))
        .await?;
    Ok(parse_detection(&check.stdout))
}

/// Start commands end in `&`; a bare `&& sleep` after one is a syntax
/// error, so join with `;` unless the command already ends with one.
fn with_trailing_semicolon(cmd: &str) -> String {
    let trimmed = cmd.trim_end();
    if trimmed.ends_with(';') || trimmed.ends_with('&') {
        format!("{} ", trimmed)
    } else {
        format!("{}; ", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_semicolon() {
        assert_eq!(with_trailing_semicolon("./run &"), "./run & ");
        assert_eq!(with_trailing_semicolon("./run"), "./run; ");
        assert_eq!(with_trailing_semicolon("./run;"), "./run; ");
    }
}
