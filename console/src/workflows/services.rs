//! Per-service status: detection, process stats, health endpoint

use colored::Colorize;

use crate::catalog::ServiceDescriptor;
use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::parse_detection;

use super::{banner, section};

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let mut report = banner("Service Status");

    for service in &config.services {
        report.push('\n');
        report.push_str(&section(&format!("{} ({})", service.name, service.port)));
        report.push('\n');
        report.push_str(&service_block(channel, service).await?);
    }

    Ok(report)
}

/// Render one service's block. A down service or unreachable health
/// endpoint degrades this block only; the sibling services still run.
async fn service_block(
    channel: &dyn RemoteChannel,
    service: &ServiceDescriptor,
) -> Result<String, ConsoleError> {
    let detected = channel
        .execute(&format!("pgrep -f '{}'", service.pattern))
        .await?;

    if !parse_detection(&detected.stdout) {
        return Ok(format!("status: {} not running\n", "✗".red()));
    }

    let mut block = format!("status: {} running\n", "✓".green());

    let stats = channel
        .execute(&format!(
            "ps -p $(pgrep -f '{}' | head -1) -o pid,etime,pmem,pcpu,cmd | tail -1",
            service.pattern
        ))
        .await?;
    if stats.success() && !stats.is_blank() {
        block.push_str(stats.stdout.trim_end());
        block.push('\n');
    }

    let health = channel
        .execute(&format!(
            "curl -s --max-time 5 http://localhost:{}/health",
            service.port
        ))
        .await?;
    if health.success() && !health.is_blank() {
        block.push_str(&format!("health: {}\n", health.stdout.trim()));
    } else {
        block.push_str("health: endpoint unreachable\n");
    }

    Ok(block)
}
