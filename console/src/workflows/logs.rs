//! Log retrieval for services and containers

use crate::catalog::lookup;
use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;

/// Lines fetched when the operator gives no explicit count.
pub const DEFAULT_LINES: usize = 50;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
    name: &str,
    lines: usize,
) -> Result<String, ConsoleError> {
    let command = match lookup(&config.services, name) {
        Some(service) => format!("tail -n{} {}", lines, service.log_path),
        // Unrecognized names are assumed to be containers
        None => format!("docker logs --tail {} {} 2>&1", lines, name),
    };

    let output = channel.execute(&command).await?;

    let mut report = format!("{} logs (last {} lines):\n\n", name, lines);
    if output.is_blank() {
        report.push_str("(no log output)\n");
        return Ok(report);
    }

    // The remote tail already bounds the output; cap locally as well so
    // the rendered report never exceeds the requested count.
    for line in output.stdout.lines().take(lines) {
        report.push_str(line);
        report.push('\n');
    }
    Ok(report)
}
