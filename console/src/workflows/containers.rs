//! Container listing and resource usage

use crate::channel::RemoteChannel;
use crate::errors::ConsoleError;

use super::{banner, section, unavailable};

const LIST_COMMAND: &str =
    r#"docker ps --format "table {{.Names}}\t{{.Status}}\t{{.Ports}}""#;

const STATS_COMMAND: &str =
    r#"docker stats --no-stream --format "table {{.Name}}\t{{.CPUPerc}}\t{{.MemUsage}}\t{{.MemPerc}}""#;

pub async fn report(channel: &dyn RemoteChannel) -> Result<String, ConsoleError> {
    let mut report = banner("Container Status");

    report.push('\n');
    report.push_str(&section("Running containers"));
    report.push('\n');
    let list = channel.execute(LIST_COMMAND).await?;
    if list.success() && !list.is_blank() {
        report.push_str(list.stdout.trim_end());
        report.push('\n');
    } else {
        report.push_str(&unavailable("container runtime"));
        report.push('\n');
    }

    report.push('\n');
    report.push_str(&section("Resource usage"));
    report.push('\n');
    let stats = channel.execute(STATS_COMMAND).await?;
    if stats.success() && !stats.is_blank() {
        report.push_str(stats.stdout.trim_end());
        report.push('\n');
    } else {
        report.push_str(&unavailable("container stats"));
        report.push('\n');
    }

    Ok(report)
}
