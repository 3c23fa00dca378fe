//! Advisory optimization checks: memory headroom, container memory
//! caps, image count, dangling volumes. Never mutates the host.

use colored::Colorize;

use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::{parse_count, parse_memory};

use super::{banner, section, unavailable};

/// Available memory below this raises the headroom advisory.
const MIN_AVAILABLE_MB: u64 = 500;

/// Image counts above this suggest a prune.
const MAX_IMAGES: usize = 20;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let mut report = banner("Optimization Advisories");

    // Memory headroom
    report.push('\n');
    report.push_str(&section("Memory"));
    report.push('\n');
    let free = channel.execute("free").await?;
    match parse_memory(&free.stdout) {
        Ok(mem) if mem.available_mb() < MIN_AVAILABLE_MB => {
            report.push_str(&format!(
                "{} available memory low ({} MB); consider container memory limits, swap, or trimming the search index\n",
                "!".yellow(),
                mem.available_mb()
            ));
        }
        Ok(mem) => {
            report.push_str(&format!(
                "{} available memory sufficient ({} MB)\n",
                "✓".green(),
                mem.available_mb()
            ));
        }
        Err(_) => {
            report.push_str(&unavailable("memory figures"));
            report.push('\n');
        }
    }

    // Container memory caps
    report.push('\n');
    report.push_str(&section("Container memory limits"));
    report.push('\n');
    for container in &config.memory_limit_containers {
        let inspect = channel
            .execute(&format!(
                "docker inspect {} --format '{{{{.HostConfig.Memory}}}}'",
                container
            ))
            .await?;
        if !inspect.success() {
            report.push_str(&format!("{} {}: not found\n", "✗".red(), container));
        } else if inspect.stdout.trim() == "0" {
            report.push_str(&format!("{} {}: no memory limit\n", "!".yellow(), container));
        } else {
            report.push_str(&format!("{} {}: limited\n", "✓".green(), container));
        }
    }

    // Image count
    report.push('\n');
    report.push_str(&section("Images"));
    report.push('\n');
    let images = channel.execute("docker images -q | wc -l").await?;
    match parse_count(&images.stdout) {
        Ok(count) if count > MAX_IMAGES => {
            report.push_str(&format!(
                "{} {} images; consider: docker image prune -a\n",
                "!".yellow(),
                count
            ));
        }
        Ok(count) => {
            report.push_str(&format!("{} {} images\n", "✓".green(), count));
        }
        Err(_) => {
            report.push_str(&unavailable("image count"));
            report.push('\n');
        }
    }

    // Dangling volumes
    report.push('\n');
    report.push_str(&section("Volumes"));
    report.push('\n');
    let volumes = channel
        .execute("docker volume ls -qf dangling=true | wc -l")
        .await?;
    match parse_count(&volumes.stdout) {
        Ok(0) => report.push_str(&format!("{} no dangling volumes\n", "✓".green())),
        Ok(count) => {
            report.push_str(&format!(
                "{} {} dangling volumes; consider: docker volume prune\n",
                "!".yellow(),
                count
            ));
        }
        Err(_) => {
            report.push_str(&unavailable("volume count"));
            report.push('\n');
        }
    }

    Ok(report)
}
