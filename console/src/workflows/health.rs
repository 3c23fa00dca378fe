//! Health workflow: snapshot the host, score it, render the report

use colored::Colorize;

use crate::catalog::lookup;
use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::health::{evaluate, HealthReport, HealthSnapshot, HealthTier};
use crate::parse::{parse_count, parse_detection, parse_memory, parse_mysql_alive, parse_redis_pong};
use crate::workflows::databases::redis_ping;

use super::banner;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let snapshot = take_snapshot(channel, config).await?;
    let report = evaluate(&snapshot);
    Ok(render(&report))
}

/// Probe the host once, at the start of the run. Each probe failure is
/// captured in the snapshot; only transport failure aborts.
pub async fn take_snapshot(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<HealthSnapshot, ConsoleError> {
    let free = channel.execute("free").await?;
    let memory_percent = match parse_memory(&free.stdout) {
        Ok(mem) => Some(mem.percent_used()),
        Err(e) => {
            tracing::warn!("memory probe unparsable: {}", e);
            None
        }
    };

    let running_containers = {
        let output = channel.execute("docker ps -q | wc -l").await?;
        match parse_count(&output.stdout) {
            Ok(count) if output.success() => Some(count),
            _ => {
                tracing::warn!("container probe failed: {}", output.stderr.trim());
                None
            }
        }
    };

    let auth_running = service_detected(channel, config, "auth").await?;
    let inference_running = service_detected(channel, config, "ai-service").await?;

    let mysql = channel
        .execute(&mysql_ping_command(config))
        .await?;
    let redis = channel.execute(&redis_ping(config)).await?;

    Ok(HealthSnapshot {
        memory_percent,
        running_containers,
        expected_containers: config.expected_containers,
        auth_running,
        inference_running,
        mysql_alive: parse_mysql_alive(&mysql.stdout),
        redis_alive: parse_redis_pong(&redis.stdout),
    })
}

async fn service_detected(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
    name: &str,
) -> Result<bool, ConsoleError> {
    let Some(service) = lookup(&config.services, name) else {
        // Not in the catalog means it cannot be detected running
        return Ok(false);
    };
    let output = channel
        .execute(&format!("pgrep -f '{}'", service.pattern))
        .await?;
    Ok(parse_detection(&output.stdout))
}

fn mysql_ping_command(config: &ConsoleConfig) -> String {
    format!(
        "docker exec {} mysqladmin -u{} -p{} ping 2>/dev/null",
        config.mysql.container, config.mysql.user, config.mysql.password
    )
}

/// Render the scored report: one line per check, then score and tier.
fn render(report: &HealthReport) -> String {
    let mut out = banner("Health Check");
    out.push('\n');

    for result in &report.results {
        if result.triggered {
            out.push_str(&format!(
                "{} {} (-{})\n",
                "✗".red(),
                result.message,
                result.weight
            ));
        } else {
            out.push_str(&format!("{} {}\n", "✓".green(), result.ok_message));
        }
    }

    out.push('\n');
    out.push_str(&format!("Health score: {}/100\n", report.score()));

    let tier = report.tier();
    let label = match tier {
        HealthTier::Excellent => tier.label().green(),
        HealthTier::Good => tier.label().yellow(),
        HealthTier::Warning => tier.label().yellow(),
        HealthTier::Critical => tier.label().red(),
    };
    out.push_str(&format!("Status: {}\n", label));
    out
}
