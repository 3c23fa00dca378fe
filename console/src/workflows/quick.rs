//! Quick overview: one screen with the essential fields of status,
//! services, containers, and databases

use chrono::Local;
use colored::Colorize;

use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::{parse_count, parse_detection, parse_trailing_uint};
use crate::workflows::databases::mysql_query;

use super::banner;

const RESOURCE_LINE: &str = r#"echo "CPU: $(top -bn1 | grep 'Cpu(s)' | awk '{print $2}')% | Mem: $(free | awk 'NR==2{printf "%.1f%%", $3/$2*100}') | Disk: $(df / | awk 'NR==2{print $5}')""#;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut report = banner(&format!("Fleet Overview - {}", stamp));

    // Resources
    report.push_str("\n[Resources]\n");
    let resources = channel.execute(RESOURCE_LINE).await?;
    if resources.is_blank() {
        report.push_str("unavailable\n");
    } else {
        report.push_str(resources.stdout.trim_end());
        report.push('\n');
    }

    // Services
    report.push_str("\n[Services]\n");
    for service in &config.services {
        let detected = channel
            .execute(&format!("pgrep -f '{}'", service.pattern))
            .await?;
        let mark = if parse_detection(&detected.stdout) {
            "✓".green()
        } else {
            "✗".red()
        };
        report.push_str(&format!("{} {} ({})\n", mark, service.name, service.port));
    }

    // Containers
    let count = channel.execute("docker ps -q | wc -l").await?;
    match parse_count(&count.stdout) {
        Ok(n) => {
            report.push_str(&format!(
                "\n[Containers] {}/{} running\n",
                n, config.expected_containers
            ));
            let names = channel
                .execute("docker ps --format '{{.Names}}: {{.Status}}'")
                .await?;
            for line in names.stdout.lines().filter(|l| !l.trim().is_empty()) {
                report.push_str(&format!("  {}\n", line));
            }
        }
        Err(_) => {
            report.push_str("\n[Containers] unavailable\n");
        }
    }

    // Databases
    report.push_str("\n[Databases]\n");
    let connections = channel
        .execute(&format!(
            "{} | tail -1",
            mysql_query(config, "SHOW STATUS LIKE 'Threads_connected';")
        ))
        .await?;
    match parse_trailing_uint(connections.stdout.trim()) {
        Ok(n) if connections.success() => {
            report.push_str(&format!("  MySQL connections: {}\n", n));
        }
        _ => report.push_str("  MySQL: unavailable\n"),
    }

    let lag = channel
        .execute(&format!(
            r"{} | grep 'Seconds_Behind_Master:'",
            mysql_query(config, r"SHOW SLAVE STATUS\G")
        ))
        .await?;
    match parse_trailing_uint(lag.stdout.trim()) {
        Ok(secs) if lag.success() => {
            report.push_str(&format!("  Replication lag: {}s\n", secs));
        }
        _ => report.push_str("  Replication: unavailable\n"),
    }

    Ok(report)
}
