//! System status snapshot: CPU, memory, disk, uptime, load

use crate::channel::RemoteChannel;
use crate::errors::ConsoleError;

use super::banner;

/// One composite remote command; each probe renders its own line.
const STATUS_COMMAND: &str = r#"
echo "CPU:    $(top -bn1 | grep 'Cpu(s)' | awk '{print $2}')%"
echo "Memory: $(free -h | awk 'NR==2{printf "%s / %s (%.1f%%)", $3, $2, $3/$2*100}')"
echo "Disk:   $(df -h / | awk 'NR==2{printf "%s / %s (%s)", $3, $2, $5}')"
echo "Uptime: $(uptime -p)"
echo "Load:  $(uptime | awk -F'load average:' '{print $2}')"
"#;

pub async fn report(channel: &dyn RemoteChannel) -> Result<String, ConsoleError> {
    let output = channel.execute(STATUS_COMMAND).await?;

    let mut report = banner("System Status");
    report.push('\n');
    report.push_str(output.stdout.trim_end());
    report.push('\n');
    Ok(report)
}
