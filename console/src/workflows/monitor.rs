//! Monitoring dashboard links
//!
//! No remote call: this workflow only lists the configured dashboard
//! URLs and opens the primary one in the local browser.

use std::process::Command;

use tracing::debug;

use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;

use super::banner;

pub fn report(config: &ConsoleConfig) -> String {
    let mut report = banner("Monitoring Dashboards");
    report.push('\n');
    for dashboard in &config.dashboards {
        report.push_str(&format!(
            "  {}: {}\n",
            dashboard.name,
            dashboard.url(&config.host)
        ));
    }
    report
}

/// Open the first configured dashboard in the local browser.
pub fn open_primary(config: &ConsoleConfig) -> Result<String, ConsoleError> {
    let dashboard = config
        .dashboards
        .first()
        .ok_or_else(|| ConsoleError::ConfigError("no dashboards configured".to_string()))?;

    let url = dashboard.url(&config.host);
    open_browser(&url)?;
    Ok(format!("Opened {} in the browser", dashboard.name))
}

fn open_browser(url: &str) -> Result<(), ConsoleError> {
    #[cfg(target_os = "macos")]
    let launcher = "open";
    #[cfg(not(target_os = "macos"))]
    let launcher = "xdg-open";

    debug!("Opening {} with {}", url, launcher);
    Command::new(launcher)
        .arg(url)
        .spawn()
        .map_err(|e| ConsoleError::Internal(format!("failed to open browser: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_all_dashboards() {
        let config = ConsoleConfig {
            host: "10.0.0.5".to_string(),
            ..ConsoleConfig::default()
        };
        let report = report(&config);

        assert!(report.contains("Grafana: http://10.0.0.5:3000"));
        assert!(report.contains("Portainer: https://10.0.0.5:9443"));
        assert!(report.contains("Prometheus: http://10.0.0.5:9090"));
    }
}
