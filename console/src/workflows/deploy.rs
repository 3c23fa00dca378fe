//! Monitoring stack deployment
//!
//! Transfers the deployment script to the host and executes it, after
//! an explicit operator confirmation. Success is verified by checking
//! that monitoring containers actually came up, not from the script's
//! exit status alone.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use tracing::info;

use crate::channel::{RemoteChannel, SshChannel};
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::parse_detection;

use super::banner;

pub async fn run(channel: &SshChannel, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    print!("{}", banner("Deploy Monitoring Stack"));
    println!();

    if !confirm(&format!(
        "Deploy the monitoring stack to {}? [y/N] ",
        channel.host()
    ))? {
        println!("Cancelled");
        return Ok(());
    }

    let script = Path::new(&config.deploy.script);
    if !script.exists() {
        return Err(ConsoleError::DeployError(format!(
            "deployment script not found: {}",
            script.display()
        )));
    }
    let script_name = script
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConsoleError::DeployError("invalid script path".to_string()))?;

    info!("Uploading {} to {}", script.display(), config.deploy.remote_dir);
    channel.copy_to(script, &config.deploy.remote_dir).await?;

    let remote_path = format!("{}/{}", config.deploy.remote_dir, script_name);
    println!("Running deployment...\n");
    let output = channel
        .execute(&format!("chmod +x {} && {}", remote_path, remote_path))
        .await?;
    println!("{}", output.stdout.trim_end());

    // Post-action verification: the monitoring containers must be up
    let check = channel
        .execute("docker ps --format '{{.Names}}' | grep -iE 'grafana|prometheus|portainer'")
        .await?;
    if !parse_detection(&check.stdout) {
        println!("\n{} deployment did not bring up the monitoring containers", "✗".red());
        return Err(ConsoleError::DeployError(
            "monitoring containers not running after deploy".to_string(),
        ));
    }

    println!("\n{} deployment complete", "✓".green());
    for dashboard in &config.dashboards {
        println!("  {}: {}", dashboard.name, dashboard.url(channel.host()));
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, ConsoleError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
