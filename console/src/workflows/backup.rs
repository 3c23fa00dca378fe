//! Database backup: consistent dumps, compressed and timestamped

use chrono::Local;
use colored::Colorize;

use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;

use super::banner;

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let mut report = banner("Database Backup");
    report.push('\n');

    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    channel
        .execute(&format!("mkdir -p {}", config.backup.dir))
        .await?;

    for db in &config.backup.databases {
        let dump = channel
            .execute(&dump_command(config, db, &stamp))
            .await?;
        if dump.success() {
            report.push_str(&format!("{} {} backed up\n", "✓".green(), db));
        } else {
            report.push_str(&format!(
                "{} {} backup failed: {}\n",
                "✗".red(),
                db,
                dump.stderr.trim()
            ));
        }
    }

    let listing = channel
        .execute(&format!("ls -lh {} | tail -5", config.backup.dir))
        .await?;
    report.push('\n');
    report.push_str(listing.stdout.trim_end());
    report.push('\n');
    Ok(report)
}

/// `--single-transaction` keeps the dump consistent without locking.
/// `pipefail` makes the gzip pipeline report dump failures.
fn dump_command(config: &ConsoleConfig, db: &str, stamp: &str) -> String {
    format!(
        "set -o pipefail; docker exec {} mysqldump -u{} -p{} --single-transaction {} 2>/dev/null | gzip > {}/{}_{}.sql.gz",
        config.mysql.container,
        config.mysql.user,
        config.mysql.password,
        db,
        config.backup.dir,
        db,
        stamp
    )
}
