//! Database subsystem status: relational engine and key-value store
//!
//! Each subsystem renders its own block; a failing subsystem yields an
//! explicit unavailable line and never suppresses its siblings.

use crate::channel::RemoteChannel;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::parse::parse_redis_pong;

use super::{banner, section, unavailable};

pub async fn report(
    channel: &dyn RemoteChannel,
    config: &ConsoleConfig,
) -> Result<String, ConsoleError> {
    let mut report = banner("Database Status");

    let blocks: [(&str, String); 3] = [
        (
            "Databases",
            mysql_query(
                config,
                &format!("SHOW DATABASES LIKE '{}';", config.mysql.db_pattern),
            ),
        ),
        (
            "Connections",
            mysql_query(config, "SHOW STATUS LIKE 'Threads_connected';"),
        ),
        (
            "Replication",
            format!(
                r"{} | grep -E 'Slave_IO_Running|Slave_SQL_Running|Seconds_Behind_Master'",
                mysql_query(config, r"SHOW SLAVE STATUS\G")
            ),
        ),
    ];

    for (title, command) in &blocks {
        report.push('\n');
        report.push_str(&section(title));
        report.push('\n');

        let output = channel.execute(command).await?;
        if output.success() && !output.is_blank() {
            report.push_str(output.stdout.trim_end());
            report.push('\n');
        } else {
            report.push_str(&unavailable("relational engine"));
            report.push('\n');
        }
    }

    report.push('\n');
    report.push_str(&section("Key-value store"));
    report.push('\n');
    let ping = channel.execute(&redis_ping(config)).await?;
    if ping.success() && parse_redis_pong(&ping.stdout) {
        report.push_str("PING: PONG\n");
    } else {
        report.push_str(&unavailable("key-value store"));
        report.push('\n');
    }

    Ok(report)
}

/// Remote command running a statement inside the database container.
pub(crate) fn mysql_query(config: &ConsoleConfig, statement: &str) -> String {
    format!(
        r#"docker exec {} mysql -u{} -p{} -e "{}" 2>/dev/null"#,
        config.mysql.container, config.mysql.user, config.mysql.password, statement
    )
}

/// Remote command pinging the key-value store container.
pub(crate) fn redis_ping(config: &ConsoleConfig) -> String {
    format!(
        "docker exec {} redis-cli -a {} PING 2>/dev/null",
        config.redis.container, config.redis.password
    )
}
