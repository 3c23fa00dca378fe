//! Parsers for fixed-format remote command output
//!
//! Each workflow interprets remote text through one of these typed
//! parsers; a line that does not match the expected grammar is an
//! explicit `ConsoleError::Parse`, never a silent empty fallback.

use crate::errors::ConsoleError;

/// Memory figures from `free` (kibibyte units).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_kb: u64,
    pub used_kb: u64,
    pub available_kb: u64,
}

impl MemoryInfo {
    pub fn percent_used(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        self.used_kb as f64 * 100.0 / self.total_kb as f64
    }

    pub fn available_mb(&self) -> u64 {
        self.available_kb / 1024
    }
}

/// Parse the `Mem:` row of `free` output.
///
/// Expected grammar: `Mem: <total> <used> <free> <shared> <buff/cache> <available>`.
pub fn parse_memory(output: &str) -> Result<MemoryInfo, ConsoleError> {
    let line = output
        .lines()
        .find(|l| l.trim_start().starts_with("Mem:"))
        .ok_or_else(|| ConsoleError::Parse("free output has no Mem: row".to_string()))?;

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return Err(ConsoleError::Parse(format!(
            "malformed free Mem: row: {}",
            line.trim()
        )));
    }

    let parse_field = |idx: usize, name: &str| -> Result<u64, ConsoleError> {
        fields[idx]
            .parse()
            .map_err(|_| ConsoleError::Parse(format!("free {} is not a number: {}", name, fields[idx])))
    };

    Ok(MemoryInfo {
        total_kb: parse_field(1, "total")?,
        used_kb: parse_field(2, "used")?,
        available_kb: parse_field(6, "available")?,
    })
}

/// Parse a bare count such as `docker ps -q | wc -l` output.
pub fn parse_count(output: &str) -> Result<usize, ConsoleError> {
    output
        .trim()
        .parse()
        .map_err(|_| ConsoleError::Parse(format!("expected a count, got: {}", output.trim())))
}

/// Interpret pgrep output: at least one non-blank line means the
/// detection pattern matched a running process. Only meaningful for
/// stdout of a command that genuinely executed (see `RemoteChannel`).
pub fn parse_detection(output: &str) -> bool {
    output.lines().any(|l| !l.trim().is_empty())
}

/// mysqladmin ping reports liveness with a "mysqld is alive" line.
pub fn parse_mysql_alive(output: &str) -> bool {
    output.contains("alive")
}

/// redis-cli PING answers PONG when the store is reachable.
pub fn parse_redis_pong(output: &str) -> bool {
    output.contains("PONG")
}

/// Parse the last whitespace-separated token of a line as an integer,
/// e.g. the value column of `SHOW STATUS LIKE 'Threads_connected'`.
pub fn parse_trailing_uint(line: &str) -> Result<u64, ConsoleError> {
    line.split_whitespace()
        .last()
        .ok_or_else(|| ConsoleError::Parse("empty line where a value was expected".to_string()))?
        .parse()
        .map_err(|_| ConsoleError::Parse(format!("trailing field is not a number: {}", line.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE_OUTPUT: &str = "\
              total        used        free      shared  buff/cache   available
Mem:        3918848     3526963      130048       12032      261837      180224
Swap:             0           0           0
";

    #[test]
    fn test_parse_memory() {
        let mem = parse_memory(FREE_OUTPUT).unwrap();
        assert_eq!(mem.total_kb, 3918848);
        assert_eq!(mem.used_kb, 3526963);
        assert_eq!(mem.available_mb(), 176);
        assert!((mem.percent_used() - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_parse_memory_missing_row() {
        let err = parse_memory("no such output").unwrap_err();
        assert!(matches!(err, ConsoleError::Parse(_)));
    }

    #[test]
    fn test_parse_memory_malformed_row() {
        let err = parse_memory("Mem: 100 abc 1 1 1 1").unwrap_err();
        assert!(matches!(err, ConsoleError::Parse(_)));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("7\n").unwrap(), 7);
        assert!(parse_count("").is_err());
        assert!(parse_count("seven").is_err());
    }

    #[test]
    fn test_parse_detection() {
        assert!(parse_detection("1234\n5678\n"));
        assert!(!parse_detection(""));
        assert!(!parse_detection("   \n"));
    }

    #[test]
    fn test_parse_pings() {
        assert!(parse_mysql_alive("mysqld is alive\n"));
        assert!(!parse_mysql_alive(""));
        assert!(parse_redis_pong("PONG\n"));
        assert!(!parse_redis_pong("NOAUTH Authentication required."));
    }

    #[test]
    fn test_parse_trailing_uint() {
        assert_eq!(parse_trailing_uint("Threads_connected\t42").unwrap(), 42);
        assert!(parse_trailing_uint("").is_err());
        assert!(parse_trailing_uint("Threads_connected many").is_err());
    }
}
