//! Static catalogs of known services and containers on the managed host

use serde::{Deserialize, Serialize};

/// A known long-running process on the managed host.
///
/// The detection pattern feeds `pgrep -f` and `pkill -f`; a service is
/// considered running when the pattern matches at least one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Logical name used on the command line
    pub name: String,

    /// Alternate names accepted by `restart` and `logs`
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Process detection pattern (pgrep -f)
    pub pattern: String,

    /// Port the service's health endpoint listens on
    pub port: u16,

    /// Working directory for the start command
    pub start_dir: String,

    /// Shell command that starts the service (run from `start_dir`)
    pub start_cmd: String,

    /// Path of the service log file on the host
    pub log_path: String,
}

impl ServiceDescriptor {
    /// Whether `name` refers to this service, by name or alias.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Find a service descriptor by name or alias.
pub fn lookup<'a>(services: &'a [ServiceDescriptor], name: &str) -> Option<&'a ServiceDescriptor> {
    services.iter().find(|s| s.matches(name))
}

/// Default service catalog for the managed host.
pub fn default_services() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor {
            name: "auth".to_string(),
            aliases: vec!["zervigo".to_string(), "unified-auth".to_string()],
            pattern: "unified-auth".to_string(),
            port: 8207,
            start_dir: "/opt/services/zervigo".to_string(),
            start_cmd: "nohup ./unified-auth > logs/unified-auth.log 2>&1 &".to_string(),
            log_path: "/opt/services/zervigo/logs/unified-auth.log".to_string(),
        },
        ServiceDescriptor {
            name: "ai-service".to_string(),
            aliases: vec!["ai".to_string(), "inference".to_string()],
            pattern: "ai_service_with_zervigo".to_string(),
            port: 8100,
            start_dir: "/opt/services/ai-service-1/current".to_string(),
            start_cmd:
                "source venv/bin/activate && nohup python ai_service_with_zervigo.py > logs/ai_service_1.log 2>&1 &"
                    .to_string(),
            log_path: "/opt/services/ai-service-1/current/logs/ai_service_1.log".to_string(),
        },
    ]
}

/// Containers whose memory caps are inspected by the optimize workflow.
pub fn default_memory_limit_containers() -> Vec<String> {
    vec![
        "test-mysql".to_string(),
        "test-elasticsearch".to_string(),
        "test-neo4j".to_string(),
    ]
}
