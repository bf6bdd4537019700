use serde::Serialize;
use tracing::{info, info_span};

/// Domain event for audit logging.
/// Structured for JSON serialization to enable machine-readable audit trails.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// The service finished starting.
    SystemStartup {
        /// Component that started.
        component: String,
    },
    /// The service is stopping.
    SystemShutdown {
        /// Why it is stopping.
        reason: String,
    },
    /// A task was permanently removed.
    TaskDeleted {
        /// Identifier of the removed task.
        task_id: String,
    },
}

/// Logs an audit event to the dedicated audit channel as structured JSON.
/// Uses the `audit` target so a subscriber can route it separately.
pub fn log_audit(event: &AuditEvent) {
    let span = info_span!(target: "audit", "audit_event");
    let _enter = span.enter();

    let json = serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    info!(target: "audit", audit_json = %json, "Audit Event");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_audit_variants() {
        log_audit(&AuditEvent::SystemStartup {
            component: "Test".into(),
        });
        log_audit(&AuditEvent::SystemShutdown {
            reason: "Testing".into(),
        });
        log_audit(&AuditEvent::TaskDeleted {
            task_id: "abc".into(),
        });
    }

    #[test]
    fn test_audit_event_json_shape() {
        let json = serde_json::to_string(&AuditEvent::TaskDeleted {
            task_id: "abc".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"event_type":"task_deleted","task_id":"abc"}"#);
    }
}
