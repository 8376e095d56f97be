// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail alerts (closures, hazards, conditions).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum AlertSeverity {
    #[default]
    Info,
    Warning,
    Danger,
}

/// Stored alert record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Alert {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub trail_id: String,
    pub message: String,
    #[serde(default)]
    pub severity: AlertSeverity,
    /// Whether the alert is still shown on the trail
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub resolved_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Alert {
    /// Mark the alert resolved. Returns `false` if it already was.
    pub fn resolve(&mut self, now: &str) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.resolved_at = Some(now.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alert_defaults() {
        let alert: Alert = serde_json::from_value(json!({
            "trailId": "t1",
            "message": "Bridge out",
            "createdAt": "2026-03-01T00:00:00Z"
        }))
        .unwrap();
        assert!(alert.active);
        assert_eq!(alert.severity, AlertSeverity::Info);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut alert: Alert = serde_json::from_value(json!({
            "trailId": "t1",
            "message": "Mud",
            "severity": "warning",
            "createdAt": "2026-03-01T00:00:00Z"
        }))
        .unwrap();

        assert!(alert.resolve("2026-03-02T00:00:00Z"));
        assert!(!alert.active);
        assert!(!alert.resolve("2026-03-03T00:00:00Z"));
        assert_eq!(alert.resolved_at.as_deref(), Some("2026-03-02T00:00:00Z"));
    }
}
