pub mod restarts;
pub mod status;

use std::fmt;

use crate::models::views::{DeploymentSummary, NodeSummary, PodSummary};

/// Traffic-light marker printed in front of each resource line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Warning,
    Critical,
}

impl Health {
    pub fn icon(self) -> &'static str {
        match self {
            Health::Healthy => "🟢",
            Health::Warning => "🟡",
            Health::Critical => "🔴",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.icon())
    }
}

pub fn pod_health(s: &PodSummary) -> Health {
    if s.failed > 0 {
        Health::Critical
    } else if s.pending > 0 {
        Health::Warning
    } else {
        Health::Healthy
    }
}

pub fn deployment_health(s: &DeploymentSummary) -> Health {
    if s.degraded > 0 {
        Health::Critical
    } else {
        Health::Healthy
    }
}

pub fn node_health(s: &NodeSummary) -> Health {
    if s.not_ready > 0 {
        Health::Critical
    } else {
        Health::Healthy
    }
}

pub const CRITICAL_RESTARTS: u64 = 10;

pub fn restart_health(total_restarts: u64) -> Health {
    if total_restarts >= CRITICAL_RESTARTS {
        Health::Critical
    } else {
        Health::Warning
    }
}
