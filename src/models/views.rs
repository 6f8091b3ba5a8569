use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodSummary {
    pub total: usize,
    pub running: usize,
    pub pending: usize,
    pub failed: usize,
    pub other: usize,
    pub restarts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub total: usize,
    pub ready: usize,
    pub progressing: usize,
    pub degraded: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSummary {
    pub total: usize,
    pub ready: usize,
    pub not_ready: usize,
}

/// A pod whose summed container restarts reached the alert threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartAlert {
    pub pod_name: String,
    pub total_restarts: u64,
    pub last_restart: Option<DateTime<FixedOffset>>,
    pub phase: String,
}
