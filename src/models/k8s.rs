use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Subset of the Kubernetes object schema that `kubectl get ... -o json` emits.
// Every field carries a default so a sparse item still parses, and leaf values
// of the wrong JSON type read as absent instead of failing the whole list.

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(lenient_string(d)?.unwrap_or_default())
}

/// Non-negative integer counts; anything else reads as zero.
fn lenient_count<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|v| T::try_from(v).ok()).unwrap_or_default(),
        _ => T::default(),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub namespace: Option<String>,
}

// --- Pod ---

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: PodStatus,
}

impl Pod {
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Raw phase string, `"Unknown"` when the status does not report one.
    pub fn phase_label(&self) -> &str {
        self.status.phase.as_deref().unwrap_or("Unknown")
    }

    pub fn phase(&self) -> PodPhase {
        PodPhase::from(self.phase_label())
    }

    pub fn total_restarts(&self) -> u64 {
        self.status
            .container_statuses
            .iter()
            .map(|cs| cs.restart_count)
            .sum()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub phase: Option<String>,
    #[serde(default)]
    pub container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodPhase {
    Running,
    Pending,
    Failed,
    Unknown,
    Other,
}

impl From<&str> for PodPhase {
    fn from(s: &str) -> Self {
        match s {
            "Running" => PodPhase::Running,
            "Pending" => PodPhase::Pending,
            "Failed" => PodPhase::Failed,
            "Unknown" => PodPhase::Unknown,
            _ => PodPhase::Other,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub restart_count: u64,
    #[serde(default)]
    pub last_state: ContainerState,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContainerState {
    #[serde(default)]
    pub terminated: Option<ContainerStateTerminated>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStateTerminated {
    #[serde(default, deserialize_with = "lenient_string")]
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PodList {
    #[serde(default)]
    pub items: Vec<Pod>,
}

// --- Deployment ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Deployment {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DeploymentSpec,
    #[serde(default)]
    pub status: DeploymentStatus,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeploymentSpec {
    #[serde(default, deserialize_with = "lenient_count")]
    pub replicas: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    #[serde(default, deserialize_with = "lenient_count")]
    pub available_replicas: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeploymentList {
    #[serde(default)]
    pub items: Vec<Deployment>,
}

// --- Node ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Node {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: NodeStatus,
}

impl Node {
    pub fn is_ready(&self) -> bool {
        self.status
            .conditions
            .iter()
            .any(|c| c.condition_type == "Ready" && c.status == "True")
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NodeStatus {
    #[serde(default)]
    pub conditions: Vec<NodeCondition>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NodeCondition {
    #[serde(default, rename = "type", deserialize_with = "lenient_string_or_empty")]
    pub condition_type: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NodeList {
    #[serde(default)]
    pub items: Vec<Node>,
}
