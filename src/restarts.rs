use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use crate::clients::ClusterQuery;
use crate::config::EnvironmentConfig;
use crate::errors::QueryError;
use crate::helpers::parse_timestamp;
use crate::models::k8s::{Pod, PodList};
use crate::models::views::RestartAlert;
use crate::summary::{GET_PODS, parse_output};

pub const DEFAULT_THRESHOLD: i64 = 3;

/// Most recent `lastState.terminated.finishedAt` across a pod's containers.
/// Unparseable timestamps are skipped.
pub fn last_restart(pod: &Pod) -> Option<DateTime<FixedOffset>> {
    pod.status
        .container_statuses
        .iter()
        .filter_map(|cs| cs.last_state.terminated.as_ref())
        .filter_map(|t| t.finished_at.as_deref())
        .filter_map(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(pod = %pod.name(), finished_at = %raw, "ignoring malformed timestamp");
            }
            parsed
        })
        .max()
}

/// Pods whose summed restart count is at least `threshold`, most restarts first.
/// A threshold of zero or below selects every pod.
pub fn extract_restart_alerts(pods: &[Pod], threshold: i64) -> Vec<RestartAlert> {
    let mut alerts: Vec<RestartAlert> = pods
        .iter()
        .filter(|pod| i128::from(pod.total_restarts()) >= i128::from(threshold))
        .map(|pod| RestartAlert {
            pod_name: pod.name().to_string(),
            total_restarts: pod.total_restarts(),
            last_restart: last_restart(pod),
            phase: pod.phase_label().to_string(),
        })
        .collect();

    // sort_by is stable, so equal counts keep cluster order.
    alerts.sort_by(|a, b| b.total_restarts.cmp(&a.total_restarts));
    alerts
}

/// Alerts from raw `kubectl get pods -o json` output. No output and bad JSON
/// both yield an empty list.
pub fn restart_alerts_from(output: Option<&str>, threshold: i64) -> Vec<RestartAlert> {
    match parse_output::<PodList>(output, QueryError::FetchPods) {
        Ok(list) => extract_restart_alerts(&list.items, threshold),
        Err(e) => {
            warn!(reason = %e, "no pod data; reporting no restart alerts");
            Vec::new()
        }
    }
}

pub async fn fetch_restart_alerts<Q: ClusterQuery>(
    q: &Q,
    env: &EnvironmentConfig,
    threshold: i64,
) -> Vec<RestartAlert> {
    let output = q
        .query(&env.context, Some(env.namespace.as_str()), &GET_PODS)
        .await;
    restart_alerts_from(output.as_deref(), threshold)
}
