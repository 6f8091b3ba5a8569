use serde::de::DeserializeOwned;
use tracing::warn;

use crate::clients::ClusterQuery;
use crate::config::EnvironmentConfig;
use crate::errors::{QueryError, QueryResult};
use crate::models::k8s::{Deployment, DeploymentList, Node, NodeList, Pod, PodList, PodPhase};
use crate::models::views::{DeploymentSummary, NodeSummary, PodSummary};

pub const GET_PODS: [&str; 4] = ["get", "pods", "-o", "json"];
pub const GET_DEPLOYMENTS: [&str; 4] = ["get", "deployments", "-o", "json"];
pub const GET_NODES: [&str; 4] = ["get", "nodes", "-o", "json"];

pub fn summarize_pods(pods: &[Pod]) -> PodSummary {
    let mut summary = PodSummary {
        total: pods.len(),
        ..Default::default()
    };

    for pod in pods {
        match pod.phase() {
            PodPhase::Running => summary.running += 1,
            PodPhase::Pending => summary.pending += 1,
            PodPhase::Failed => summary.failed += 1,
            PodPhase::Unknown | PodPhase::Other => summary.other += 1,
        }
        summary.restarts += pod.total_restarts();
    }

    summary
}

pub fn summarize_deployments(deployments: &[Deployment]) -> DeploymentSummary {
    let mut summary = DeploymentSummary {
        total: deployments.len(),
        ..Default::default()
    };

    for d in deployments {
        let desired = d.spec.replicas;
        let available = d.status.available_replicas;

        // Zero desired with zero available counts as ready.
        if available == desired {
            summary.ready += 1;
        } else if available > 0 {
            summary.progressing += 1;
        } else {
            summary.degraded += 1;
        }
    }

    summary
}

pub fn summarize_nodes(nodes: &[Node]) -> NodeSummary {
    let ready = nodes.iter().filter(|n| n.is_ready()).count();
    NodeSummary {
        total: nodes.len(),
        ready,
        not_ready: nodes.len() - ready,
    }
}

/// Parses query output, mapping missing/empty output to `missing` and bad JSON
/// (including whitespace-only output) to `InvalidJson`.
pub fn parse_output<T: DeserializeOwned>(output: Option<&str>, missing: QueryError) -> QueryResult<T> {
    let raw = match output {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(missing),
    };
    serde_json::from_str(raw).map_err(|e| {
        warn!(error = %e, "could not parse cluster query output");
        QueryError::InvalidJson
    })
}

pub fn pod_summary_from(output: Option<&str>) -> QueryResult<PodSummary> {
    let list: PodList = parse_output(output, QueryError::FetchPods)?;
    Ok(summarize_pods(&list.items))
}

pub fn deployment_summary_from(output: Option<&str>) -> QueryResult<DeploymentSummary> {
    let list: DeploymentList = parse_output(output, QueryError::FetchDeployments)?;
    Ok(summarize_deployments(&list.items))
}

/// Every node failure, including bad JSON, collapses to `FetchNodes`.
pub fn node_summary_from(output: Option<&str>) -> QueryResult<NodeSummary> {
    let list: NodeList =
        parse_output(output, QueryError::FetchNodes).map_err(|_| QueryError::FetchNodes)?;
    Ok(summarize_nodes(&list.items))
}

pub async fn fetch_pod_summary<Q: ClusterQuery>(q: &Q, env: &EnvironmentConfig) -> QueryResult<PodSummary> {
    let output = q.query(&env.context, Some(env.namespace.as_str()), &GET_PODS).await;
    pod_summary_from(output.as_deref())
}

pub async fn fetch_deployment_summary<Q: ClusterQuery>(
    q: &Q,
    env: &EnvironmentConfig,
) -> QueryResult<DeploymentSummary> {
    let output = q.query(&env.context, Some(env.namespace.as_str()), &GET_DEPLOYMENTS).await;
    deployment_summary_from(output.as_deref())
}

/// Nodes are cluster scoped, so the namespace is not passed.
pub async fn fetch_node_summary<Q: ClusterQuery>(q: &Q, env: &EnvironmentConfig) -> QueryResult<NodeSummary> {
    let output = q.query(&env.context, None, &GET_NODES).await;
    node_summary_from(output.as_deref())
}
