use std::io::Write;

use tracing::warn;

use crate::clients::ClusterQuery;
use crate::config::{EnvironmentConfig, Registry};
use crate::errors::{AppResult, QueryResult};
use crate::models::views::{DeploymentSummary, NodeSummary, PodSummary};
use crate::report::{Health, deployment_health, node_health, pod_health};
use crate::summary::{fetch_deployment_summary, fetch_node_summary, fetch_pod_summary};

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentStatus {
    pub pods: QueryResult<PodSummary>,
    pub deployments: QueryResult<DeploymentSummary>,
    pub nodes: QueryResult<NodeSummary>,
}

pub async fn collect_status<Q: ClusterQuery>(q: &Q, env: &EnvironmentConfig) -> EnvironmentStatus {
    EnvironmentStatus {
        pods: fetch_pod_summary(q, env).await,
        deployments: fetch_deployment_summary(q, env).await,
        nodes: fetch_node_summary(q, env).await,
    }
}

pub fn render_environment<W: Write>(
    out: &mut W,
    env: &EnvironmentConfig,
    status: &EnvironmentStatus,
) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "📍 {}", env.display_name())?;
    writeln!(out, "   Context: {}", env.context)?;
    writeln!(out, "   Namespace: {}", env.namespace)?;
    writeln!(out, "{}", rule)?;

    match &status.pods {
        Err(e) => writeln!(out, "\n{} Pods: {}", Health::Critical, e)?,
        Ok(pods) => {
            writeln!(
                out,
                "\n{} Pods: {}/{} running",
                pod_health(pods),
                pods.running,
                pods.total
            )?;
            if pods.pending > 0 {
                writeln!(out, "   ⏳ Pending: {}", pods.pending)?;
            }
            if pods.failed > 0 {
                writeln!(out, "   ❌ Failed: {}", pods.failed)?;
            }
            if pods.restarts > 0 {
                writeln!(out, "   🔄 Total restarts: {}", pods.restarts)?;
            }
        }
    }

    match &status.deployments {
        Err(e) => writeln!(out, "\n{} Deployments: {}", Health::Critical, e)?,
        Ok(d) => {
            writeln!(
                out,
                "\n{} Deployments: {}/{} ready",
                deployment_health(d),
                d.ready,
                d.total
            )?;
            if d.progressing > 0 {
                writeln!(out, "   🔄 Progressing: {}", d.progressing)?;
            }
            if d.degraded > 0 {
                writeln!(out, "   ❌ Degraded: {}", d.degraded)?;
            }
        }
    }

    // Node failures are left out of the report.
    match &status.nodes {
        Ok(n) => writeln!(out, "\n{} Nodes: {}/{} ready", node_health(n), n.ready, n.total)?,
        Err(e) => warn!(environment = %env.key, reason = %e, "skipping node line"),
    }

    Ok(())
}

/// Prints the status report for `selection` (`all` or one key). An unknown key
/// fails before anything is queried or printed.
pub async fn run_status_report<Q: ClusterQuery, W: Write>(
    q: &Q,
    registry: &Registry,
    selection: &str,
    out: &mut W,
) -> AppResult<()> {
    let envs = registry.select(selection)?;

    writeln!(out, "🔍 Kubernetes Cluster Status Report")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    for env in envs {
        let status = collect_status(q, env).await;
        render_environment(out, env, &status)?;
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "✅ Status check complete")?;
    Ok(())
}
