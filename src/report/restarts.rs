use std::io::Write;

use chrono::{DateTime, Utc};

use crate::clients::ClusterQuery;
use crate::config::{EnvironmentConfig, Registry};
use crate::errors::AppResult;
use crate::helpers::format_time_ago_at;
use crate::models::views::RestartAlert;
use crate::report::restart_health;
use crate::restarts::fetch_restart_alerts;

const RULE_WIDTH: usize = 50;

pub fn render_environment<W: Write>(
    out: &mut W,
    env: &EnvironmentConfig,
    threshold: i64,
    alerts: &[RestartAlert],
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    writeln!(out, "\n📍 {}", env.display_name())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    if alerts.is_empty() {
        writeln!(out, "   ✅ No pods with {}+ restarts", threshold)?;
        return Ok(());
    }

    writeln!(
        out,
        "   ⚠️  Found {} pod(s) with {}+ restarts:\n",
        alerts.len(),
        threshold
    )?;

    for alert in alerts {
        writeln!(out, "   {} {}", restart_health(alert.total_restarts), alert.pod_name)?;
        writeln!(
            out,
            "      Restarts: {} | Last: {} | Status: {}",
            alert.total_restarts,
            format_time_ago_at(alert.last_restart, now),
            alert.phase
        )?;
    }

    Ok(())
}

/// Prints the restart report and returns how many pods crossed the threshold
/// across every checked environment.
pub async fn run_restart_monitor<Q: ClusterQuery, W: Write>(
    q: &Q,
    registry: &Registry,
    selection: &str,
    threshold: i64,
    out: &mut W,
) -> AppResult<usize> {
    let envs = registry.select(selection)?;

    writeln!(out, "🔄 Pod Restart Monitor")?;
    writeln!(out, "   Threshold: {}+ restarts", threshold)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let mut total_issues = 0;
    for env in envs {
        let alerts = fetch_restart_alerts(q, env, threshold).await;
        render_environment(out, env, threshold, &alerts, Utc::now())?;
        total_issues += alerts.len();
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    if total_issues > 0 {
        writeln!(out, "⚠️  Total: {} pod(s) need attention", total_issues)?;
    } else {
        writeln!(out, "✅ All pods healthy")?;
    }

    Ok(total_issues)
}
