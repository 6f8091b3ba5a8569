pub mod keychain;
pub mod models_api;

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

pub const KUBECTL_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a cluster query and hands back stdout, or `None` when the query did not
/// succeed for any reason.
pub trait ClusterQuery {
    fn query(
        &self,
        context: &str,
        namespace: Option<&str>,
        args: &[&str],
    ) -> impl Future<Output = Option<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct Kubectl {
    program: String,
    timeout: Duration,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new()
    }
}

impl Kubectl {
    pub fn new() -> Self {
        Self {
            program: "kubectl".to_string(),
            timeout: KUBECTL_TIMEOUT,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command_args(context: &str, namespace: Option<&str>, args: &[&str]) -> Vec<String> {
        let mut out = vec![format!("--context={}", context)];
        if let Some(ns) = namespace {
            out.push(format!("-n={}", ns));
        }
        out.extend(args.iter().map(|a| a.to_string()));
        out
    }
}

impl ClusterQuery for Kubectl {
    async fn query(&self, context: &str, namespace: Option<&str>, args: &[&str]) -> Option<String> {
        let argv = Self::command_args(context, namespace, args);
        debug!(program = %self.program, args = ?argv, "running cluster query");

        let mut cmd = Command::new(&self.program);
        cmd.args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(context, namespace = ?namespace, error = %e, "failed to run {}", self.program);
                return None;
            }
            Err(_) => {
                warn!(
                    context,
                    namespace = ?namespace,
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                );
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                context,
                namespace = ?namespace,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "{} exited unsuccessfully",
                self.program
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ClusterQuery;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned responses keyed by resource name (`pods`, `deployments`, `nodes`).
    #[derive(Default)]
    pub struct FakeCluster {
        responses: HashMap<String, String>,
        pub calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeCluster {
        pub fn with(mut self, resource: &str, body: &str) -> Self {
            self.responses.insert(resource.to_string(), body.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl ClusterQuery for FakeCluster {
        async fn query(
            &self,
            context: &str,
            namespace: Option<&str>,
            args: &[&str],
        ) -> Option<String> {
            self.calls
                .lock()
                .unwrap()
                .push(super::Kubectl::command_args(context, namespace, args));
            let resource = args.get(1)?;
            self.responses.get(*resource).cloned()
        }
    }
}
