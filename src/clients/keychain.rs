use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Generic-password access through the macOS `security` tool.
#[derive(Debug, Clone)]
pub struct Keychain {
    program: String,
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new()
    }
}

impl Keychain {
    pub fn new() -> Self {
        Self {
            program: "security".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Removes an existing entry. A missing entry is not an error.
    pub async fn delete(&self, account: &str, service: &str) {
        let status = Command::new(&self.program)
            .args(["delete-generic-password", "-a", account, "-s", service])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        debug!(service, status = ?status, "keychain delete");
    }

    pub async fn add(&self, account: &str, service: &str, secret: &str) -> AppResult<()> {
        let output = Command::new(&self.program)
            .args(["add-generic-password", "-a", account, "-s", service, "-w", secret])
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(AppError::Keychain(format!(
                "add-generic-password for {} exited with {}: {}",
                service,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }

    pub async fn find(&self, account: &str, service: &str) -> AppResult<String> {
        let output = Command::new(&self.program)
            .args(["find-generic-password", "-a", account, "-s", service, "-w"])
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(AppError::Keychain(format!(
                "find-generic-password for {} exited with {}",
                service, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Lookup used by the key verifiers: any failure reads as "no key stored".
    pub async fn find_optional(&self, account: &str, service: &str) -> Option<String> {
        match self.find(account, service).await {
            Ok(v) if !v.is_empty() => Some(v),
            Ok(_) => None,
            Err(e) => {
                debug!(service, error = %e, "no keychain entry");
                None
            }
        }
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::testing::fake_security;
    use super::*;

    #[tokio::test]
    async fn add_then_find_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let kc = Keychain::with_program(fake_security(&dir, false).to_string_lossy());

        kc.delete("ops", "svc").await;
        kc.add("ops", "svc", "s3cr3t").await.unwrap();
        assert_eq!(kc.find("ops", "svc").await.unwrap(), "s3cr3t");
    }

    #[tokio::test]
    async fn find_missing_entry_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let kc = Keychain::with_program(fake_security(&dir, false).to_string_lossy());

        assert!(matches!(kc.find("ops", "svc").await, Err(AppError::Keychain(_))));
        assert_eq!(kc.find_optional("ops", "svc").await, None);
    }

    #[tokio::test]
    async fn missing_program() {
        let kc = Keychain::with_program("/nonexistent/security");
        kc.delete("ops", "svc").await;
        assert!(matches!(kc.add("ops", "svc", "x").await, Err(AppError::Io(_))));
        assert_eq!(kc.find_optional("ops", "svc").await, None);
    }
}
