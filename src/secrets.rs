use std::io::Read;

use thiserror::Error;
use tracing::info;

use crate::clients::keychain::Keychain;
use crate::errors::AppError;
use crate::helpers::sha256_hex;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret is empty; provide --stdin or --value")]
    Empty,

    #[error("{0}")]
    Store(#[from] AppError),

    #[error("failed to read back secret")]
    ReadBack,

    #[error("stored secret does not match input")]
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    Verified,
}

impl StoreOutcome {
    pub fn message(self) -> &'static str {
        match self {
            StoreOutcome::Stored => "ok: secret stored (verification skipped)",
            StoreOutcome::Verified => "ok: secret stored and verified",
        }
    }
}

/// Stdin wins over `--value`; both are trimmed. An empty result is an error.
pub fn read_secret<R: Read>(
    from_stdin: bool,
    value: Option<&str>,
    mut stdin: R,
) -> Result<String, SecretError> {
    let secret = if from_stdin {
        let mut buf = String::new();
        stdin.read_to_string(&mut buf).map_err(AppError::from)?;
        buf.trim().to_string()
    } else {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    };

    if secret.is_empty() {
        return Err(SecretError::Empty);
    }
    Ok(secret)
}

/// Replaces the keychain entry and, unless skipped, checks the stored value by
/// comparing digests.
pub async fn store_secret(
    keychain: &Keychain,
    account: &str,
    service: &str,
    secret: &str,
    verify: bool,
) -> Result<StoreOutcome, SecretError> {
    keychain.delete(account, service).await;
    keychain.add(account, service, secret).await?;
    info!(service, account, "secret written");

    if !verify {
        return Ok(StoreOutcome::Stored);
    }

    let stored = keychain
        .find(account, service)
        .await
        .map_err(|_| SecretError::ReadBack)?;

    if sha256_hex(&stored) == sha256_hex(secret) {
        Ok(StoreOutcome::Verified)
    } else {
        Err(SecretError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_takes_precedence_and_is_trimmed() {
        let s = read_secret(true, Some("from-flag"), "  from-stdin\n".as_bytes()).unwrap();
        assert_eq!(s, "from-stdin");
    }

    #[test]
    fn value_is_trimmed() {
        let s = read_secret(false, Some(" abc "), std::io::empty()).unwrap();
        assert_eq!(s, "abc");
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert!(matches!(read_secret(false, None, std::io::empty()), Err(SecretError::Empty)));
        assert!(matches!(read_secret(false, Some("   "), std::io::empty()), Err(SecretError::Empty)));
        assert!(matches!(read_secret(true, Some("x"), "\n\n".as_bytes()), Err(SecretError::Empty)));
    }

    #[cfg(unix)]
    mod keychain {
        use super::super::*;
        use crate::clients::keychain::testing::fake_security;

        #[tokio::test]
        async fn verified_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let kc = Keychain::with_program(fake_security(&dir, false).to_string_lossy());

            let outcome = store_secret(&kc, "ops", "svc", "hunter2", true).await.unwrap();
            assert_eq!(outcome, StoreOutcome::Verified);
            assert_eq!(outcome.message(), "ok: secret stored and verified");
        }

        #[tokio::test]
        async fn replaces_existing_entry() {
            let dir = tempfile::tempdir().unwrap();
            let kc = Keychain::with_program(fake_security(&dir, false).to_string_lossy());

            store_secret(&kc, "ops", "svc", "old", true).await.unwrap();
            store_secret(&kc, "ops", "svc", "new", true).await.unwrap();
            assert_eq!(kc.find("ops", "svc").await.unwrap(), "new");
        }

        #[tokio::test]
        async fn skip_verification() {
            let dir = tempfile::tempdir().unwrap();
            let kc = Keychain::with_program(fake_security(&dir, true).to_string_lossy());

            let outcome = store_secret(&kc, "ops", "svc", "hunter2", false).await.unwrap();
            assert_eq!(outcome, StoreOutcome::Stored);
        }

        #[tokio::test]
        async fn mismatch_is_detected() {
            let dir = tempfile::tempdir().unwrap();
            let kc = Keychain::with_program(fake_security(&dir, true).to_string_lossy());

            let err = store_secret(&kc, "ops", "svc", "hunter2", true).await.unwrap_err();
            assert!(matches!(err, SecretError::Mismatch));
            assert_eq!(err.to_string(), "stored secret does not match input");
        }

        #[tokio::test]
        async fn add_failure_surfaces() {
            let kc = Keychain::with_program("/nonexistent/security");
            let err = store_secret(&kc, "ops", "svc", "hunter2", true).await.unwrap_err();
            assert!(matches!(err, SecretError::Store(_)));
        }
    }
}
