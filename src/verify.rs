use std::fmt;
use std::io::Write;

use crate::clients::keychain::Keychain;
use crate::clients::models_api::{KeyCheck, ModelsClient};
use crate::config::{VendorProfile, VerifierEnv};
use crate::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Keychain,
    Env,
    Cli,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeySource::Keychain => "keychain",
            KeySource::Env => "env",
            KeySource::Cli => "cli",
        })
    }
}

/// Keychain wins when preferred; otherwise the environment, then the keychain.
pub fn choose_key(
    prefer_keychain: bool,
    env_key: Option<String>,
    keychain_key: Option<String>,
) -> Option<(String, KeySource)> {
    let keychain_key = keychain_key.filter(|k| !k.is_empty());
    let env_key = env_key.filter(|k| !k.is_empty());

    if prefer_keychain {
        if let Some(k) = keychain_key {
            return Some((k, KeySource::Keychain));
        }
        return env_key.map(|k| (k, KeySource::Env));
    }
    env_key
        .map(|k| (k, KeySource::Env))
        .or_else(|| keychain_key.map(|k| (k, KeySource::Keychain)))
}

/// Same precedence as `choose_key`, reading the keychain only when needed.
pub async fn resolve_key(
    profile: &VendorProfile,
    env: &VerifierEnv,
    keychain: &Keychain,
) -> Option<(String, KeySource)> {
    if !env.prefer_keychain && env.env_key.is_some() {
        return choose_key(false, env.env_key.clone(), None);
    }
    let stored = keychain
        .find_optional(&env.account, profile.keychain_service)
        .await;
    choose_key(env.prefer_keychain, env.env_key.clone(), stored)
}

pub fn missing_key_message(profile: &VendorProfile) -> String {
    format!(
        "error: {} missing (env or keychain: {})",
        profile.key_env, profile.keychain_service
    )
}

pub fn render_check<W: Write>(
    out: &mut W,
    label: &str,
    source: KeySource,
    check: &KeyCheck,
) -> std::io::Result<()> {
    let status = check
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "None".to_string());

    if check.is_valid() {
        writeln!(out, "ok: {} key valid ({})", label, source)?;
        writeln!(out, "status: {}", status)?;
        return Ok(());
    }

    writeln!(out, "error: {} key invalid ({})", label, source)?;
    writeln!(out, "status: {}", status)?;
    if !check.body.is_empty() {
        writeln!(out, "response: {}", check.body)?;
    }
    Ok(())
}

/// Probes `<base_url>/models` with `key` and prints the verdict. Returns whether
/// the key was accepted.
pub async fn verify_key<W: Write>(
    profile: &VendorProfile,
    key: &str,
    source: KeySource,
    base_url: &str,
    project: Option<&str>,
    out: &mut W,
) -> AppResult<bool> {
    let client = ModelsClient::new(base_url)?;
    let check = client.check(profile.vendor, key, project).await?;
    render_check(out, profile.label, source, &check)?;
    Ok(check.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ANTHROPIC, OPENAI};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn keychain_preferred() {
        assert_eq!(
            choose_key(true, s("env"), s("kc")),
            Some(("kc".into(), KeySource::Keychain))
        );
        assert_eq!(choose_key(true, s("env"), None), Some(("env".into(), KeySource::Env)));
        assert_eq!(choose_key(true, s("env"), s("")), Some(("env".into(), KeySource::Env)));
    }

    #[test]
    fn env_preferred() {
        assert_eq!(choose_key(false, s("env"), s("kc")), Some(("env".into(), KeySource::Env)));
        assert_eq!(
            choose_key(false, None, s("kc")),
            Some(("kc".into(), KeySource::Keychain))
        );
        assert_eq!(choose_key(false, s(""), None), None);
    }

    #[test]
    fn missing_key_names_env_and_service() {
        assert_eq!(
            missing_key_message(&ANTHROPIC),
            "error: ANTHROPIC_API_KEY missing (env or keychain: mde-anthropic-api-key)"
        );
    }

    #[tokio::test]
    async fn resolve_without_keychain_falls_back_to_env() {
        let env = VerifierEnv {
            env_key: s("sk-env"),
            prefer_keychain: true,
            ..Default::default()
        };
        let kc = Keychain::with_program("/nonexistent/security");
        assert_eq!(
            resolve_key(&OPENAI, &env, &kc).await,
            Some(("sk-env".into(), KeySource::Env))
        );

        let env = VerifierEnv::default();
        assert_eq!(resolve_key(&OPENAI, &env, &kc).await, None);
    }

    #[test]
    fn render_failure_with_body() {
        let mut buf = Vec::new();
        let check = KeyCheck { status: Some(401), body: "invalid x-api-key".into() };
        render_check(&mut buf, "anthropic", KeySource::Env, &check).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "error: anthropic key invalid (env)\nstatus: 401\nresponse: invalid x-api-key\n"
        );
    }

    #[test]
    fn render_transport_failure() {
        let mut buf = Vec::new();
        let check = KeyCheck { status: None, body: "error sending request".into() };
        render_check(&mut buf, "openai", KeySource::Cli, &check).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "error: openai key invalid (cli)\nstatus: None\nresponse: error sending request\n"
        );
    }

    #[tokio::test]
    async fn verify_prints_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("authorization", "Bearer sk-good"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut buf = Vec::new();
        let base = format!("{}/v1/", server.uri());
        let ok = verify_key(&OPENAI, "sk-good", KeySource::Keychain, &base, None, &mut buf)
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ok: openai key valid (keychain)\nstatus: 200\n"
        );
    }
}
