use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{AppError, AppResult};

pub const ALL_ENVIRONMENTS: &str = "all";

const EKS_PRODUCTION_CONTEXT: &str = "arn:aws:eks:us-east-1:830101142436:cluster/production";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentConfig {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    pub context: String,
    pub namespace: String,
}

impl EnvironmentConfig {
    fn new(key: &str, name: &str, alias: &str, context: &str, namespace: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            alias: alias.to_string(),
            context: context.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Header label, e.g. `Production (k1)`.
    pub fn display_name(&self) -> String {
        if self.alias.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.alias)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    environments: Vec<EnvironmentConfig>,
}

/// Environments in the order they are reported.
#[derive(Debug, Clone)]
pub struct Registry {
    environments: Vec<EnvironmentConfig>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            environments: vec![
                EnvironmentConfig::new(
                    "prod",
                    "Production",
                    "k1",
                    EKS_PRODUCTION_CONTEXT,
                    "production",
                ),
                EnvironmentConfig::new(
                    "staging",
                    "Staging",
                    "k2",
                    EKS_PRODUCTION_CONTEXT,
                    "staging",
                ),
                EnvironmentConfig::new("local", "Local K3s", "k", "k3s-117", "simplex"),
            ],
        }
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("reading config {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> AppResult<Self> {
        let file: RegistryFile = serde_yaml::from_str(data)?;
        Self::from_environments(file.environments)
    }

    pub fn from_environments(environments: Vec<EnvironmentConfig>) -> AppResult<Self> {
        if environments.is_empty() {
            return Err(AppError::Config(
                "at least one environment must be configured".into(),
            ));
        }

        let mut seen = HashSet::new();
        for env in &environments {
            if env.key == ALL_ENVIRONMENTS {
                return Err(AppError::Config(format!(
                    "environment key {:?} is reserved",
                    ALL_ENVIRONMENTS
                )));
            }
            if !seen.insert(env.key.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate environment key {:?}",
                    env.key
                )));
            }
        }

        Ok(Self { environments })
    }

    /// Built-in registry unless a file is given.
    pub fn load_or_builtin(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|e| e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|e| e.key.as_str())
    }

    /// Resolves `all` or a single key to the environments to check.
    pub fn select(&self, selection: &str) -> AppResult<Vec<&EnvironmentConfig>> {
        if selection == ALL_ENVIRONMENTS {
            return Ok(self.environments.iter().collect());
        }
        self.get(selection)
            .map(|e| vec![e])
            .ok_or_else(|| AppError::UnknownEnvironment(selection.to_string()))
    }
}

// --- Key verification ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Anthropic,
    OpenAi,
}

#[derive(Debug, Clone, Copy)]
pub struct VendorProfile {
    pub vendor: Vendor,
    pub label: &'static str,
    pub key_env: &'static str,
    pub base_url_env: &'static str,
    pub default_base_url: &'static str,
    pub project_env: Option<&'static str>,
    pub keychain_service: &'static str,
}

pub const ANTHROPIC: VendorProfile = VendorProfile {
    vendor: Vendor::Anthropic,
    label: "anthropic",
    key_env: "ANTHROPIC_API_KEY",
    base_url_env: "ANTHROPIC_BASE_URL",
    default_base_url: "https://api.anthropic.com/v1",
    project_env: None,
    keychain_service: "mde-anthropic-api-key",
};

pub const OPENAI: VendorProfile = VendorProfile {
    vendor: Vendor::OpenAi,
    label: "openai",
    key_env: "OPENAI_API_KEY",
    base_url_env: "OPENAI_BASE_URL",
    default_base_url: "https://api.openai.com/v1",
    project_env: Some("OPENAI_PROJECT"),
    keychain_service: "mde-openai-api-key",
};

pub const SECRET_OVERRIDE_ENV: &str = "MDE_SECRET_OVERRIDE";

/// Settings a verifier reads from the process environment.
#[derive(Debug, Clone, Default)]
pub struct VerifierEnv {
    pub env_key: Option<String>,
    pub base_url: String,
    pub project: Option<String>,
    pub prefer_keychain: bool,
    pub account: String,
}

impl VerifierEnv {
    pub fn from_env(profile: &VendorProfile) -> Self {
        Self::from_lookup(profile, |name| std::env::var(name).ok())
    }

    pub fn from_lookup(profile: &VendorProfile, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            env_key: non_empty(profile.key_env),
            base_url: lookup(profile.base_url_env)
                .unwrap_or_else(|| profile.default_base_url.to_string()),
            project: profile.project_env.and_then(non_empty),
            prefer_keychain: lookup(SECRET_OVERRIDE_ENV).as_deref().unwrap_or("1") == "1",
            account: lookup("USER").unwrap_or_default(),
        }
    }
}

pub fn default_account() -> String {
    std::env::var("USER").unwrap_or_default()
}
