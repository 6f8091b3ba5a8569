use std::path::PathBuf;

use clap::Parser;

use crate::restarts::DEFAULT_THRESHOLD;

const ENV_HELP: &str = "Environment to check: all, prod, staging, local";

#[derive(Debug, Parser)]
#[command(
    name = "cluster-status",
    version,
    about = "Kubernetes cluster status summary"
)]
pub struct StatusCli {
    #[arg(short = 'e', long = "env", default_value = "all", help = ENV_HELP)]
    pub env: String,

    /// YAML file listing environments (replaces the built-in list)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(
    name = "restart-monitor",
    version,
    about = "Report pods with high restart counts"
)]
pub struct RestartCli {
    /// Alert on pods with N or more restarts
    #[arg(
        short = 't',
        long = "threshold",
        default_value_t = DEFAULT_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: i64,

    #[arg(short = 'e', long = "env", default_value = "all", help = ENV_HELP)]
    pub env: String,

    /// YAML file listing environments (replaces the built-in list)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(
    name = "set-keychain-secret",
    version,
    about = "Set a Keychain generic password from stdin or --value"
)]
pub struct KeychainCli {
    /// Keychain service name, e.g. mde-openai-api-key
    #[arg(long = "service")]
    pub service: String,

    /// Keychain account (default: $USER)
    #[arg(long = "account")]
    pub account: Option<String>,

    /// Read secret from stdin
    #[arg(long = "stdin", default_value_t = false)]
    pub stdin: bool,

    /// Secret value (avoid shell history)
    #[arg(long = "value")]
    pub value: Option<String>,

    /// Skip read-back hash verification
    #[arg(long = "no-verify", default_value_t = false)]
    pub no_verify: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "verify-openai-key-cli",
    version,
    about = "Verify an OpenAI API key via /v1/models"
)]
pub struct OpenAiKeyCli {
    /// OpenAI API key to verify (avoid shell history)
    #[arg(long = "key")]
    pub key: Option<String>,

    /// Read API key from stdin
    #[arg(long = "stdin", default_value_t = false)]
    pub stdin: bool,

    /// Override API base URL
    #[arg(long = "base-url", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Optional OpenAI project id (proj_...)
    #[arg(long = "project", default_value = "")]
    pub project: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_valid() {
        StatusCli::command().debug_assert();
        RestartCli::command().debug_assert();
        KeychainCli::command().debug_assert();
        OpenAiKeyCli::command().debug_assert();
    }

    #[test]
    fn restart_defaults() {
        let cli = RestartCli::try_parse_from(["restart-monitor"]).unwrap();
        assert_eq!(cli.threshold, 3);
        assert_eq!(cli.env, "all");

        let cli = RestartCli::try_parse_from(["restart-monitor", "-t", "5", "-e", "local"]).unwrap();
        assert_eq!(cli.threshold, 5);
        assert_eq!(cli.env, "local");
    }

    #[test]
    fn negative_threshold_is_accepted() {
        let cli = RestartCli::try_parse_from(["restart-monitor", "-t", "-1"]).unwrap();
        assert_eq!(cli.threshold, -1);
        assert!(RestartCli::try_parse_from(["restart-monitor", "-t", "many"]).is_err());
    }

    #[test]
    fn keychain_requires_service() {
        assert!(KeychainCli::try_parse_from(["set-keychain-secret", "--value", "x"]).is_err());
        let cli =
            KeychainCli::try_parse_from(["set-keychain-secret", "--service", "svc", "--stdin", "--no-verify"])
                .unwrap();
        assert!(cli.stdin && cli.no_verify);
        assert_eq!(cli.account, None);
    }
}
