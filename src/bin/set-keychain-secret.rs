use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use opskit::cli::KeychainCli;
use opskit::clients::keychain::Keychain;
use opskit::config::default_account;
use opskit::secrets::{SecretError, read_secret, store_secret};

#[tokio::main]
async fn main() -> ExitCode {
    opskit::logging::init();

    let cli = KeychainCli::parse();
    let secret = match read_secret(cli.stdin, cli.value.as_deref(), io::stdin().lock()) {
        Ok(s) => s,
        Err(e @ SecretError::Empty) => KeychainCli::command()
            .error(ErrorKind::MissingRequiredArgument, e.to_string())
            .exit(),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let account = cli.account.unwrap_or_else(default_account);
    let keychain = Keychain::new();

    match store_secret(&keychain, &account, &cli.service, &secret, !cli.no_verify).await {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
