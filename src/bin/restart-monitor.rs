use std::io;
use std::process::ExitCode;

use clap::Parser;
use opskit::cli::RestartCli;
use opskit::clients::Kubectl;
use opskit::config::Registry;
use opskit::errors::AppError;
use opskit::report::restarts::run_restart_monitor;

#[tokio::main]
async fn main() -> ExitCode {
    opskit::logging::init();

    let cli = RestartCli::parse();
    let registry = match Registry::load_or_builtin(cli.config.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut out = io::stdout().lock();
    match run_restart_monitor(&Kubectl::new(), &registry, &cli.env, cli.threshold, &mut out).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e @ AppError::UnknownEnvironment(_)) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
