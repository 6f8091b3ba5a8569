use std::io;
use std::process::ExitCode;

use clap::Parser;
use opskit::cli::StatusCli;
use opskit::clients::Kubectl;
use opskit::config::Registry;
use opskit::errors::AppError;
use opskit::report::status::run_status_report;

#[tokio::main]
async fn main() -> ExitCode {
    opskit::logging::init();

    let cli = StatusCli::parse();
    let registry = match Registry::load_or_builtin(cli.config.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut out = io::stdout().lock();
    match run_status_report(&Kubectl::new(), &registry, &cli.env, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
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
