use std::io::{self, Read};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use opskit::EXIT_USAGE;
use opskit::cli::OpenAiKeyCli;
use opskit::config::OPENAI;
use opskit::verify::{KeySource, verify_key};

#[tokio::main]
async fn main() -> ExitCode {
    opskit::logging::init();

    let cli = OpenAiKeyCli::parse();
    let key = if cli.stdin {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: reading stdin: {}", e);
            return ExitCode::FAILURE;
        }
        buf.trim().to_string()
    } else if let Some(key) = cli.key.as_deref() {
        key.trim().to_string()
    } else {
        OpenAiKeyCli::command()
            .error(ErrorKind::MissingRequiredArgument, "must provide --key or --stdin")
            .exit()
    };

    if key.is_empty() {
        eprintln!("error: key is empty");
        return ExitCode::from(EXIT_USAGE);
    }

    let project = Some(cli.project.as_str()).filter(|p| !p.is_empty());
    let mut out = io::stdout().lock();
    match verify_key(&OPENAI, &key, KeySource::Cli, &cli.base_url, project, &mut out).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
