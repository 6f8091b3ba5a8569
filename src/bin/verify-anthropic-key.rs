use std::io;
use std::process::ExitCode;

use opskit::EXIT_USAGE;
use opskit::clients::keychain::Keychain;
use opskit::config::{ANTHROPIC, VerifierEnv};
use opskit::verify::{missing_key_message, resolve_key, verify_key};

#[tokio::main]
async fn main() -> ExitCode {
    opskit::logging::init();

    let env = VerifierEnv::from_env(&ANTHROPIC);
    let Some((key, source)) = resolve_key(&ANTHROPIC, &env, &Keychain::new()).await else {
        eprintln!("{}", missing_key_message(&ANTHROPIC));
        return ExitCode::from(EXIT_USAGE);
    };

    let mut out = io::stdout().lock();
    match verify_key(&ANTHROPIC, &key, source, &env.base_url, env.project.as_deref(), &mut out).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
