use std::process::ExitCode;

use kube_pod_inspect::{cli::Cli, config::Config};

#[tokio::main]
async fn main() -> ExitCode {
    kube_pod_inspect::logging::init();

    let cli = <Cli as clap::Parser>::parse();
    let result = match Config::try_from(cli) {
        Ok(config) => kube_pod_inspect::run(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
