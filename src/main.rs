//! maze-server binary entry point.

use std::process::ExitCode;

use maze_server::api::{serve_with_state, AppState};
use maze_server::cli::{self, Args};
use maze_server::config::Config;
use maze_server::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run 'maze-server --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args)?;
    logging::init(config.log_filter());

    info!("maze-server v{}", env!("CARGO_PKG_VERSION"));

    let server_config = config.to_server_config()?;
    let state = AppState::with_lock_timeout(config.lock_timeout()?);

    serve_with_state(server_config, state).await?;
    Ok(())
}
