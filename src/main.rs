use std::process::ExitCode;

use log::{error, info, LevelFilter};
use myownwebserver::logger::{self, LOG_FILE};
use myownwebserver::{HttpServer, ServerConfig, StartupError};

const USAGE: &str = "Usage: myOwnWebServer -webRoot <path> -webIP <address> -webPort <port>";

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = logger::init(LOG_FILE, LevelFilter::Info) {
        eprintln!("Failed to set up logging: {err}");
    }

    let config = match ServerConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            let err = StartupError::from(err);
            error!(target: "ERROR", "{err}");
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(err.exit_code());
        }
    };

    info!(target: "SERVER STARTED", "Application started");

    let result = match HttpServer::new(config) {
        Ok(server) => server.start().await,
        Err(err) => Err(StartupError::from(err)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "ERROR", "{err}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
