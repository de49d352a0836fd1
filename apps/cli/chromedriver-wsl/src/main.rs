use chromedriver_wsl::app::run;
use chromedriver_wsl::error::AppError;

use bridge_core::config::executable_dir;

use std::env::args_os;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let result = match executable_dir() {
        Ok(config_dir) => run(&config_dir, args).await,
        Err(e) => Err(AppError::startup("Failed to locate the executable", e)),
    };

    match result {
        Ok(report) => {
            info!(
                "Exiting after {} (driver killed: {}, drained: {})",
                report.reason, report.driver_killed, report.drained
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
