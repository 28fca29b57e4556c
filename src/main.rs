use clap::{CommandFactory, Parser};
use emoji_sync::cli::{CliArgs, Command};
use emoji_sync::core::processor;
use emoji_sync::error::{AppError, AppResult};
use emoji_sync::logging::{log, setup_logging, LogLevel};
use std::process::ExitCode;
use tokio::runtime::Builder;

fn main() -> ExitCode {
    setup_logging();

    let cli_args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log(LogLevel::Error, &format!("CLI Argument Error: {}", e));
            let _ = CliArgs::command().print_help();
            return ExitCode::from(2);
        }
    };

    let runtime = match Builder::new_multi_thread()
        .enable_all()
        .thread_name("emoji-worker")
        .worker_threads(num_cpus::get())
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("FATAL: Failed to build Tokio runtime: {}", e),
            );
            return ExitCode::FAILURE;
        }
    };

    let main_result: AppResult<i32> = runtime.block_on(async {
        match cli_args.command {
            Command::Collect(args) => processor::run_collect(args.into_options()?).await,
            Command::Upload(args) => processor::run_upload(args.into_options()?).await,
        }
    });

    match main_result {
        Ok(exit_code) => ExitCode::from(exit_code as u8),
        Err(AppError::Argument(msg)) => {
            log(LogLevel::Error, &format!("Invalid arguments: {}", msg));
            ExitCode::from(2)
        }
        Err(e) => {
            log(LogLevel::Error, &format!("FATAL: {}", e));
            ExitCode::FAILURE
        }
    }
}
