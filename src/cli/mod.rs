use std::time::SystemTime;

use clap::Parser;
use tracing::{error, info};

use crate::cli::args::Cli;
use crate::config::{load_config, RuntimeConfig};
use crate::error::LaunchError;
use crate::launch::run_once;
use crate::logging::roll::DAY;
use crate::logging::{build_sink, roll_logs, LogSink, LogTarget};
use crate::types::{ExitCode, RunMode};
use crate::util::command::{CommandRunner, SystemRunner};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;

/// Parse the command line, run once and report how the run ended.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let cfg = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("snaplaunch: {}", err);
            return err.exit_code();
        }
    };
    let runner = SystemRunner::new(run_mode(&cli));
    run_with(&cli, &cfg, &runner)
}

/// Set up logging, run once through `runner` and roll old logs after a
/// successful file-logged run.
pub fn run_with(cli: &Cli, cfg: &RuntimeConfig, runner: &dyn CommandRunner) -> ExitCode {
    let run_mode = run_mode(cli);
    let (target, sink) = match open_log(cli, cfg, run_mode.verbose) {
        Ok(opened) => opened,
        Err(err) => {
            eprintln!("snaplaunch: {}", err);
            return err.exit_code();
        }
    };

    tracing::dispatcher::with_default(&sink.dispatch, || {
        info!("running snaplaunch {}", VERSION);
        if run_mode.dry_run {
            info!("dry-run: snapshot, mount, unmount and backup commands are not executed");
        }
        let code = match run_once(cfg, runner, run_mode) {
            Ok(_) => ExitCode::Success,
            Err(err) => {
                error!("{}", err);
                err.exit_code()
            }
        };
        if let (ExitCode::Success, LogTarget::File { dir, .. }) = (code, &target) {
            roll_logs(
                dir,
                &cfg.log_roll,
                cfg.log_retention_days * DAY,
                SystemTime::now(),
                run_mode.dry_run,
            );
        }
        info!("exit: {}", code);
        code
    })
}

fn run_mode(cli: &Cli) -> RunMode {
    RunMode {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    }
}

/// Console logging never needs the log directory; file logging fails
/// without one.
fn log_target(cli: &Cli, cfg: &RuntimeConfig) -> Result<LogTarget, LaunchError> {
    if cli.log {
        return Ok(LogTarget::Console);
    }
    let dir = cfg.log_dir.clone().ok_or_else(|| {
        LaunchError::logging("no log directory: HOME is not set; configure logs.dir or use --log")
    })?;
    Ok(LogTarget::File {
        dir,
        name: cfg.log_name.clone(),
    })
}

fn open_log(
    cli: &Cli,
    cfg: &RuntimeConfig,
    verbose: bool,
) -> Result<(LogTarget, LogSink), LaunchError> {
    let target = log_target(cli, cfg)?;
    let sink = build_sink(&target, verbose).map_err(|e| LaunchError::logging(format!("{:#}", e)))?;
    Ok((target, sink))
}
