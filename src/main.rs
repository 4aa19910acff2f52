use anyhow::Context;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use todolist::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "todolist", about = "Terminal to-do list: add, edit and check off items")]
struct Args {
    /// Config file to read instead of ~/.todolist/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => config::load_config().context("failed to load config")?,
    };
    let cli = CliOverrides {
        log_file: args.log_file,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli).context("invalid configuration")?;

    // Logs go to a file: stdout belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "warning: cannot open log file {}: {}",
            resolved.log_file.display(),
            e
        ),
    }

    log::info!(
        "todolist starting (notice {}ms, {} description lines)",
        resolved.notice_duration_ms,
        resolved.description_max_lines
    );

    todolist::tui::run(resolved).context("terminal error")?;

    log::info!("todolist exiting");
    Ok(())
}
