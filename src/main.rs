use clap::Parser;
use navstack::ExitMode;
use navstack::core::config;
use navstack::shell;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navstack", about = "Stack navigator driven from the command line")]
struct Args {
    /// Config file to use instead of ~/.navstack/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path the history starts at
    #[arg(short, long)]
    initial_path: Option<String>,

    /// How popped screens leave the stack
    #[arg(short, long, value_enum)]
    exit_mode: Option<ExitMode>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .map_err(|e| std::io::Error::other(e.to_string()))?;
    let resolved = config::resolve(&file_config, args.initial_path.as_deref(), args.exit_mode);

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "navstack starting at {} ({:?} exits)",
        resolved.initial_path,
        resolved.exit_mode
    );

    shell::run(resolved)
}
