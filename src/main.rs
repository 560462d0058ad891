use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use thinkk::core::config::{self, CliOverrides};
use thinkk::core::mode::Mode;
use thinkk::tui;

#[derive(Parser)]
#[command(name = "thinkk", about = "Terminal client for the ProjectThinkk learning assistant")]
struct Args {
    /// Backend base URL (overrides THINKK_API_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Starting mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logging needs the resolved log file, so config is read first and its
    // messages are held back until the logger is running
    let loaded = match config::read_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &loaded.config,
        &CliOverrides {
            base_url: args.base_url,
            mode: args.mode,
            log_file: args.log_file,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "Could not open log file {}: {e}",
            resolved.log_file.display()
        ),
    }

    log::info!(
        "thinkk starting up (backend: {}, mode: {})",
        resolved.base_url,
        resolved.mode
    );
    loaded.announce();
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }

    tui::run(resolved)
}
