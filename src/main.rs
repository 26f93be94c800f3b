use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use ticklist::core::config;
use ticklist::term;

#[derive(Parser)]
#[command(name = "ticklist", about = "Interactive terminal checklist manager")]
struct Args {
    /// List file to load at startup (binds the session to it)
    file: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to ticklist.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ticklist.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Ticklist starting up, file arg: {:?}", args.file);

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e}; continuing with defaults");
            config::TicklistConfig::default()
        }
    };
    let resolved = config::resolve(&config);

    term::run(args.file, &resolved)
}
