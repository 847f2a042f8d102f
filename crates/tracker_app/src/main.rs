use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracker_app::platform::app::run_app;
use tracker_app::platform::config::{
    AppConfig, ConfigSource, LogDestination, DEFAULT_CONFIG_FILENAME,
};
use tracker_app::platform::logging;
use tracker_logging::tracker_info;

#[derive(Parser)]
#[command(name = "job_tracker")]
#[command(about = "Track, filter and batch-process job applications from the terminal")]
#[command(version)]
struct Cli {
    /// Path to the RON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for saved view preferences (overrides the config file)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Where to write logs (overrides the config file)
    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// Filter debounce in milliseconds (overrides the config file)
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Skip the session check at startup
    #[arg(long)]
    no_session_check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_to(self, mut config: AppConfig) -> AppConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(state_dir) = self.state_dir {
            config.state_dir = state_dir;
        }
        if let Some(log) = self.log {
            config.log_destination = log;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if self.no_session_check {
            config.check_session_on_start = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = tracker_logging::level_from_verbosity(cli.verbose);

    let config_path = cli.config.clone();
    let (config, source) = AppConfig::load(&config_path)?;
    let config = cli.apply_to(config);
    logging::initialize(config.log_destination, level);
    match source {
        ConfigSource::File(path) => tracker_info!("Loaded config from {:?}", path),
        ConfigSource::Defaults => {
            tracker_info!("No config at {:?}; using defaults", config_path)
        }
    }

    run_app(config).await
}
