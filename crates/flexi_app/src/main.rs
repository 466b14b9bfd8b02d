mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::config::EndpointOverrides;
use platform::logging::LogTarget;

/// Terminal playground for the FlexiConnect spam, toxicity and image
/// detection APIs.
#[derive(Parser, Debug)]
#[command(name = "flexiconnect")]
#[command(version)]
#[command(about = "FlexiConnect inference playground", long_about = None)]
struct Cli {
    /// RON configuration file. Defaults to ./flexiconnect.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,

    /// Log file used by `--log file` and `--log both`.
    #[arg(long, default_value = "flexiconnect.log")]
    log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Override the spam detection endpoint.
    #[arg(long, env = "FLEXI_SPAM_URL")]
    spam_url: Option<String>,

    /// Override the toxicity detection endpoint.
    #[arg(long, env = "FLEXI_TOXICITY_URL")]
    toxicity_url: Option<String>,

    /// Override the image detection endpoint.
    #[arg(long, env = "FLEXI_IMAGE_URL")]
    image_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log, cli.log_file, cli.verbose);

    let overrides = EndpointOverrides {
        spam: cli.spam_url,
        toxicity: cli.toxicity_url,
        image_detection: cli.image_url,
    };
    let settings = platform::config::load(cli.config.as_deref(), &overrides)?;

    platform::run_app(settings)
}
