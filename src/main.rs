use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use snapdash::config::{Config, load_config, load_config_from_path};
use snapdash::dashboard::DashboardGenerator;
use snapdash::logging;
use snapdash::scheduler::{Scheduler, shutdown_signal};
use snapdash::system::Collector;

#[derive(Parser)]
#[command(
    name = "snapdash",
    about = "Periodically renders host metrics into a static HTML dashboard"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between generations
    #[arg(long)]
    interval: Option<u64>,

    /// Template with `{{ key }}` placeholders
    #[arg(long)]
    template: Option<PathBuf>,

    /// Where the rendered dashboard is written
    #[arg(long)]
    output: Option<PathBuf>,

    /// Folder to analyze (relative paths start at the home directory)
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Generate a single dashboard and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Print the render context as JSON and exit without writing anything.
    #[arg(long, default_value_t = false)]
    print_context: bool,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(&config.logging, cli.verbose)?;

    let paths = config.paths.resolve(dirs::home_dir().as_deref())?;
    let collector = Collector::new(config.general.cpu_sample_window());
    let mut generator = DashboardGenerator::new(collector, paths);

    if cli.print_context {
        let ctx = generator.build_context()?;
        println!("{}", serde_json::to_string_pretty(&ctx)?);
        return Ok(());
    }

    if cli.once {
        let report = generator.generate()?;
        println!(
            "Dashboard written to {} at {}",
            report.output.display(),
            report.generated_at
        );
        return Ok(());
    }

    Scheduler::new(generator, config.general.refresh_interval())
        .run(shutdown_signal())
        .await?;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(secs) = cli.interval {
        config.general.refresh_interval_secs = secs;
    }
    if let Some(ref template) = cli.template {
        config.paths.template = template.clone();
    }
    if let Some(ref output) = cli.output {
        config.paths.output = output.clone();
    }
    if let Some(ref folder) = cli.folder {
        config.paths.analysis_folder = folder.clone();
    }

    config
}
