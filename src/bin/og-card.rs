use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Render the Protective Computing Open Graph card to PNG.
#[derive(Parser, Debug)]
#[command(name = "og-card", version)]
struct Cli {
    /// Card description JSON; omitted fields keep built-in values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path (overrides the config's `output`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the effective card description as JSON and exit.
    #[arg(long, default_value_t = false)]
    print_config: bool,

    /// Log more detail to stderr (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => og_card::CardConfig::from_path(path)
            .with_context(|| format!("load card config '{}'", path.display()))?,
        None => og_card::CardConfig::default(),
    };
    if let Some(out) = cli.out {
        config.output = out;
    }

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let out = og_card::write_card(&config)
        .with_context(|| format!("write card '{}'", config.output.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
