use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use taskbook::{export, load_paragraphs, parse_book, Config, ExportFormat};

/// Extract tasks, chapters and answers from a textbook .docx into a spreadsheet
#[derive(Debug, Parser)]
#[command(name = "taskbook", version, about)]
struct Cli {
    /// Textbook to read
    #[arg(required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Output file [default: the input path with the format's extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
    format: ExportFormat,

    /// Config file [default: <config dir>/taskbook/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if cli.init_config {
        let path = Config::init_default()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let input = cli.input.context("No input file given")?;
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let paragraphs = load_paragraphs(&input).await?;
    let book = parse_book(&paragraphs, &config.tasks)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let output = cli
        .output
        .unwrap_or_else(|| input.with_extension(cli.format.extension()));
    export::write_book(&book, &config.author, &cli.format, &output)?;

    info!(output = %output.display(), "export finished");
    println!(
        "Extracted {} tasks ({} with answers) and {} chapters to {}",
        book.tasks.len(),
        book.answered_count(),
        book.chapters.len(),
        output.display()
    );
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
