use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wordtally::report::{render, ReportOptions};
use wordtally::{Config, IngestionState, Ingestor, LocalFile, LopdfParser, OutputFormat};

/// Extract the text of a PDF and count its words
#[derive(Parser, Debug)]
#[command(name = "wordtally", version, about)]
struct Cli {
    /// PDF file to process
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Report format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the extracted text
    #[arg(short, long)]
    text: bool,

    /// Log extraction progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => bail!("Could not determine a config directory"),
        }
        return Ok(());
    }

    let config = Config::load().context("Failed to load config")?;
    let mut options = ReportOptions::from(&config);
    if let Some(format) = cli.format {
        options.format = format;
    }
    if cli.text {
        options.show_text = true;
    }

    let Some(path) = cli.file else {
        bail!("No input file given");
    };

    let ingestor = Ingestor::new(LopdfParser::new());
    let submission = ingestor.submit(LocalFile::new(path));

    if let IngestionState::Loading { file_name } = ingestor.state() {
        eprintln!("Processing {file_name}...");
    }
    submission.await;

    let state = ingestor.state();
    print!("{}", render(&state, &options)?);
    if options.format == OutputFormat::Json {
        println!();
    }

    if state.error_message().is_some() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "wordtally=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
