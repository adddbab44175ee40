//! # CLI Module
//!
//! Command-line interface for the batch signer.
//!
//! ## Usage
//! ```bash
//! # Sign a batch of values
//! batch-signer sign 0 1 1 2 3 5
//!
//! # Read whitespace-separated values from stdin
//! echo "10 20 30" | batch-signer sign --stdin
//!
//! # JSON output
//! batch-signer sign 1 2 3 --output json
//!
//! # Show the intermediate signatures for a single value
//! batch-signer inspect 42
//! ```

use batch_signer::core::pipeline::{SignatureReport, SignerPipeline};
use batch_signer::core::primitives::{checksum32, SerialMd5};
use batch_signer::core::stages::SALT_COUNT;
use batch_signer::error::{Result, SourceError};
use batch_signer::events::{Event, EventChannel, PipelineEvent, StageEvent, StageKind};
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::thread;
use std::time::Duration;

/// Batch Signer - combined hash signatures for batches of integers
#[derive(Parser, Debug)]
#[command(name = "batch-signer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign a batch of integer values
    Sign {
        /// Values to sign
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// Read whitespace-separated values from stdin instead
        #[arg(long)]
        stdin: bool,

        /// Capacity of the channels between stages
        #[arg(long, default_value = "100")]
        capacity: usize,

        /// Simulated digest latency in milliseconds
        #[arg(long, default_value = "0")]
        md5_latency_ms: u64,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose progress messages
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the intermediate signatures for a single value
    Inspect {
        /// The value to inspect
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors and a progress bar
    Pretty,
    /// JSON output for scripting
    Json,
    /// The combined signature only
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    batch_signer::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign {
            values,
            stdin,
            capacity,
            md5_latency_ms,
            output,
            verbose,
        } => run_sign(values, stdin, capacity, md5_latency_ms, output, verbose),
        Commands::Inspect { value } => {
            run_inspect(value);
            Ok(())
        }
    }
}

fn run_sign(
    raw_values: Vec<String>,
    stdin: bool,
    capacity: usize,
    md5_latency_ms: u64,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    let values = if stdin {
        read_stdin_values()?
    } else {
        parse_values(&raw_values)?
    };

    // Print header
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Batch Signer").bold().cyan(),
            style(format!("({} values)", values.len())).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Build pipeline
    let pipeline = SignerPipeline::builder()
        .capacity(capacity)
        .md5_latency(Duration::from_millis(md5_latency_ms))
        .build()?;

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(values.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Stage(StageEvent::Started { stage }) => {
                    if verbose_clone {
                        if let Some(ref pb) = progress_clone {
                            pb.set_message(format!("{stage} running"));
                        }
                    }
                }
                Event::Stage(StageEvent::ItemCompleted {
                    stage: StageKind::MultiHash,
                    completed,
                }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(completed as u64);
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let report = pipeline.run_with_events(&values, &sender)?;

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    // Output results
    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report),
        OutputFormat::Json => print_json_results(&report),
        OutputFormat::Minimal => println!("{}", report.combined),
    }

    Ok(())
}

fn run_inspect(value: i64) {
    let digits = value.to_string();
    let md5 = SerialMd5::new();

    let crc = checksum32(&digits);
    let digest = md5.digest(&digits);
    let single = format!("{crc}~{}", checksum32(&digest));
    let multi: String = (0..SALT_COUNT)
        .map(|salt| checksum32(&format!("{salt}{single}")))
        .collect();

    println!("{}      {}", style("value:").dim(), digits);
    println!("{}   {}", style("checksum:").dim(), crc);
    println!("{}     {}", style("digest:").dim(), digest);
    println!("{} {}", style("singlehash:").dim(), single);
    println!("{}  {}", style("multihash:").dim(), multi);
}

fn parse_values(tokens: &[String]) -> std::result::Result<Vec<i64>, SourceError> {
    tokens
        .iter()
        .map(|token| {
            token.parse::<i64>().map_err(|_| SourceError::InvalidNumber {
                token: token.clone(),
            })
        })
        .collect()
}

fn read_stdin_values() -> std::result::Result<Vec<i64>, SourceError> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| SourceError::ReadStdin { source })?;

    let tokens: Vec<String> = buffer.split_whitespace().map(String::from).collect();
    parse_values(&tokens)
}

fn print_pretty_results(term: &Term, report: &SignatureReport) {
    term.write_line("").ok();
    term.write_line(&format!("{} Signing Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    // Summary
    term.write_line(&format!(
        "  {} values signed in {:.1}s",
        style(report.items).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} signature bytes",
        style(report.combined.len()).cyan()
    ))
    .ok();

    if report.md5_overheats > 0 {
        term.write_line(&format!(
            "  {} digest overheats",
            style(report.md5_overheats).red()
        ))
        .ok();
    }

    term.write_line("").ok();

    // The signature itself goes to stdout so it can be piped
    println!("{}", report.combined);
}

fn print_json_results(report: &SignatureReport) {
    let output = serde_json::json!({
        "items": report.items,
        "combined": report.combined,
        "signature_len": report.combined.len(),
        "md5_overheats": report.md5_overheats,
        "duration_ms": report.duration_ms,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
