//! Wirepress CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wirepress_bench::{render_table, BenchmarkRunner, BenchmarkSuite};
use wirepress_compression::CompressionConfig;
use wirepress_core::Codec;
use wirepress_provider::PayloadProvider;

#[derive(Parser)]
#[command(name = "wirepress")]
#[command(about = "HTTP response compression benchmark", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark across the codec set
    Run {
        /// Codecs to benchmark, in order (gzip, deflate, br, identity)
        #[arg(short = 'c', long, value_delimiter = ',', default_values_t = [
            "gzip".to_string(), "deflate".to_string(), "br".to_string(),
        ])]
        codecs: Vec<String>,

        /// Payload size in bytes for the synthetic fallback
        #[arg(short, long, default_value_t = 1_048_576)]
        size: usize,

        /// Compression level applied by every server
        #[arg(short, long, default_value_t = 6)]
        level: u32,

        /// Skip remote sources and generate the payload locally
        #[arg(long)]
        synthetic: bool,

        /// Emit results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long, default_value = "info")]
        log_level: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            codecs,
            size,
            level,
            synthetic,
            json,
            log_level,
        } => {
            init_tracing(&log_level)?;

            let codecs = parse_codecs(&codecs)?;

            tracing::info!(
                codecs = ?codecs.iter().map(|c| c.encoding_name()).collect::<Vec<_>>(),
                payload_size = size,
                level,
                "Starting Wirepress benchmark"
            );

            let provider = if synthetic {
                PayloadProvider::synthetic(size)
            } else {
                PayloadProvider::new(PayloadProvider::default_sources(), size)
            };

            let runner = BenchmarkRunner::new(CompressionConfig {
                level,
                ..Default::default()
            });
            let suite = BenchmarkSuite::with_runner(provider, std::sync::Arc::new(runner));

            let results = suite.compare(&codecs).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", render_table(&results));
            }

            if results.is_empty() {
                tracing::error!("No codec completed successfully");
                std::process::exit(1);
            }

            Ok(())
        }

        Commands::Version => {
            println!("wirepress {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_codecs(tokens: &[String]) -> Result<Vec<Codec>> {
    tokens
        .iter()
        .map(|token| {
            Codec::from_encoding(token)
                .ok_or_else(|| anyhow::anyhow!("Unknown codec: {}", token))
        })
        .collect()
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    Ok(())
}
