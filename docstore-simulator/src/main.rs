use clap::{Parser, Subcommand};
use docstore_simulator::generator::{WorkloadConfig, WorkloadGenerator};
use docstore_simulator::input::WorkloadReader;
use docstore_simulator::models::{ManagerMode, SimulationConfig};
use docstore_simulator::runner::SimulationRunner;
use docstore_simulator::stats;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Document manager workload simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a workload against managers of several cache sizes
    Simulate {
        /// Workload CSV file; a generated workload is used if omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Cache sizes to compare
        #[arg(
            short,
            long,
            value_name = "SIZES",
            num_args = 1..,
            value_delimiter = ',',
            default_value = "10,100,1000"
        )]
        cache_sizes: Vec<usize>,

        /// Manager mode: sequential, concurrent, or both
        #[arg(long, default_value = "sequential")]
        mode: String,

        /// Worker threads for concurrent runs
        #[arg(long, default_value = "4")]
        threads: usize,

        /// Requests in the generated workload (ignored with --input)
        #[arg(long, default_value = "100000")]
        requests: usize,

        /// Distinct documents in the generated workload (ignored with --input)
        #[arg(long, default_value = "10000")]
        documents: u32,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Generate a synthetic workload file
    Generate {
        /// Total number of requests
        #[arg(long, default_value = "100000")]
        requests: usize,

        /// Number of distinct documents
        #[arg(long, default_value = "10000")]
        documents: u32,

        /// Percentage of traffic to popular documents
        #[arg(long, default_value = "80")]
        popular_traffic: u8,

        /// Percentage of documents that are popular
        #[arg(long, default_value = "20")]
        popular_documents: u8,

        /// Percentage of requests on known documents that re-save them
        #[arg(long, default_value = "10")]
        updates: u8,

        /// Percentage of requests that are searches
        #[arg(long, default_value = "1")]
        searches: u8,

        /// Number of distinct authors
        #[arg(long, default_value = "50")]
        authors: u32,

        /// RNG seed for a reproducible workload
        #[arg(long)]
        seed: Option<u64>,

        /// Output file
        #[arg(short, long, default_value = "workload.csv")]
        output: PathBuf,
    },
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docstore_simulator=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            requests,
            documents,
            popular_traffic,
            popular_documents,
            updates,
            searches,
            authors,
            seed,
            output,
        } => {
            let config = WorkloadConfig {
                requests,
                unique_documents: documents,
                popular_traffic_percent: popular_traffic.min(100),
                popular_documents_percent: popular_documents.min(100),
                update_percent: updates.min(100),
                search_percent: searches.min(100),
                authors,
                seed,
                output,
            };
            let path = WorkloadGenerator::new(config).generate()?;
            println!("Workload written to {}", path.display());
            Ok(())
        }

        Commands::Simulate {
            input,
            cache_sizes,
            mode,
            threads,
            requests,
            documents,
            output_csv,
        } => {
            let cache_sizes = parse_cache_sizes(&cache_sizes)?;
            let modes = parse_modes(&mode);

            let workload = match &input {
                Some(path) => WorkloadReader::new(path).read_all()?,
                None => {
                    info!(requests, documents, "no input given, generating workload");
                    WorkloadGenerator::new(WorkloadConfig {
                        requests,
                        unique_documents: documents,
                        ..WorkloadConfig::default()
                    })
                    .requests()
                }
            };

            let config = SimulationConfig {
                input,
                cache_sizes,
                modes,
                threads,
            };
            let result = SimulationRunner::new(config.clone()).run(&workload);

            stats::print_summary(&result);
            if config.modes.len() > 1 {
                stats::print_comparison(&result);
            }

            if let Some(path) = output_csv {
                match stats::export_csv(&result, &path) {
                    Ok(()) => println!("\nResults exported to: {}", path.display()),
                    Err(e) => error!(error = %e, "failed to export CSV"),
                }
            }
            Ok(())
        }
    }
}

fn parse_cache_sizes(sizes: &[usize]) -> Result<Vec<NonZeroUsize>, String> {
    let mut parsed: Vec<NonZeroUsize> = sizes
        .iter()
        .map(|&n| NonZeroUsize::new(n).ok_or_else(|| "cache sizes must be non-zero".to_string()))
        .collect::<Result<_, _>>()?;
    parsed.sort();
    parsed.dedup();
    Ok(parsed)
}

fn parse_modes(mode: &str) -> Vec<ManagerMode> {
    match mode.to_lowercase().as_str() {
        "sequential" | "seq" => vec![ManagerMode::Sequential],
        "concurrent" | "conc" => vec![ManagerMode::Concurrent],
        "both" | "all" => vec![ManagerMode::Sequential, ManagerMode::Concurrent],
        _ => {
            warn!(mode, "unknown mode, using 'sequential'");
            vec![ManagerMode::Sequential]
        }
    }
}
