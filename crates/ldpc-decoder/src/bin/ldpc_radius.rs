// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! LDPC Decoding Radius CLI
//!
//! Measures how many flipped bits each decoder tolerates on a given
//! parity-check graph.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ldpc_decoder::utils::print_graph;
use ldpc_decoder::{measure_radius, Algorithm, DecoderConfig, LdpcDecoder, ParityCheckGraph};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Measure the decoding radius of the LDPC belief propagation decoders",
    long_about = "Measure the decoding radius of the LDPC belief propagation decoders.\n\n\
                  Decodes the all-zero codeword with a growing prefix of flipped bits, \
                  so no encoder is needed."
)]
struct Args {
    /// YAML file describing the graph: `cols: n` and `rows: [[i, ...], ...]`
    #[arg(long)]
    graph: PathBuf,

    /// YAML file with decoder parameters (`p`, `max_iterations`, `algorithm`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured algorithm
    #[arg(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Run every algorithm
    #[arg(long, default_value_t = false, conflicts_with = "algorithm")]
    all: bool,

    /// Override the configured iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Override the configured channel parameter
    #[arg(long)]
    p: Option<f64>,

    /// Print the parity-check matrix
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = DecoderConfig::load(args.config.as_deref())
        .context("Could not load decoder configuration")?;
    if let Some(p) = args.p {
        config.p = p;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    config.validate()?;

    let graph = ParityCheckGraph::from_yaml_file(&args.graph)
        .with_context(|| format!("Could not read graph from {}", args.graph.display()))?;
    if graph.cols() <= graph.rows() {
        bail!(
            "graph has {} variables and {} checks; need more variables than checks",
            graph.cols(),
            graph.rows()
        );
    }

    println!("=== LDPC Decoding Radius ===");
    println!(
        "Code: n = {}, m = {}, k = {}, edges = {}",
        graph.cols(),
        graph.rows(),
        graph.message_len(),
        graph.edge_count()
    );
    println!("Channel parameter p = {}", config.p);
    println!("Iteration budget: {}\n", config.max_iterations);

    if args.verbose {
        print_graph("Parity-check matrix H", &graph);
    }

    let codeword = vec![0u8; graph.cols()];
    let message = vec![0u8; graph.message_len()];
    let mut decoder = LdpcDecoder::from_config(Arc::new(graph), &config);

    let algorithms: Vec<Algorithm> = if args.all {
        Algorithm::ALL.to_vec()
    } else {
        vec![config.algorithm]
    };

    for algorithm in algorithms {
        info!(%algorithm, "measuring decoding radius");
        let radius = measure_radius(
            &mut decoder,
            algorithm,
            &codeword,
            &message,
            config.max_iterations,
        );
        println!("{:>7}: corrects the first {} flipped bits", algorithm, radius);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        let command = Args::command();
        command.clone().debug_assert();

        let about = command.get_about().map(|s| s.to_string()).unwrap_or_default();
        assert!(about.len() <= 80, "about is {} characters", about.len());
        let long_about = command.get_long_about().map(|s| s.to_string()).unwrap_or_default();
        assert!(long_about.contains("all-zero codeword"));
    }

    #[test]
    fn test_parses_overrides() {
        let args = Args::try_parse_from([
            "ldpc-radius",
            "--graph",
            "h.yaml",
            "--algorithm",
            "min-sum",
            "--max-iterations",
            "20",
        ])
        .unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::MinSum));
        assert_eq!(args.max_iterations, Some(20));

        let conflicting = ["ldpc-radius", "--graph", "h.yaml", "--all", "--algorithm", "bp"];
        assert!(Args::try_parse_from(conflicting).is_err());
    }
}
