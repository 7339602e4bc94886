// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use ldpc_decoder::ParityCheckGraph;
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn load_graph(name: &str) -> Arc<ParityCheckGraph> {
    let graph = ParityCheckGraph::from_yaml_file(fixtures_dir().join(name)).unwrap();
    Arc::new(graph)
}

/// Encodes `message` for a graph of the form `H = [A | I]`: check `j` covers
/// some message bits plus parity bit `k + j` only.
pub fn encode_systematic(graph: &ParityCheckGraph, message: &[u8]) -> Vec<u8> {
    let k = graph.message_len();
    assert_eq!(message.len(), k);

    let mut codeword = message.to_vec();
    codeword.resize(graph.cols(), 0);
    for j in 0..graph.rows() {
        let mut parity = 0;
        for &i in graph.row(j) {
            if i < k {
                parity ^= message[i];
            } else {
                assert_eq!(i, k + j, "graph is not in [A | I] form");
            }
        }
        codeword[k + j] = parity;
    }
    assert!(graph.is_codeword(&codeword));
    codeword
}

/// Deterministic message with a mix of zeros and ones.
pub fn pattern_message(k: usize, seed: usize) -> Vec<u8> {
    (0..k)
        .map(|i| (((i * 7 + seed * 13) % 5) % 2) as u8)
        .collect()
}

/// Routes decoder logs to the test harness output.
pub fn init_tracing() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
