// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::graph::ParityCheckGraph;

/// Renders a bit vector as a string of `0`/`1` characters.
pub fn format_bits(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

pub fn print_graph(name: &str, graph: &ParityCheckGraph) {
    println!(
        "{} ({}x{}, {} edges):",
        name,
        graph.rows(),
        graph.cols(),
        graph.edge_count()
    );

    // Wide graphs are summarised by their adjacency lists
    if graph.cols() > 64 {
        for j in 0..graph.rows() {
            println!("  check {:>4}: {:?}", j, graph.row(j));
        }
    } else {
        for row in graph.to_dense() {
            println!("  [{}]", format_bits(&row));
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(&[1, 0, 1, 1]), "1011");
        assert_eq!(format_bits(&[]), "");
    }
}
