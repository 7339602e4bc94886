// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for LDPC decoding
//!
//! Only recoverable conditions live here: malformed graph input, bad
//! configuration and decoder non-convergence. Caller bugs (a codeword of the
//! wrong length, a graph with `n <= m` handed to the decoder) are contract
//! breaches and panic instead.

use thiserror::Error;

/// Main error type for LDPC operations
#[derive(Error, Debug)]
pub enum LdpcError {
    /// The parity-check graph description is malformed
    #[error("Invalid parity-check graph: {message}")]
    Graph { message: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The syndrome was still non-zero after the iteration budget ran out
    #[error("Decoding did not converge within {max_iterations} iterations")]
    NotConverged { max_iterations: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for LDPC operations
pub type LdpcResult<T> = Result<T, LdpcError>;

impl From<figment::Error> for LdpcError {
    fn from(err: figment::Error) -> Self {
        LdpcError::Config {
            message: err.to_string(),
        }
    }
}

// Helper functions for creating errors with context
impl LdpcError {
    /// Create a graph error with a message
    pub fn graph(message: impl Into<String>) -> Self {
        LdpcError::Graph {
            message: message.into(),
        }
    }

    /// Create a configuration error with a message
    pub fn config(message: impl Into<String>) -> Self {
        LdpcError::Config {
            message: message.into(),
        }
    }

    /// Create an out-of-range variable index error
    pub fn index_out_of_range(index: usize, cols: usize, context: impl Into<String>) -> Self {
        LdpcError::Graph {
            message: format!(
                "Variable index out of range in {}: {} >= {}",
                context.into(),
                index,
                cols
            ),
        }
    }

    /// True if this error only signals that the iteration budget ran out
    pub fn is_not_converged(&self) -> bool {
        matches!(self, LdpcError::NotConverged { .. })
    }
}
