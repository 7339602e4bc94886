// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Belief propagation decoding for LDPC codes.
//!
//! Given a received `n`-bit vector that differs from a codeword of a sparse
//! parity-check code in a few positions, the decoder recovers the `k = n - m`
//! message bits. It is used as a noise-correction step inside larger protocols,
//! e.g. to reconcile the sparse correlations an oblivious-transfer style
//! protocol leaves behind.
//!
//! ## Algorithms
//!
//! Three message-passing algorithms share one iterate-and-converge loop and
//! differ only in their [`MessageAlgebra`]:
//!
//! - [`LdpcDecoder::bp_decode`]: likelihood-ratio domain, kept as a reference
//!   path; it is numerically fragile.
//! - [`LdpcDecoder::logbp_decode`]: log-likelihood domain with the `phi`
//!   transform (the tanh rule).
//! - [`LdpcDecoder::min_sum_decode`]: replaces `phi`-sum-`phi` by a minimum.
//!
//! Each round updates every check, then every variable, takes a hard decision
//! and stops as soon as the candidate satisfies every parity check. Running out
//! of iterations yields [`LdpcError::NotConverged`].
//!
//! ## Contract
//!
//! The message is read from the first `k` positions of the corrected codeword,
//! so codes must be in systematic layout. Passing a codeword of the wrong
//! length or with entries other than 0/1 is a caller bug and panics.

pub mod algebra;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod graph;
pub mod math;
pub mod radius;
pub mod utils;

pub use algebra::{Algorithm, BeliefPropagation, LogBeliefPropagation, MessageAlgebra, MinSum};
pub use config::DecoderConfig;
pub use decoder::{DecodeOutput, LdpcDecoder};
pub use errors::{LdpcError, LdpcResult};
pub use graph::ParityCheckGraph;
pub use radius::{flip_prefix, measure_radius, search_decoding_radius};
