// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Iterative message-passing decoder bound to one parity-check graph.

use crate::algebra::{Algorithm, BeliefPropagation, LogBeliefPropagation, MessageAlgebra, MinSum};
use crate::config::DecoderConfig;
use crate::errors::{LdpcError, LdpcResult};
use crate::graph::ParityCheckGraph;
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutput {
    /// The first `k` bits of the corrected codeword.
    pub message: Vec<u8>,
    /// Iterations run before the syndrome was satisfied.
    pub iterations: usize,
}

/// Belief propagation decoder with reusable scratch state.
///
/// Message storage is edge-indexed (see [`ParityCheckGraph::row_edges`]) and
/// is allocated once in [`new`](Self::new). Every decode call overwrites it, so
/// an instance must not be shared between concurrent callers; clone it or build
/// one per thread over the same `Arc`'d graph instead.
///
/// # Example
///
/// ```
/// use ldpc_decoder::{LdpcDecoder, ParityCheckGraph};
/// use std::sync::Arc;
///
/// let h = ParityCheckGraph::from_rows(
///     8,
///     vec![vec![0, 1, 2, 4], vec![0, 1, 3, 5], vec![0, 2, 3, 6], vec![1, 2, 3, 7]],
/// )
/// .unwrap();
/// let mut decoder = LdpcDecoder::new(Arc::new(h), 0.9);
///
/// // codeword for message 1011 with bit 2 flipped
/// let received = [1, 0, 0, 1, 0, 0, 1, 0];
/// let out = decoder.logbp_decode(&received, 20).unwrap();
/// assert_eq!(out.message, vec![1, 0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct LdpcDecoder {
    graph: Arc<ParityCheckGraph>,
    p: f64,
    k: usize,
    /// Variable-to-check messages, one per edge
    r: Vec<f64>,
    /// Check-to-variable messages, one per edge
    m: Vec<f64>,
    /// Channel evidence per variable
    w: Vec<f64>,
    candidate: Vec<u8>,
}

impl LdpcDecoder {
    /// Binds a decoder to `graph`.
    ///
    /// # Panics
    ///
    /// Panics if the graph does not have more variables than checks, or if `p`
    /// is not strictly between 0 and 1.
    pub fn new(graph: Arc<ParityCheckGraph>, p: f64) -> Self {
        let n = graph.cols();
        let m = graph.rows();
        assert!(
            n > m,
            "parity-check graph needs more variables than checks: n = {}, m = {}",
            n,
            m
        );
        assert!(p > 0.0 && p < 1.0, "channel parameter p = {} must lie in (0, 1)", p);

        let edges = graph.edge_count();
        Self {
            k: n - m,
            p,
            r: vec![f64::NAN; edges],
            m: vec![f64::NAN; edges],
            w: vec![0.0; n],
            candidate: vec![0; n],
            graph,
        }
    }

    /// Binds a decoder to `graph` using the channel parameter from `config`.
    pub fn from_config(graph: Arc<ParityCheckGraph>, config: &DecoderConfig) -> Self {
        Self::new(graph, config.p)
    }

    pub fn graph(&self) -> &Arc<ParityCheckGraph> {
        &self.graph
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Message length `k = n - m`.
    pub fn message_len(&self) -> usize {
        self.k
    }

    /// Decodes in the likelihood-ratio domain.
    ///
    /// Numerically fragile: a message equal to `±1` divides by zero and the
    /// resulting non-finite values are not guarded against.
    pub fn bp_decode(
        &mut self,
        codeword: &[u8],
        max_iterations: usize,
    ) -> LdpcResult<DecodeOutput> {
        self.decode_with::<BeliefPropagation>(codeword, max_iterations)
    }

    /// Decodes in the log-likelihood domain with the `phi` transform.
    pub fn logbp_decode(
        &mut self,
        codeword: &[u8],
        max_iterations: usize,
    ) -> LdpcResult<DecodeOutput> {
        self.decode_with::<LogBeliefPropagation>(codeword, max_iterations)
    }

    /// Decodes with the min-sum approximation.
    pub fn min_sum_decode(
        &mut self,
        codeword: &[u8],
        max_iterations: usize,
    ) -> LdpcResult<DecodeOutput> {
        self.decode_with::<MinSum>(codeword, max_iterations)
    }

    /// Decodes with an algorithm chosen at run time.
    pub fn decode(
        &mut self,
        algorithm: Algorithm,
        codeword: &[u8],
        max_iterations: usize,
    ) -> LdpcResult<DecodeOutput> {
        match algorithm {
            Algorithm::Bp => self.bp_decode(codeword, max_iterations),
            Algorithm::LogBp => self.logbp_decode(codeword, max_iterations),
            Algorithm::MinSum => self.min_sum_decode(codeword, max_iterations),
        }
    }

    /// Runs up to `max_iterations` rounds of message passing with algebra `A`.
    ///
    /// On success returns the first `k` bits of the first candidate that
    /// satisfies every check. This assumes a systematic code layout, which is
    /// not verified here. Returns [`LdpcError::NotConverged`] once the budget
    /// is spent.
    ///
    /// # Panics
    ///
    /// Panics if `codeword.len() != n` or an entry is not 0 or 1.
    pub fn decode_with<A: MessageAlgebra>(
        &mut self,
        codeword: &[u8],
        max_iterations: usize,
    ) -> LdpcResult<DecodeOutput> {
        let n = self.graph.cols();
        assert_eq!(
            codeword.len(),
            n,
            "codeword length must equal the number of variable nodes"
        );

        self.initialize::<A>(codeword);

        for iteration in 1..=max_iterations {
            self.update_checks::<A>();
            self.update_variables::<A>();
            self.hard_decision::<A>();

            if self.check(&self.candidate) {
                debug!(algorithm = A::NAME, iterations = iteration, "syndrome satisfied");
                return Ok(DecodeOutput {
                    message: self.candidate[..self.k].to_vec(),
                    iterations: iteration,
                });
            }
            trace!(
                algorithm = A::NAME,
                iteration,
                unsatisfied = self.graph.unsatisfied_checks(&self.candidate),
                "syndrome not satisfied"
            );
        }

        debug!(algorithm = A::NAME, max_iterations, "decoding did not converge");
        Err(LdpcError::NotConverged { max_iterations })
    }

    /// True iff `candidate` satisfies every parity check.
    ///
    /// # Panics
    ///
    /// Panics if `candidate.len() != n`.
    pub fn check(&self, candidate: &[u8]) -> bool {
        assert_eq!(candidate.len(), self.graph.cols());
        self.graph.is_codeword(candidate)
    }

    fn initialize<A: MessageAlgebra>(&mut self, codeword: &[u8]) {
        let graph = &*self.graph;
        let weights = A::channel_weights(self.p);

        // NaN marks "unset"; every edge is rewritten before it is read.
        self.r.fill(f64::NAN);
        self.m.fill(f64::NAN);

        for (i, &bit) in codeword.iter().enumerate() {
            assert!(bit < 2, "codeword entry {} is {}, expected 0 or 1", i, bit);
            self.w[i] = weights[usize::from(bit)];

            for &e in graph.col_edges(i) {
                self.r[e] = self.w[i];
            }
        }
    }

    fn update_checks<A: MessageAlgebra>(&mut self) {
        let graph = &*self.graph;
        let r = &self.r;

        for j in 0..graph.rows() {
            let edges = graph.row_edges(j);
            for e in edges.clone() {
                self.m[e] = A::check_message(edges.clone().filter(|&k| k != e).map(|k| r[k]));
            }
        }
    }

    fn update_variables<A: MessageAlgebra>(&mut self) {
        let graph = &*self.graph;
        let m = &self.m;

        for i in 0..graph.cols() {
            let edges = graph.col_edges(i);
            for &e in edges {
                self.r[e] = edges
                    .iter()
                    .filter(|&&k| k != e)
                    .fold(self.w[i], |acc, &k| A::combine(acc, m[k]));
            }
        }
    }

    fn hard_decision<A: MessageAlgebra>(&mut self) {
        let graph = &*self.graph;

        for i in 0..graph.cols() {
            let total = graph
                .col_edges(i)
                .iter()
                .fold(self.w[i], |acc, &e| A::combine(acc, self.m[e]));
            self.candidate[i] = A::decide(total);
        }
    }
}
