// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Message-combination algebras.
//!
//! The three decoders share one iterate-and-converge skeleton and differ only
//! in how channel evidence is encoded and how messages are combined:
//!
//! | algebra                  | evidence         | check rule             | variable rule | bit 0 iff |
//! |--------------------------|------------------|------------------------|---------------|-----------|
//! | [`BeliefPropagation`]    | likelihood ratio | `(v+1)/(v-1)`          | product       | `L >= 1`  |
//! | [`LogBeliefPropagation`] | log-likelihood   | `sign * phi(sum phi)`  | sum           | `L >= 0`  |
//! | [`MinSum`]               | log-likelihood   | `sign * min`           | sum           | `L >= 0`  |
//!
//! None of the rules clamp their inputs. Messages at the singular points of the
//! linear rule (`±1`) or a zero magnitude in the log rule produce non-finite
//! values that propagate through the rest of the iteration.

use crate::math::{phi, sgn};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points of variation between the belief propagation decoders.
pub trait MessageAlgebra {
    /// Name used in logs.
    const NAME: &'static str;

    /// Channel evidence for a received `0` and a received `1`.
    fn channel_weights(p: f64) -> [f64; 2];

    /// Check-to-variable message from the variable-to-check messages of every
    /// other variable on the check.
    fn check_message(others: impl Iterator<Item = f64>) -> f64;

    /// Folds one check-to-variable message into a variable's belief.
    fn combine(acc: f64, msg: f64) -> f64;

    /// Hard decision on a variable's total belief.
    fn decide(total: f64) -> u8;
}

/// Belief propagation in the likelihood-ratio domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeliefPropagation;

impl MessageAlgebra for BeliefPropagation {
    const NAME: &'static str = "bp";

    fn channel_weights(p: f64) -> [f64; 2] {
        [p / (1.0 - p), (1.0 - p) / p]
    }

    fn check_message(others: impl Iterator<Item = f64>) -> f64 {
        // prod_k (r_k + 1) / (r_k - 1)
        let v = others.fold(1.0, |v, r| v * ((r + 1.0) / (r - 1.0)));
        (v + 1.0) / (v - 1.0)
    }

    #[inline]
    fn combine(acc: f64, msg: f64) -> f64 {
        acc * msg
    }

    #[inline]
    fn decide(total: f64) -> u8 {
        if total >= 1.0 {
            0
        } else {
            1
        }
    }
}

/// Sum-product in the log-likelihood domain using the `phi` transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBeliefPropagation;

impl MessageAlgebra for LogBeliefPropagation {
    const NAME: &'static str = "logbp";

    fn channel_weights(p: f64) -> [f64; 2] {
        log_weights(p)
    }

    fn check_message(others: impl Iterator<Item = f64>) -> f64 {
        let (magnitude, sign) =
            others.fold((0.0, 1.0), |(v, s), r| (v + phi(r.abs()), s * sgn(r)));
        sign * phi(magnitude)
    }

    #[inline]
    fn combine(acc: f64, msg: f64) -> f64 {
        acc + msg
    }

    #[inline]
    fn decide(total: f64) -> u8 {
        log_decide(total)
    }
}

/// Min-sum approximation of [`LogBeliefPropagation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MinSum;

impl MessageAlgebra for MinSum {
    const NAME: &'static str = "minsum";

    fn channel_weights(p: f64) -> [f64; 2] {
        log_weights(p)
    }

    fn check_message(others: impl Iterator<Item = f64>) -> f64 {
        let (magnitude, sign) =
            others.fold((f64::MAX, 1.0), |(v, s), r| (v.min(r.abs()), s * sgn(r)));
        sign * magnitude
    }

    #[inline]
    fn combine(acc: f64, msg: f64) -> f64 {
        acc + msg
    }

    #[inline]
    fn decide(total: f64) -> u8 {
        log_decide(total)
    }
}

fn log_weights(p: f64) -> [f64; 2] {
    [(p / (1.0 - p)).ln(), ((1.0 - p) / p).ln()]
}

#[inline]
fn log_decide(total: f64) -> u8 {
    if total >= 0.0 {
        0
    } else {
        1
    }
}

/// Run-time selection of a decoding algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Likelihood-ratio belief propagation
    Bp,
    /// Log-domain belief propagation
    #[default]
    #[serde(alias = "log-bp")]
    #[value(name = "logbp", alias = "log-bp")]
    LogBp,
    /// Min-sum
    #[serde(alias = "min-sum")]
    #[value(name = "minsum", alias = "min-sum")]
    MinSum,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bp, Algorithm::LogBp, Algorithm::MinSum];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bp => BeliefPropagation::NAME,
            Algorithm::LogBp => LogBeliefPropagation::NAME,
            Algorithm::MinSum => MinSum::NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
