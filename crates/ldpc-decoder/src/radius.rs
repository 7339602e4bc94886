// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Empirical decoding radius.
//!
//! Flips a growing prefix of a codeword until decoding fails, then binary
//! searches the boundary. Decoding is heuristic, so the result is the largest
//! flip count *observed* to decode during the search, not a guarantee for
//! every smaller count.

use crate::algebra::Algorithm;
use crate::decoder::LdpcDecoder;
use tracing::debug;

/// Searches for the largest flip count `t <= n` for which `decodes(t)` holds.
///
/// Doubles `t` from 1 (capped at `n`) until `decodes` fails, then binary
/// searches between the last success and the first failure. Returns `n` if
/// decoding succeeds even with every position flipped, and 0 if a single
/// flip already fails.
pub fn search_decoding_radius<F>(n: usize, mut decodes: F) -> usize
where
    F: FnMut(usize) -> bool,
{
    if n == 0 {
        return 0;
    }

    let mut high = 1;
    while decodes(high) {
        if high == n {
            return n;
        }
        high = (high * 2).min(n);
        debug!(flips = high, "growing flip count");
    }

    let mut low = high / 2;
    while low + 1 < high {
        let mid = low + (high - low) / 2;
        if decodes(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

/// Copy of `codeword` with its first `t` positions flipped.
pub fn flip_prefix(codeword: &[u8], t: usize) -> Vec<u8> {
    let mut noisy = codeword.to_vec();
    for bit in noisy.iter_mut().take(t) {
        *bit ^= 1;
    }
    noisy
}

/// Measures the decoding radius of `decoder` around `codeword`, counting a
/// decode as correct only if it converges to `message`.
pub fn measure_radius(
    decoder: &mut LdpcDecoder,
    algorithm: Algorithm,
    codeword: &[u8],
    message: &[u8],
    max_iterations: usize,
) -> usize {
    let radius = search_decoding_radius(codeword.len(), |t| {
        let noisy = flip_prefix(codeword, t);
        match decoder.decode(algorithm, &noisy, max_iterations) {
            Ok(out) => out.message == message,
            Err(_) => false,
        }
    });
    debug!(%algorithm, radius, "measured decoding radius");
    radius
}
