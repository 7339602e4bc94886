// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

/// Sign of `x` as `±1.0`. Zero (of either sign) counts as positive.
#[inline]
pub fn sgn(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// `phi(x) = -ln(tanh(x / 2))`
///
/// Self-inverse on `(0, inf)`. `phi(0)` is `+inf` and `phi(inf)` is zero;
/// neither end is clamped.
#[inline]
pub fn phi(x: f64) -> f64 {
    -(x * 0.5).tanh().ln()
}
