// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::algebra::Algorithm;
use crate::errors::{LdpcError, LdpcResult};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables with this prefix override file values, e.g.
/// `LDPC_MAX_ITERATIONS=50`.
pub const ENV_PREFIX: &str = "LDPC_";

/// Decoder parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    /// Channel parameter fed to the weight transform. A received `0` gets
    /// odds `p / (1 - p)` of being a `0`, so values above 0.5 trust the channel.
    pub p: f64,
    /// Iteration budget per decode call
    pub max_iterations: usize,
    /// Algorithm used when none is requested explicitly
    pub algorithm: Algorithm,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            p: 0.9,
            max_iterations: 10,
            algorithm: Algorithm::LogBp,
        }
    }
}

impl DecoderConfig {
    /// Loads defaults, then `path` (if given), then `LDPC_*` environment
    /// variables, and validates the result.
    pub fn load(path: Option<&Path>) -> LdpcResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(DecoderConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(LdpcError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file {} not found", path.display()),
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: DecoderConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).only(&["p", "max_iterations", "algorithm"]))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LdpcResult<()> {
        if !(self.p > 0.0 && self.p < 1.0) {
            return Err(LdpcError::config(format!(
                "p must lie strictly between 0 and 1, got {}",
                self.p
            )));
        }
        if self.max_iterations == 0 {
            return Err(LdpcError::config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
