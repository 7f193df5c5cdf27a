// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series normalization into the `[0, 1]` domain.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::ConfigError;

/// How a raw series is rescaled into `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizePolicy {
    /// Each value as a proportion of the series maximum.
    ///
    /// Used by charts that compare magnitudes (area chart).
    Comparison,
    /// Each value as a share of the series total.
    ///
    /// Used by charts that split a whole (ring chart).
    Percentage,
}

impl NormalizePolicy {
    /// The policy name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Comparison => "comparison",
            Self::Percentage => "percentage",
        }
    }

    fn base(self, series: &[f64]) -> f64 {
        match self {
            Self::Comparison => series.iter().copied().fold(0.0, f64::max),
            Self::Percentage => series.iter().sum(),
        }
    }
}

impl FromStr for NormalizePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comparison" => Ok(Self::Comparison),
            "percentage" => Ok(Self::Percentage),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Rescales `series` into `[0, 1]` under `policy`.
///
/// A zero base (empty series, all zeros) yields all zeros rather than dividing by zero.
pub fn normalize(series: &[f64], policy: NormalizePolicy) -> Vec<f64> {
    let base = policy.base(series);
    series
        .iter()
        .map(|&v| if base > 0.0 { v / base } else { 0.0 })
        .collect()
}

/// Parses `policy` and normalizes `series` with it.
pub fn normalize_by_name(series: &[f64], policy: &str) -> Result<Vec<f64>, ConfigError> {
    Ok(normalize(series, policy.parse()?))
}
