// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Tuning surface of the batch selector.
//!
//! Every coefficient the search and the scoring model depend on lives here:
//! the priority weight table, the waiting-time penalty exponent, whether the
//! return trip is charged, and the branch/depth bounds of the tree search.
//! Configurations are validated eagerly, either by `SelectorConfigBuilder::build`
//! or by `SelectorConfig::validate` after deserialisation.
//!
//! All structs deserialise with `serde` and fill missing fields with their
//! defaults, so a partial document such as `{"max_branches": 50}` is valid.

use mailroom_model::mail::PriorityLevel;
use serde::{Deserialize, Serialize};

/// The error type for invalid selector configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The search needs at least one branch per expansion.
    #[error("max_branches must be at least 1")]
    ZeroBranches,
    /// The search needs at least one item per batch.
    #[error("max_depth must be at least 1")]
    ZeroDepth,
    /// Priority weights must be finite and positive.
    #[error("priority weight for {level} must be finite and positive, got {weight}")]
    InvalidPriorityWeight { level: PriorityLevel, weight: f64 },
    /// The penalty exponent must be finite and positive.
    #[error("penalty exponent must be finite and positive, got {0}")]
    InvalidPenaltyExponent(f64),
}

/// Numeric weight of each priority level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 1.5,
            high: 2.0,
        }
    }
}

impl PriorityWeights {
    /// Returns the weight of `level`.
    #[inline]
    pub fn weight(&self, level: PriorityLevel) -> f64 {
        match level {
            PriorityLevel::Low => self.low,
            PriorityLevel::Medium => self.medium,
            PriorityLevel::High => self.high,
        }
    }

    /// Sets the weight of `level`.
    #[inline]
    pub fn set_weight(&mut self, level: PriorityLevel, weight: f64) {
        match level {
            PriorityLevel::Low => self.low = weight,
            PriorityLevel::Medium => self.medium = weight,
            PriorityLevel::High => self.high = weight,
        }
    }
}

/// Coefficients of the scoring model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight applied to the waiting penalty of each priority level.
    pub priority: PriorityWeights,
    /// Exponent applied to the waiting time. Values above 1 penalise
    /// long waits super-linearly, which is what the default does.
    ///
    /// Any finite positive value is accepted: 1 scores waiting linearly and
    /// values below 1 flatten the penalty. Zero, negative and non-finite
    /// exponents are rejected by `validate`.
    pub penalty_exponent: f64,
    /// Whether the distance back to the mailroom is added to the cost.
    pub include_return_trip: bool,
}

impl ScoringWeights {
    pub const DEFAULT_PENALTY_EXPONENT: f64 = 1.1;

    /// Returns the weight of `level`.
    #[inline]
    pub fn weight(&self, level: PriorityLevel) -> f64 {
        self.priority.weight(level)
    }

    /// Checks that every coefficient is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in PriorityLevel::ALL {
            let weight = self.priority.weight(level);
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::InvalidPriorityWeight { level, weight });
            }
        }

        if !self.penalty_exponent.is_finite() || self.penalty_exponent <= 0.0 {
            return Err(ConfigError::InvalidPenaltyExponent(self.penalty_exponent));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            priority: PriorityWeights::default(),
            penalty_exponent: Self::DEFAULT_PENALTY_EXPONENT,
            include_return_trip: false,
        }
    }
}

/// Configuration of the batch selector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Upper bound on the number of seeds and on the extensions tried per candidate.
    pub max_branches: usize,
    /// Upper bound on the number of items in a batch.
    pub max_depth: usize,
    /// Coefficients of the scoring model.
    pub scoring: ScoringWeights,
}

impl SelectorConfig {
    pub const DEFAULT_MAX_BRANCHES: usize = 17;
    pub const DEFAULT_MAX_DEPTH: usize = 4;

    /// Checks that the configuration can drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_branches == 0 {
            return Err(ConfigError::ZeroBranches);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        self.scoring.validate()
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_branches: Self::DEFAULT_MAX_BRANCHES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            scoring: ScoringWeights::default(),
        }
    }
}

impl std::fmt::Display for SelectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SelectorConfig(max_branches: {}, max_depth: {}, penalty_exponent: {}, weights: [{}, {}, {}], return_trip: {})",
            self.max_branches,
            self.max_depth,
            self.scoring.penalty_exponent,
            self.scoring.priority.low,
            self.scoring.priority.medium,
            self.scoring.priority.high,
            self.scoring.include_return_trip
        )
    }
}

/// Builder for `SelectorConfig`, starting from the defaults.
///
/// # Examples
///
/// ```rust
/// # use mailroom_batch::config::SelectorConfigBuilder;
/// # use mailroom_model::mail::PriorityLevel;
///
/// let config = SelectorConfigBuilder::new()
///     .with_max_branches(50)
///     .with_priority_weight(PriorityLevel::High, 3.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_branches, 50);
/// assert_eq!(config.max_depth, 4);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectorConfigBuilder {
    config: SelectorConfig,
}

impl SelectorConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.config.max_branches = max_branches;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn with_priority_weight(mut self, level: PriorityLevel, weight: f64) -> Self {
        self.config.scoring.priority.set_weight(level, weight);
        self
    }

    #[inline]
    pub fn with_penalty_exponent(mut self, exponent: f64) -> Self {
        self.config.scoring.penalty_exponent = exponent;
        self
    }

    #[inline]
    pub fn with_return_trip(mut self, include: bool) -> Self {
        self.config.scoring.include_return_trip = include;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<SelectorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
