//! Evidence strength model: turns an expected attribute value and an
//! observed answer into a likelihood.

use crate::model::answer::Answer;
use std::env;

/// Tunable likelihood parameters.
#[derive(Debug, Clone, Copy)]
pub struct LikelihoodConfig {
    /// Scale applied to the |expected - answer| difference. The default of
    /// 0.45 puts the maximum difference (2.0) exactly on the floor.
    pub scaling: f64,
    /// Lower bound on any likelihood, so a single answer can never drive
    /// an entity's posterior contribution to zero.
    pub floor: f64,
    /// Likelihood used when an entity has no recorded value for the
    /// question, independent of the answer.
    pub neutral: f64,
}

impl Default for LikelihoodConfig {
    fn default() -> Self {
        Self {
            scaling: 0.45,
            floor: 0.1,
            neutral: 0.5,
        }
    }
}

impl LikelihoodConfig {
    pub fn from_env() -> Self {
        let base = Self::default();
        let scaling = parse_env_f64("MDG_LIKELIHOOD_SCALING", base.scaling).clamp(0.05, 0.45);
        let floor = parse_env_f64("MDG_LIKELIHOOD_FLOOR", base.floor).clamp(0.01, 0.5);
        let neutral = parse_env_f64("MDG_LIKELIHOOD_NEUTRAL", base.neutral).clamp(0.1, 1.0);

        Self {
            scaling,
            floor,
            neutral,
        }
    }
}

fn parse_env_f64(key: &str, fallback: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

/// Converts (expected value, answer) pairs into evidence strengths.
#[derive(Debug, Clone, Copy)]
pub struct LikelihoodModel {
    config: LikelihoodConfig,
}

impl LikelihoodModel {
    pub const fn new(config: LikelihoodConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(LikelihoodConfig::from_env())
    }

    pub const fn config(&self) -> LikelihoodConfig {
        self.config
    }

    /// Likelihood of `answer` given the entity's expected value, or the
    /// neutral constant when the entity has none.
    pub fn evaluate(&self, expected: Option<f64>, answer: Answer) -> f64 {
        let Some(expected) = expected else {
            return self.config.neutral;
        };
        let diff = (expected - answer.value()).abs();
        (1.0 - diff * self.config.scaling).max(self.config.floor)
    }
}

impl Default for LikelihoodModel {
    fn default() -> Self {
        Self::new(LikelihoodConfig::default())
    }
}
