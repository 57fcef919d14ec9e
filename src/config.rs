//! Model configuration
//!
//! Hyperparameters and iteration bounds for the Gibbs sampler, built once
//! before a run and immutable while it executes.

use crate::error::LdaError;

/// Default document-topic Dirichlet concentration.
pub const DEFAULT_ALPHA: f64 = 5.0;
/// Default topic-term Dirichlet concentration.
pub const DEFAULT_BETA: f64 = 0.5;
/// Default number of topics.
pub const DEFAULT_TOPIC_COUNT: usize = 10;
/// Default number of burn-in sweeps discarded before sampling.
pub const DEFAULT_BURN_IN_ITERATIONS: usize = 100;
/// Default number of sweeps between snapshots after burn-in.
///
/// This is an independent value, not an alias of the burn-in default: the
/// two control unrelated aspects of the chain.
pub const DEFAULT_ITERATIONS_PER_SAMPLE: usize = 10;
/// Default total sweep budget (burn-in included).
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// LDA model configuration
#[derive(Debug, Clone)]
pub struct LdaConfig {
    /// Document-topic prior concentration. Higher values make each document
    /// more likely to mix most of the topics; lower values concentrate each
    /// document on fewer topics.
    pub alpha: f64,
    /// Topic-term prior concentration. Higher values make each topic more
    /// likely to mix most of the vocabulary; lower values concentrate each
    /// topic on fewer terms.
    pub beta: f64,
    /// Number of latent topics.
    pub topic_count: usize,
    /// Sweeps to discard before collecting any statistics.
    pub burn_in_iterations: usize,
    /// Sweeps between statistic snapshots after burn-in.
    pub iterations_per_sample: usize,
    /// Total sweep budget, burn-in included.
    pub max_iterations: usize,
    /// Seed for the run's random source. `None` draws a fresh seed from
    /// entropy; a fixed seed makes the whole chain bit-for-bit reproducible.
    pub random_seed: Option<u64>,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            topic_count: DEFAULT_TOPIC_COUNT,
            burn_in_iterations: DEFAULT_BURN_IN_ITERATIONS,
            iterations_per_sample: DEFAULT_ITERATIONS_PER_SAMPLE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            random_seed: None,
        }
    }
}

impl LdaConfig {
    /// Create a configuration with the given number of topics and defaults
    /// for everything else.
    pub fn new(topic_count: usize) -> Self {
        Self {
            topic_count,
            ..Default::default()
        }
    }

    /// Set alpha (document-topic prior concentration)
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set beta (topic-term prior concentration)
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the number of burn-in sweeps
    pub fn burn_in_iterations(mut self, n: usize) -> Self {
        self.burn_in_iterations = n;
        self
    }

    /// Set the number of sweeps between snapshots
    pub fn iterations_per_sample(mut self, n: usize) -> Self {
        self.iterations_per_sample = n;
        self
    }

    /// Set the total sweep budget (burn-in included)
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set the random seed
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Check the configuration before any sampling begins.
    ///
    /// Invalid values are never discovered mid-run; they are rejected here.
    pub fn validate(&self) -> Result<(), LdaError> {
        if self.topic_count < 1 {
            return Err(LdaError::InvalidConfig(
                "topic count must be at least 1".to_string(),
            ));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(LdaError::InvalidConfig(format!(
                "alpha must be positive and finite, got {}",
                self.alpha
            )));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(LdaError::InvalidConfig(format!(
                "beta must be positive and finite, got {}",
                self.beta
            )));
        }
        if self.iterations_per_sample < 1 {
            return Err(LdaError::InvalidConfig(
                "iterations per sample must be at least 1".to_string(),
            ));
        }
        if self.max_iterations < self.burn_in_iterations {
            return Err(LdaError::InvalidConfig(format!(
                "max iterations ({}) must not be less than burn-in iterations ({})",
                self.max_iterations, self.burn_in_iterations
            )));
        }
        Ok(())
    }
}
