//! Topic model inference
//!
//! This module provides:
//! - The collapsed Gibbs sampling engine driving the Markov chain
//! - The `Lda` runner tying preprocessing, sampling, and results together

pub(crate) mod gibbs;
pub mod lda;
