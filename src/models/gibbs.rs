//! Collapsed Gibbs sampler for LDA
//!
//! The algorithmic core: evolves per-token topic assignments through a
//! strictly sequential Markov chain, keeps the three count accumulators
//! consistent with the assignments at every step, and averages post-burn-in
//! snapshots into the final probability tables.
//!
//! The chain resamples each token's topic conditioned on all other
//! assignments, with the document- and topic-level mixture weights
//! integrated out:
//!
//! ```text
//! P(z = k | rest) ∝ (n_dk + alpha) * (n_kt + beta) / (n_k + beta * V)
//! ```
//!
//! Given the same configuration (seed included) and document order, every
//! draw and therefore the final tables are bit-for-bit reproducible.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LdaConfig;
use crate::preprocessing::vectorizer::DocumentVector;

/// Finalized output of one sampling run.
pub(crate) struct SampledTables {
    /// documents x topics, each row a probability distribution
    pub document_topic: Array2<f64>,
    /// topics x terms, each row a probability distribution
    pub topic_term: Array2<f64>,
    /// Model log-likelihood recorded at each snapshot
    pub log_likelihood: Vec<f64>,
}

/// One sampling run's mutable state.
///
/// Created at sampling start, mutated every sweep, consumed by
/// [`GibbsSampler::run`]; the assignment state and count accumulators never
/// outlive the run and are never exposed to callers.
pub(crate) struct GibbsSampler {
    config: LdaConfig,
    vocabulary_size: usize,
    /// Term index of every token occurrence, per document, in the fixed
    /// traversal order (ascending term index, each repeated by its count)
    doc_tokens: Vec<Vec<usize>>,
    /// Token count per document
    doc_lengths: Vec<u64>,
    /// Current topic label of every token occurrence
    assignments: Vec<Vec<usize>>,
    /// document x topic counts
    doc_topic_counts: Array2<u32>,
    /// topic x term counts
    topic_term_counts: Array2<u32>,
    /// Tokens currently assigned to each topic
    topic_totals: Array1<u32>,
    /// Running sums of per-snapshot probability estimates
    doc_topic_sum: Array2<f64>,
    topic_term_sum: Array2<f64>,
    sample_count: u32,
    log_likelihood: Vec<f64>,
    rng: StdRng,
}

impl GibbsSampler {
    /// Set up a run over vectorized documents.
    ///
    /// The configuration must already be validated; this only lays out the
    /// token stream and zeroed accumulators.
    pub(crate) fn new(
        config: LdaConfig,
        documents: &[DocumentVector],
        vocabulary_size: usize,
    ) -> Self {
        let n_docs = documents.len();
        let n_topics = config.topic_count;

        let doc_tokens: Vec<Vec<usize>> = documents
            .iter()
            .map(|doc| {
                doc.entries()
                    .iter()
                    .flat_map(|&(term, count)| std::iter::repeat(term).take(count as usize))
                    .collect()
            })
            .collect();
        let doc_lengths: Vec<u64> = documents.iter().map(|doc| doc.token_count()).collect();

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            vocabulary_size,
            assignments: doc_tokens.iter().map(|tokens| vec![0; tokens.len()]).collect(),
            doc_tokens,
            doc_lengths,
            doc_topic_counts: Array2::zeros((n_docs, n_topics)),
            topic_term_counts: Array2::zeros((n_topics, vocabulary_size)),
            topic_totals: Array1::zeros(n_topics),
            doc_topic_sum: Array2::zeros((n_docs, n_topics)),
            topic_term_sum: Array2::zeros((n_topics, vocabulary_size)),
            sample_count: 0,
            log_likelihood: Vec::new(),
            rng,
            config,
        }
    }

    /// Run the chain to completion and finalize the probability tables.
    ///
    /// `stop` is observed between sweeps only; when it fires the run
    /// finalizes from whatever snapshots exist so the tables are always
    /// well-formed distributions.
    pub(crate) fn run(mut self, stop: Option<&AtomicBool>) -> SampledTables {
        self.initialize();

        let burn_in = self.config.burn_in_iterations;
        let per_sample = self.config.iterations_per_sample;

        for sweep in 1..=self.config.max_iterations {
            if let Some(flag) = stop {
                if flag.load(Ordering::Relaxed) {
                    debug!("stop signal observed before sweep {}, finalizing", sweep);
                    break;
                }
            }

            self.sweep();

            if sweep > burn_in && (sweep - burn_in) % per_sample == 0 {
                self.snapshot();
                debug!(
                    "sweep {}: snapshot {} taken, log-likelihood {:.4}",
                    sweep,
                    self.sample_count,
                    self.log_likelihood.last().copied().unwrap_or(f64::NAN)
                );
            }
        }

        self.finalize()
    }

    /// Draw an initial uniform topic for every token occurrence and build
    /// the count accumulators.
    fn initialize(&mut self) {
        let n_topics = self.config.topic_count;
        for (doc, tokens) in self.doc_tokens.iter().enumerate() {
            for (pos, &term) in tokens.iter().enumerate() {
                let topic = self.rng.gen_range(0..n_topics);
                self.assignments[doc][pos] = topic;
                self.doc_topic_counts[[doc, topic]] += 1;
                self.topic_term_counts[[topic, term]] += 1;
                self.topic_totals[topic] += 1;
            }
        }
        debug!(
            "initialized {} token assignments across {} documents",
            self.topic_totals.iter().map(|&n| n as u64).sum::<u64>(),
            self.doc_tokens.len()
        );
    }

    /// One full sweep: resample every token occurrence in the same fixed
    /// traversal order as initialization.
    fn sweep(&mut self) {
        let n_topics = self.config.topic_count;
        let alpha = self.config.alpha;
        let beta = self.config.beta;
        let beta_sum = beta * self.vocabulary_size as f64;

        let mut weights = vec![0.0; n_topics];

        for (doc, tokens) in self.doc_tokens.iter().enumerate() {
            for (pos, &term) in tokens.iter().enumerate() {
                let old_topic = self.assignments[doc][pos];

                // Remove this token's contribution before resampling
                self.doc_topic_counts[[doc, old_topic]] -= 1;
                self.topic_term_counts[[old_topic, term]] -= 1;
                self.topic_totals[old_topic] -= 1;

                let mut total = 0.0;
                for (topic, weight) in weights.iter_mut().enumerate() {
                    *weight = (self.doc_topic_counts[[doc, topic]] as f64 + alpha)
                        * (self.topic_term_counts[[topic, term]] as f64 + beta)
                        / (self.topic_totals[topic] as f64 + beta_sum);
                    total += *weight;
                }

                let new_topic = draw(&weights, total, &mut self.rng);

                self.assignments[doc][pos] = new_topic;
                self.doc_topic_counts[[doc, new_topic]] += 1;
                self.topic_term_counts[[new_topic, term]] += 1;
                self.topic_totals[new_topic] += 1;
            }
        }
    }

    /// Record one smoothed probability estimate of both tables from the
    /// current counts, and the model log-likelihood alongside it.
    fn snapshot(&mut self) {
        let n_topics = self.config.topic_count;
        let alpha = self.config.alpha;
        let beta = self.config.beta;
        let alpha_sum = alpha * n_topics as f64;
        let beta_sum = beta * self.vocabulary_size as f64;

        for doc in 0..self.doc_tokens.len() {
            let denominator = self.doc_lengths[doc] as f64 + alpha_sum;
            for topic in 0..n_topics {
                self.doc_topic_sum[[doc, topic]] +=
                    (self.doc_topic_counts[[doc, topic]] as f64 + alpha) / denominator;
            }
        }

        for topic in 0..n_topics {
            let denominator = self.topic_totals[topic] as f64 + beta_sum;
            for term in 0..self.vocabulary_size {
                self.topic_term_sum[[topic, term]] +=
                    (self.topic_term_counts[[topic, term]] as f64 + beta) / denominator;
            }
        }

        self.sample_count += 1;
        let ll = self.compute_log_likelihood();
        self.log_likelihood.push(ll);
    }

    /// Average the accumulated snapshots into the final tables, discarding
    /// the assignment state and count accumulators.
    fn finalize(mut self) -> SampledTables {
        // A run stopped before its first snapshot still yields valid
        // distributions: estimate once from the current counts.
        if self.sample_count == 0 {
            self.snapshot();
        }

        let samples = self.sample_count as f64;
        debug!("finalizing from {} snapshot(s)", self.sample_count);

        SampledTables {
            document_topic: self.doc_topic_sum.mapv(|sum| sum / samples),
            topic_term: self.topic_term_sum.mapv(|sum| sum / samples),
            log_likelihood: self.log_likelihood,
        }
    }

    /// Log-likelihood of the corpus under the current smoothed estimates.
    fn compute_log_likelihood(&self) -> f64 {
        let n_topics = self.config.topic_count;
        let alpha = self.config.alpha;
        let beta = self.config.beta;
        let alpha_sum = alpha * n_topics as f64;
        let beta_sum = beta * self.vocabulary_size as f64;

        let mut ll = 0.0;

        for topic in 0..n_topics {
            let denominator = self.topic_totals[topic] as f64 + beta_sum;
            for term in 0..self.vocabulary_size {
                let count = self.topic_term_counts[[topic, term]];
                if count > 0 {
                    let prob = (count as f64 + beta) / denominator;
                    ll += count as f64 * prob.ln();
                }
            }
        }

        for doc in 0..self.doc_tokens.len() {
            let denominator = self.doc_lengths[doc] as f64 + alpha_sum;
            for topic in 0..n_topics {
                let count = self.doc_topic_counts[[doc, topic]];
                if count > 0 {
                    let prob = (count as f64 + alpha) / denominator;
                    ll += count as f64 * prob.ln();
                }
            }
        }

        ll
    }
}

/// Sample an index proportionally to unnormalized weights.
fn draw(weights: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let threshold = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative >= threshold {
            return index;
        }
    }
    weights.len() - 1
}
