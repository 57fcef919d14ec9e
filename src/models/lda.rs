//! LDA model fitting
//!
//! Wires the pipeline together: vocabulary construction, document
//! vectorization, the Gibbs sampling run, and the result snapshot.

use std::sync::atomic::AtomicBool;

use log::info;

use crate::config::LdaConfig;
use crate::error::LdaError;
use crate::models::gibbs::GibbsSampler;
use crate::preprocessing::vectorizer::vectorize_all;
use crate::preprocessing::vocabulary::Vocabulary;
use crate::result::LdaResult;

/// Latent Dirichlet Allocation model runner.
///
/// Holds a validated configuration and fits tokenized document collections
/// with collapsed Gibbs sampling. A single fitting run owns its vocabulary,
/// random source, and count state exclusively, so independent runs (even
/// with the same `Lda`) may execute concurrently on separate threads.
///
/// # Examples
///
/// ```
/// use simple_lda::{Lda, LdaConfig};
///
/// let documents: Vec<Vec<String>> = vec![
///     "apple banana apple".split_whitespace().map(String::from).collect(),
///     "carrot banana carrot".split_whitespace().map(String::from).collect(),
/// ];
///
/// let lda = Lda::new(
///     LdaConfig::new(2)
///         .burn_in_iterations(20)
///         .max_iterations(100)
///         .random_seed(42),
/// )
/// .expect("config is valid");
///
/// let result = lda.fit(&documents).expect("fit succeeds");
/// assert_eq!(result.num_documents(), 2);
/// assert_eq!(result.num_topics(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Lda {
    config: LdaConfig,
}

impl Lda {
    /// Create a model runner, rejecting invalid configurations before any
    /// sampling can start.
    pub fn new(config: LdaConfig) -> Result<Self, LdaError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a model runner with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: LdaConfig::default(),
        }
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &LdaConfig {
        &self.config
    }

    /// Fit the model to an ordered collection of tokenized documents.
    ///
    /// Documents must arrive already tokenized and normalized; tokens are
    /// opaque strings. The returned [`LdaResult`] refers to documents by
    /// their position in `documents`.
    pub fn fit<T: AsRef<str>>(&self, documents: &[Vec<T>]) -> Result<LdaResult, LdaError> {
        self.fit_inner(documents, None)
    }

    /// Like [`fit`](Self::fit), but observes `stop` between sweeps: once it
    /// becomes true the chain finalizes early from the statistics gathered
    /// so far. Cancellation granularity is one full sweep.
    pub fn fit_until<T: AsRef<str>>(
        &self,
        documents: &[Vec<T>],
        stop: &AtomicBool,
    ) -> Result<LdaResult, LdaError> {
        self.fit_inner(documents, Some(stop))
    }

    fn fit_inner<T: AsRef<str>>(
        &self,
        documents: &[Vec<T>],
        stop: Option<&AtomicBool>,
    ) -> Result<LdaResult, LdaError> {
        if documents.is_empty() {
            return Err(LdaError::InvalidInput(
                "document collection is empty".to_string(),
            ));
        }

        let vocabulary = Vocabulary::from_documents(documents);
        if vocabulary.is_empty() {
            return Err(LdaError::InvalidInput(
                "documents contain no tokens".to_string(),
            ));
        }

        let vectors = vectorize_all(documents, &vocabulary)?;

        info!(
            "fitting LDA: {} documents, {} terms, {} topics, {} max iterations",
            documents.len(),
            vocabulary.len(),
            self.config.topic_count,
            self.config.max_iterations
        );

        let sampler = GibbsSampler::new(self.config.clone(), &vectors, vocabulary.len());
        let tables = sampler.run(stop);

        info!(
            "fit complete: {} log-likelihood snapshot(s), final {:.4}",
            tables.log_likelihood.len(),
            tables.log_likelihood.last().copied().unwrap_or(f64::NAN)
        );

        Ok(LdaResult::new(
            tables.document_topic,
            tables.topic_term,
            vocabulary,
            tables.log_likelihood,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.split_whitespace().map(String::from).collect())
            .collect()
    }

    /// Three groups of documents, each dominated by a distinct repeated term.
    fn three_theme_corpus() -> Vec<Vec<String>> {
        docs(&[
            "pokemon pokemon pokemon pokemon video games fictional world pokemon",
            "pokemon pokemon pokemon pokemon video games fictional world pokemon",
            "pokemon pokemon pokemon pokemon video games fictional world pokemon",
            "java java java java computer programming language concurrent implementation",
            "java java java java computer programming language concurrent implementation",
            "java java java java computer programming language concurrent implementation",
            "derivative derivative derivative derivative function real variable measures sensitivity",
            "derivative derivative derivative derivative function real variable measures sensitivity",
            "derivative derivative derivative derivative function real variable measures sensitivity",
        ])
    }

    fn grouped_config() -> LdaConfig {
        LdaConfig::new(3)
            .alpha(0.1)
            .beta(0.01)
            .burn_in_iterations(200)
            .iterations_per_sample(10)
            .max_iterations(1000)
            .random_seed(42)
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        assert!(matches!(
            Lda::new(LdaConfig::new(0)),
            Err(LdaError::InvalidConfig(_))
        ));
        assert!(matches!(
            Lda::new(LdaConfig::new(2).alpha(-0.5)),
            Err(LdaError::InvalidConfig(_))
        ));
        assert!(matches!(
            Lda::new(LdaConfig::new(2).beta(0.0)),
            Err(LdaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_collection_is_invalid_input() {
        let lda = Lda::with_defaults();
        let err = lda.fit::<String>(&[]).unwrap_err();
        assert!(matches!(err, LdaError::InvalidInput(_)));
    }

    #[test]
    fn test_token_free_collection_is_invalid_input() {
        let lda = Lda::with_defaults();
        let err = lda.fit(&docs(&["", ""])).unwrap_err();
        assert!(matches!(err, LdaError::InvalidInput(_)));
    }

    #[test]
    fn test_result_dimensions() {
        let documents = three_theme_corpus();
        let lda = Lda::new(grouped_config()).unwrap();
        let result = lda.fit(&documents).unwrap();

        let distinct_terms: std::collections::HashSet<&String> =
            documents.iter().flatten().collect();

        assert_eq!(result.num_documents(), 9);
        assert_eq!(result.num_topics(), 3);
        assert_eq!(result.num_terms(), distinct_terms.len());
        assert_eq!(result.document_topic_probabilities().dim(), (9, 3));
        assert_eq!(
            result.topic_term_probabilities().dim(),
            (3, distinct_terms.len())
        );
    }

    #[test]
    fn test_row_sums_are_one() {
        let lda = Lda::new(grouped_config()).unwrap();
        let result = lda.fit(&three_theme_corpus()).unwrap();

        for row in result.document_topic_probabilities().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
        for row in result.topic_term_probabilities().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_groups_separate_into_topics() {
        let lda = Lda::new(grouped_config()).unwrap();
        let result = lda.fit(&three_theme_corpus()).unwrap();

        let dominant_term = |doc_range: std::ops::Range<usize>| -> &str {
            let topics: Vec<usize> = doc_range
                .map(|doc| result.most_likely_topic(doc).unwrap())
                .collect();
            assert!(
                topics.windows(2).all(|pair| pair[0] == pair[1]),
                "documents of one group landed on different topics: {:?}",
                topics
            );
            result.top_terms_for_topic(topics[0], 1).unwrap()[0]
        };

        assert_eq!(dominant_term(0..3), "pokemon");
        assert_eq!(dominant_term(3..6), "java");
        assert_eq!(dominant_term(6..9), "derivative");
    }

    #[test]
    fn test_identical_seeds_give_identical_tables() {
        let documents = three_theme_corpus();
        let first = Lda::new(grouped_config()).unwrap().fit(&documents).unwrap();
        let second = Lda::new(grouped_config()).unwrap().fit(&documents).unwrap();

        assert_eq!(
            first.document_topic_probabilities(),
            second.document_topic_probabilities()
        );
        assert_eq!(
            first.topic_term_probabilities(),
            second.topic_term_probabilities()
        );
    }

    #[test]
    fn test_out_of_range_document_query() {
        let lda = Lda::new(grouped_config()).unwrap();
        let result = lda.fit(&three_theme_corpus()).unwrap();
        assert!(matches!(
            result.most_likely_topic(9),
            Err(LdaError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_stop_signal_between_sweeps() {
        let documents = three_theme_corpus();
        let lda = Lda::new(grouped_config()).unwrap();
        let stop = AtomicBool::new(true);

        // An already-set flag halts before the first sweep; the result is
        // still a complete, normalized model.
        let result = lda.fit_until(&documents, &stop).unwrap();
        assert_eq!(result.num_documents(), 9);
        for row in result.document_topic_probabilities().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }
}
