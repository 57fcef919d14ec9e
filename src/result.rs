//! Fitted model results
//!
//! An immutable snapshot of the two probability tables plus the vocabulary,
//! with ranking and threshold queries over both.

use ndarray::{Array2, ArrayView1};

use crate::error::LdaError;
use crate::preprocessing::vocabulary::Vocabulary;

/// The outcome of fitting an LDA model: the document-topic and topic-term
/// probability tables, keyed through the run's vocabulary.
///
/// Document indices refer to positions in the collection passed to
/// [`Lda::fit`](crate::Lda::fit); term indices are resolved back to their
/// origin strings through the vocabulary. Everything here is a pure read;
/// nothing mutates after construction.
#[derive(Debug, Clone)]
pub struct LdaResult {
    /// documents x topics, each row summing to 1
    document_topic: Array2<f64>,
    /// topics x terms, each row summing to 1
    topic_term: Array2<f64>,
    vocabulary: Vocabulary,
    log_likelihood: Vec<f64>,
}

impl LdaResult {
    pub(crate) fn new(
        document_topic: Array2<f64>,
        topic_term: Array2<f64>,
        vocabulary: Vocabulary,
        log_likelihood: Vec<f64>,
    ) -> Self {
        Self {
            document_topic,
            topic_term,
            vocabulary,
            log_likelihood,
        }
    }

    /// Number of documents the model was fitted on.
    pub fn num_documents(&self) -> usize {
        self.document_topic.nrows()
    }

    /// Number of latent topics.
    pub fn num_topics(&self) -> usize {
        self.topic_term.nrows()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn num_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// The documents x topics probability table.
    pub fn document_topic_probabilities(&self) -> &Array2<f64> {
        &self.document_topic
    }

    /// The topics x terms probability table.
    pub fn topic_term_probabilities(&self) -> &Array2<f64> {
        &self.topic_term
    }

    /// The vocabulary mapping term indices to origin strings.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Origin string for a term index, if in range.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.vocabulary.term(index)
    }

    /// Model log-likelihood recorded at each post-burn-in snapshot, in
    /// chronological order.
    pub fn log_likelihood_history(&self) -> &[f64] {
        &self.log_likelihood
    }

    /// The `n` highest-probability terms for a topic, most probable first.
    ///
    /// Asking for more terms than the vocabulary holds returns every term;
    /// `n = 0` returns an empty list.
    pub fn top_terms_for_topic(&self, topic_index: usize, n: usize) -> Result<Vec<&str>, LdaError> {
        let row = self.topic_row(topic_index)?;
        let mut ranked = ranked_pairs(row);
        ranked.truncate(n);
        Ok(self.resolve_terms(ranked))
    }

    /// Terms whose probability in the topic strictly exceeds `min_prob`,
    /// most probable first. `min_prob >= 1.0` always yields an empty list.
    pub fn terms_above_threshold(
        &self,
        topic_index: usize,
        min_prob: f64,
    ) -> Result<Vec<&str>, LdaError> {
        let row = self.topic_row(topic_index)?;
        let mut ranked = ranked_pairs(row);
        ranked.retain(|&(_, prob)| prob > min_prob);
        Ok(self.resolve_terms(ranked))
    }

    /// The `n` highest-probability topic indices for a document, most
    /// probable first.
    pub fn top_topics_for_document(
        &self,
        document_index: usize,
        n: usize,
    ) -> Result<Vec<usize>, LdaError> {
        let row = self.document_row(document_index)?;
        let mut ranked = ranked_pairs(row);
        ranked.truncate(n);
        Ok(ranked.into_iter().map(|(index, _)| index).collect())
    }

    /// Topic indices whose probability for the document strictly exceeds
    /// `min_prob`, most probable first.
    pub fn topics_above_threshold(
        &self,
        document_index: usize,
        min_prob: f64,
    ) -> Result<Vec<usize>, LdaError> {
        let row = self.document_row(document_index)?;
        let mut ranked = ranked_pairs(row);
        ranked.retain(|&(_, prob)| prob > min_prob);
        Ok(ranked.into_iter().map(|(index, _)| index).collect())
    }

    /// The single most probable topic for a document.
    pub fn most_likely_topic(&self, document_index: usize) -> Result<usize, LdaError> {
        let top = self.top_topics_for_document(document_index, 1)?;
        // topic_count >= 1 is enforced at configuration time
        Ok(top[0])
    }

    fn topic_row(&self, topic_index: usize) -> Result<ArrayView1<'_, f64>, LdaError> {
        if topic_index >= self.num_topics() {
            return Err(LdaError::IndexOutOfRange {
                kind: "topic",
                index: topic_index,
                count: self.num_topics(),
            });
        }
        Ok(self.topic_term.row(topic_index))
    }

    fn document_row(&self, document_index: usize) -> Result<ArrayView1<'_, f64>, LdaError> {
        if document_index >= self.num_documents() {
            return Err(LdaError::IndexOutOfRange {
                kind: "document",
                index: document_index,
                count: self.num_documents(),
            });
        }
        Ok(self.document_topic.row(document_index))
    }

    fn resolve_terms(&self, ranked: Vec<(usize, f64)>) -> Vec<&str> {
        ranked
            .into_iter()
            .filter_map(|(index, _)| self.vocabulary.term(index))
            .collect()
    }
}

/// Pair each index of a probability row with its value and sort by value
/// descending, ties broken by ascending index for reproducibility.
fn ranked_pairs(row: ArrayView1<'_, f64>) -> Vec<(usize, f64)> {
    let mut pairs: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    pairs.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn result_with_topic_row() -> LdaResult {
        let documents: Vec<Vec<String>> = vec!["what when where why who"
            .split_whitespace()
            .map(String::from)
            .collect()];
        let vocabulary = Vocabulary::from_documents(&documents);

        let document_topic = arr2(&[[0.6, 0.4]]);
        let topic_term = arr2(&[
            [0.15, 0.3, 0.2, 0.25, 0.1],
            [0.2, 0.2, 0.2, 0.2, 0.2],
        ]);
        LdaResult::new(document_topic, topic_term, vocabulary, Vec::new())
    }

    fn result_with_document_row() -> LdaResult {
        let documents: Vec<Vec<String>> =
            vec!["t".split_whitespace().map(String::from).collect()];
        let vocabulary = Vocabulary::from_documents(&documents);

        let document_topic = arr2(&[[0.15, 0.3, 0.2, 0.25, 0.1]]);
        let topic_term = arr2(&[[1.0], [1.0], [1.0], [1.0], [1.0]]);
        LdaResult::new(document_topic, topic_term, vocabulary, Vec::new())
    }

    #[test]
    fn test_top_terms_for_topic() {
        let result = result_with_topic_row();
        let words = result.top_terms_for_topic(0, 3).unwrap();
        assert_eq!(words, vec!["when", "why", "where"]);
    }

    #[test]
    fn test_top_terms_truncates_to_vocabulary_size() {
        let result = result_with_topic_row();
        let words = result.top_terms_for_topic(0, 100).unwrap();
        assert_eq!(words.len(), 5);
    }

    #[test]
    fn test_top_terms_zero_is_empty() {
        let result = result_with_topic_row();
        assert!(result.top_terms_for_topic(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_terms_above_threshold_is_strict() {
        let result = result_with_topic_row();
        let words = result.terms_above_threshold(0, 0.249).unwrap();
        assert_eq!(words, vec!["when", "why"]);

        // 0.25 is not strictly greater than 0.25
        let words = result.terms_above_threshold(0, 0.25).unwrap();
        assert_eq!(words, vec!["when"]);

        // no probability can exceed 1
        assert!(result.terms_above_threshold(0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_break_by_ascending_index() {
        let result = result_with_topic_row();
        let words = result.top_terms_for_topic(1, 5).unwrap();
        assert_eq!(words, vec!["what", "when", "where", "why", "who"]);
    }

    #[test]
    fn test_top_topics_for_document() {
        let result = result_with_document_row();
        let topics = result.top_topics_for_document(0, 3).unwrap();
        assert_eq!(topics, vec![1, 3, 2]);
    }

    #[test]
    fn test_topics_above_threshold() {
        let result = result_with_document_row();
        let topics = result.topics_above_threshold(0, 0.249).unwrap();
        assert_eq!(topics, vec![1, 3]);
    }

    #[test]
    fn test_most_likely_topic() {
        let result = result_with_document_row();
        assert_eq!(result.most_likely_topic(0).unwrap(), 1);
    }

    #[test]
    fn test_out_of_range_document_index() {
        let result = result_with_document_row();
        let err = result.most_likely_topic(1).unwrap_err();
        assert!(matches!(
            err,
            LdaError::IndexOutOfRange {
                kind: "document",
                index: 1,
                count: 1,
            }
        ));
    }

    #[test]
    fn test_out_of_range_topic_index() {
        let result = result_with_topic_row();
        let err = result.top_terms_for_topic(2, 1).unwrap_err();
        assert!(matches!(err, LdaError::IndexOutOfRange { kind: "topic", .. }));
        let err = result.terms_above_threshold(9, 0.0).unwrap_err();
        assert!(matches!(err, LdaError::IndexOutOfRange { kind: "topic", .. }));
    }
}
