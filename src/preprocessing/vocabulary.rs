//! Vocabulary construction
//!
//! Assigns each distinct term a stable integer index in first-seen order
//! and provides the reversible term <-> index mapping used everywhere else.

use hashbrown::HashMap;

/// Bidirectional mapping between terms and dense 0-based indices.
///
/// Indices are unique, contiguous, and assigned in first-encounter order
/// across the full document set; no index is reused or removed for the
/// lifetime of a run. Tokens are treated as opaque, already-normalized
/// strings: no casing or punctuation handling happens here, that is the
/// tokenization collaborator's contract.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Term -> index mapping
    term_to_index: HashMap<String, usize>,
    /// Index -> term mapping
    terms: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self {
            term_to_index: HashMap::new(),
            terms: Vec::new(),
        }
    }

    /// Build a vocabulary from an ordered collection of tokenized documents.
    ///
    /// Documents are scanned in order, tokens within a document in order;
    /// the first sight of a token's exact string assigns it the next unused
    /// index starting at 0. Empty input yields an empty vocabulary.
    pub fn from_documents<T: AsRef<str>>(documents: &[Vec<T>]) -> Self {
        let mut vocabulary = Self::new();
        for doc in documents {
            for token in doc {
                vocabulary.intern(token.as_ref());
            }
        }
        vocabulary
    }

    /// Return the index for `term`, assigning the next one on first sight.
    fn intern(&mut self, term: &str) -> usize {
        if let Some(&index) = self.term_to_index.get(term) {
            return index;
        }
        let index = self.terms.len();
        self.term_to_index.insert(term.to_string(), index);
        self.terms.push(term.to_string());
        index
    }

    /// Look up the index assigned to a term, if it was seen.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.term_to_index.get(term).copied()
    }

    /// Look up the origin string for a term index.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|s| s.as_str())
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been seen.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
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

    #[test]
    fn test_first_seen_order() {
        let documents = docs(&["bitcoin trading bitcoin", "ethereum trading"]);
        let vocabulary = Vocabulary::from_documents(&documents);

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.index_of("bitcoin"), Some(0));
        assert_eq!(vocabulary.index_of("trading"), Some(1));
        assert_eq!(vocabulary.index_of("ethereum"), Some(2));
    }

    #[test]
    fn test_reversible_mapping() {
        let documents = docs(&["alpha beta gamma"]);
        let vocabulary = Vocabulary::from_documents(&documents);

        for index in 0..vocabulary.len() {
            let term = vocabulary.term(index).unwrap();
            assert_eq!(vocabulary.index_of(term), Some(index));
        }
        assert_eq!(vocabulary.term(3), None);
    }

    #[test]
    fn test_exact_string_identity() {
        // No normalization: casing differences are distinct terms.
        let documents = docs(&["Java java JAVA"]);
        let vocabulary = Vocabulary::from_documents(&documents);
        assert_eq!(vocabulary.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let vocabulary = Vocabulary::from_documents::<String>(&[]);
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.index_of("anything"), None);

        let vocabulary = Vocabulary::from_documents(&docs(&["", ""]));
        assert!(vocabulary.is_empty());
    }
}
