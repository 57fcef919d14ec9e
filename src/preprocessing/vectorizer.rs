//! Document vectorization
//!
//! Converts tokenized documents into sparse term-count vectors over a
//! previously built [`Vocabulary`].

use hashbrown::HashMap;
use ndarray::Array1;

use crate::error::LdaError;
use crate::preprocessing::vocabulary::Vocabulary;

/// Sparse term-count vector for one document.
///
/// Entries are (term index, occurrence count) pairs in ascending term-index
/// order, so iteration order is fixed and deterministic. The sum of counts
/// equals the document's token count.
#[derive(Debug, Clone)]
pub struct DocumentVector {
    /// (term index, count) pairs, ascending by term index
    entries: Vec<(usize, u32)>,
    /// Total number of token occurrences in the document
    token_count: u64,
}

impl DocumentVector {
    /// The sparse (term index, count) entries in ascending index order.
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// Total token occurrences (the document's length).
    pub fn token_count(&self) -> u64 {
        self.token_count
    }

    /// Number of distinct terms in the document.
    pub fn distinct_terms(&self) -> usize {
        self.entries.len()
    }

    /// Expand into a dense count vector of the given vocabulary size.
    pub fn to_dense(&self, vocabulary_size: usize) -> Array1<u32> {
        let mut dense = Array1::zeros(vocabulary_size);
        for &(index, count) in &self.entries {
            dense[index] = count;
        }
        dense
    }
}

/// Vectorize one tokenized document against a vocabulary.
///
/// Every document passed here must have been included when the vocabulary
/// was built; a token absent from the vocabulary is a contract violation
/// and fails with [`LdaError::InvalidInput`] rather than being skipped.
pub fn vectorize<T: AsRef<str>>(
    document: &[T],
    vocabulary: &Vocabulary,
) -> Result<DocumentVector, LdaError> {
    let mut counts: HashMap<usize, u32> = HashMap::with_capacity(document.len());
    for token in document {
        let token = token.as_ref();
        let index = vocabulary.index_of(token).ok_or_else(|| {
            LdaError::InvalidInput(format!(
                "token {:?} is not in the vocabulary this document was vectorized against",
                token
            ))
        })?;
        *counts.entry(index).or_insert(0) += 1;
    }

    let mut entries: Vec<(usize, u32)> = counts.into_iter().collect();
    entries.sort_unstable_by_key(|&(index, _)| index);

    Ok(DocumentVector {
        entries,
        token_count: document.len() as u64,
    })
}

/// Vectorize a whole document collection in order.
pub fn vectorize_all<T: AsRef<str>>(
    documents: &[Vec<T>],
    vocabulary: &Vocabulary,
) -> Result<Vec<DocumentVector>, LdaError> {
    documents
        .iter()
        .map(|doc| vectorize(doc, vocabulary))
        .collect()
}
