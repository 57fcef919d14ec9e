//! Input preprocessing
//!
//! Builds the run's vocabulary and converts already-tokenized documents
//! into sparse term-count vectors. No tokenization, stemming, or stop-word
//! removal happens here; documents arrive as ordered token sequences.

pub mod vectorizer;
pub mod vocabulary;
