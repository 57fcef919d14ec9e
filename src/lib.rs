//! Latent Dirichlet Allocation over tokenized documents.
//!
//! This crate fits a topic model to a collection of already-tokenized text
//! documents using collapsed Gibbs sampling, producing two probability
//! tables:
//! - a distribution over topics for each document, and
//! - a distribution over vocabulary terms for each topic.
//!
//! Tokenization, corpus loading, and persistence are the caller's concern;
//! this crate receives documents as ordered sequences of opaque token
//! strings and hands back an immutable [`LdaResult`] for querying.
//!
//! # Quick Start
//!
//! ```
//! use simple_lda::{Lda, LdaConfig};
//!
//! let documents: Vec<Vec<String>> = [
//!     "bitcoin trading bitcoin price",
//!     "ethereum contract ethereum gas",
//!     "bitcoin price trading volume",
//! ]
//! .iter()
//! .map(|doc| doc.split_whitespace().map(String::from).collect())
//! .collect();
//!
//! let lda = Lda::new(
//!     LdaConfig::new(2)
//!         .alpha(0.1)
//!         .beta(0.01)
//!         .burn_in_iterations(50)
//!         .max_iterations(200)
//!         .random_seed(42),
//! )?;
//!
//! let result = lda.fit(&documents)?;
//! let top = result.top_terms_for_topic(0, 3)?;
//! assert_eq!(top.len(), 3);
//! # Ok::<(), simple_lda::LdaError>(())
//! ```
//!
//! Fitting with the same configuration (seed included) and the same document
//! order is bit-for-bit reproducible. Separate fitting runs share no state
//! and may execute concurrently on independent threads.

pub mod config;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod result;

pub use config::LdaConfig;
pub use error::LdaError;
pub use models::lda::Lda;
pub use preprocessing::vectorizer::{vectorize, vectorize_all, DocumentVector};
pub use preprocessing::vocabulary::Vocabulary;
pub use result::LdaResult;
