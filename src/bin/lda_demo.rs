//! LDA demonstration
//!
//! Fits a small three-theme corpus and prints:
//! - The top terms discovered for each topic
//! - The most likely topic for each document
//! - The log-likelihood trace recorded during sampling
//!
//! The crate expects pre-tokenized input, so this demo stands in for the
//! tokenization collaborator with a lowercase whitespace split.

use anyhow::Result;
use simple_lda::{Lda, LdaConfig};

fn main() -> Result<()> {
    env_logger::init();

    println!("=== LDA Topic Modeling Demo ===\n");

    let raw_documents = sample_corpus();
    let documents: Vec<Vec<String>> = raw_documents
        .iter()
        .map(|doc| doc.to_lowercase().split_whitespace().map(String::from).collect())
        .collect();

    println!("Loaded {} pre-tokenized documents", documents.len());

    let n_topics = 3;
    let config = LdaConfig::new(n_topics)
        .alpha(0.1)
        .beta(0.01)
        .burn_in_iterations(200)
        .iterations_per_sample(10)
        .max_iterations(1000)
        .random_seed(42);

    println!("Fitting {} topics (this may take a moment)...\n", n_topics);
    let lda = Lda::new(config)?;
    let result = lda.fit(&documents)?;

    println!("=== Discovered Topics ===\n");
    for topic in 0..result.num_topics() {
        let terms = result.top_terms_for_topic(topic, 5)?;
        println!("Topic {}: {}", topic, terms.join(", "));
    }

    println!("\n=== Document Assignments ===\n");
    for (index, doc) in raw_documents.iter().enumerate() {
        let topic = result.most_likely_topic(index)?;
        let probability = result.document_topic_probabilities()[[index, topic]];
        let preview: String = doc.chars().take(40).collect();
        println!(
            "Doc {:2}: topic {} ({:.1}%) - {}...",
            index,
            topic,
            probability * 100.0,
            preview
        );
    }

    println!("\n=== Convergence ===\n");
    let history = result.log_likelihood_history();
    let step = (history.len() / 10).max(1);
    for (index, ll) in history.iter().enumerate().step_by(step) {
        println!("Snapshot {:3}: log-likelihood {:.2}", index, ll);
    }
    if let Some(last) = history.last() {
        println!("\nFinal log-likelihood: {:.2}", last);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

/// A small corpus with three obvious themes: games, programming, and math.
fn sample_corpus() -> Vec<String> {
    let texts = vec![
        "Pokemon pokemon pokemon pokemon video games fictional world pokemon",
        "Pokemon pokemon pokemon pokemon video games fictional world pokemon",
        "Pokemon pokemon pokemon pokemon video games fictional world pokemon",
        "Java java java java computer programming language concurrent implementation",
        "Java java java java computer programming language concurrent implementation",
        "Java java java java computer programming language concurrent implementation",
        "Derivative derivative derivative derivative function real variable measures sensitivity",
        "Derivative derivative derivative derivative function real variable measures sensitivity",
        "Derivative derivative derivative derivative function real variable measures sensitivity",
    ];

    texts.into_iter().map(String::from).collect()
}
