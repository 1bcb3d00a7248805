use std::sync::Arc;

use docgauge::domain::ports::TokenCounter;
use docgauge::services::chunker::{Chunker, PARAGRAPH_SEPARATOR};
use proptest::prelude::*;

/// One token per whitespace-separated word. Deterministic and linear, so
/// properties can reason about budgets exactly.
struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

fn chunker(max_tokens: usize) -> Chunker {
    Chunker::new(Arc::new(WordCounter), max_tokens)
}

/// Arbitrary documents: up to 12 paragraphs of up to 30 short words,
/// some paragraphs carrying sentence terminators.
fn document_strategy() -> impl Strategy<Value = String> {
    let word = prop::sample::select(vec![
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    ]);
    let sentence = (prop::collection::vec(word, 1..8), prop::bool::ANY).prop_map(
        |(words, terminated)| {
            let mut s = words.join(" ");
            if terminated {
                s.push('.');
            }
            s
        },
    );
    let paragraph =
        prop::collection::vec(sentence, 1..5).prop_map(|sentences| sentences.join(" "));
    prop::collection::vec(paragraph, 1..12)
        .prop_map(|paragraphs| paragraphs.join(PARAGRAPH_SEPARATOR))
}

proptest! {
    /// Property: no chunk exceeds the budget unless it is a single
    /// sentence that alone exceeds it.
    #[test]
    fn prop_chunks_respect_the_token_budget(
        text in document_strategy(),
        max_tokens in 4usize..64
    ) {
        let counter = WordCounter;
        for chunk in chunker(max_tokens).split(&text) {
            if chunk.token_count > max_tokens {
                // The only sanctioned overflow: an indivisible sentence.
                prop_assert!(
                    !chunk.text.contains(PARAGRAPH_SEPARATOR),
                    "oversized chunk spans paragraphs: {:?}",
                    chunk.text
                );
                prop_assert!(
                    counter.count(&chunk.text) > max_tokens,
                    "chunk reported oversized but measures within budget"
                );
            }
        }
    }

    /// Property: chunking preserves every word in order. Joining the
    /// chunks and normalizing whitespace reproduces the source text.
    #[test]
    fn prop_no_content_is_lost_or_reordered(
        text in document_strategy(),
        max_tokens in 4usize..64
    ) {
        let chunks = chunker(max_tokens).split(&text);

        let original: Vec<&str> = text.split_whitespace().collect();
        let reconstructed: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.text.split_whitespace())
            .collect();
        prop_assert_eq!(original, reconstructed);
    }

    /// Property: chunk indices are dense and ordered, and reported token
    /// counts match a fresh measurement of the emitted text.
    #[test]
    fn prop_indices_are_dense_and_counts_are_honest(
        text in document_strategy(),
        max_tokens in 4usize..64
    ) {
        let counter = WordCounter;
        let chunks = chunker(max_tokens).split(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, i);
            prop_assert_eq!(chunk.token_count, counter.count(&chunk.text));
        }
    }

    /// Property: chunking is deterministic. Two runs over the same input
    /// produce identical sequences.
    #[test]
    fn prop_chunking_is_deterministic(
        text in document_strategy(),
        max_tokens in 4usize..64
    ) {
        let splitter = chunker(max_tokens);
        prop_assert_eq!(splitter.split(&text), splitter.split(&text));
    }
}
