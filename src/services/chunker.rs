//! Token-aware text chunking.
//!
//! Splits document text into an ordered sequence of token-bounded chunks,
//! preferring paragraph boundaries and falling back to sentence boundaries
//! when a single paragraph exceeds the budget. Chunking is a pure,
//! synchronous computation: identical input and budget always produce the
//! identical chunk sequence.

use std::sync::Arc;

use crate::domain::models::Chunk;
use crate::domain::ports::TokenCounter;

/// Separator used to join paragraphs inside an emitted chunk. Matches the
/// separator the extractor uses between paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits text into token-bounded chunks.
pub struct Chunker {
    counter: Arc<dyn TokenCounter>,
    max_tokens: usize,
}

impl Chunker {
    /// Create a chunker with the given token budget per chunk.
    ///
    /// # Panics
    /// Panics if `max_tokens` is 0.
    pub fn new(counter: Arc<dyn TokenCounter>, max_tokens: usize) -> Self {
        assert!(max_tokens > 0, "max_tokens must be greater than 0");
        Self {
            counter,
            max_tokens,
        }
    }

    /// Split raw document text, treating blank lines as paragraph breaks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let paragraphs: Vec<&str> = text.split(PARAGRAPH_SEPARATOR).collect();
        self.split_paragraph_refs(&paragraphs)
    }

    /// Split an already-segmented paragraph sequence.
    pub fn split_paragraphs(&self, paragraphs: &[String]) -> Vec<Chunk> {
        let refs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        self.split_paragraph_refs(&refs)
    }

    fn split_paragraph_refs(&self, paragraphs: &[&str]) -> Vec<Chunk> {
        // Whitespace-only paragraphs carry no content and are dropped
        // before any accumulation.
        let paragraphs: Vec<&str> = paragraphs
            .iter()
            .copied()
            .filter(|p| !p.trim().is_empty())
            .collect();

        let separator_tokens = self.counter.count(PARAGRAPH_SEPARATOR);

        let mut texts: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0usize;

        for paragraph in paragraphs {
            let paragraph_tokens = self.counter.count(paragraph);

            if paragraph_tokens > self.max_tokens {
                // The paragraph alone busts the budget: close whatever is
                // accumulated, then fall back to sentence granularity.
                // Sentence chunks stay within this paragraph and are never
                // merged with the following paragraphs.
                Self::flush(&mut texts, &mut current, &mut current_tokens);
                self.split_oversized_paragraph(paragraph, &mut texts);
                continue;
            }

            let join_cost = if current.is_empty() {
                0
            } else {
                separator_tokens
            };
            if !current.is_empty() && current_tokens + join_cost + paragraph_tokens > self.max_tokens
            {
                Self::flush(&mut texts, &mut current, &mut current_tokens);
            }

            current_tokens += if current.is_empty() {
                paragraph_tokens
            } else {
                separator_tokens + paragraph_tokens
            };
            current.push(paragraph);
        }

        Self::flush(&mut texts, &mut current, &mut current_tokens);

        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                // Token count is re-measured on the emitted text, not
                // summed from parts, so encoding non-linearity at the join
                // points cannot skew the aggregation weights.
                let token_count = self.counter.count(&text);
                Chunk::new(index, text, token_count)
            })
            .collect()
    }

    /// Greedily accumulate the sentences of one oversized paragraph.
    ///
    /// A single sentence that still exceeds the budget is emitted as its
    /// own oversized chunk: no content is ever truncated or dropped.
    fn split_oversized_paragraph(&self, paragraph: &str, texts: &mut Vec<String>) {
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0usize;
        let space_tokens = self.counter.count(" ");

        for sentence in split_sentences(paragraph) {
            let sentence_tokens = self.counter.count(sentence);

            if sentence_tokens > self.max_tokens {
                if !current.is_empty() {
                    texts.push(current.join(" "));
                    current.clear();
                    current_tokens = 0;
                }
                texts.push(sentence.to_string());
                continue;
            }

            let join_cost = if current.is_empty() { 0 } else { space_tokens };
            if !current.is_empty() && current_tokens + join_cost + sentence_tokens > self.max_tokens
            {
                texts.push(current.join(" "));
                current.clear();
                current_tokens = 0;
            }

            current_tokens += if current.is_empty() {
                sentence_tokens
            } else {
                space_tokens + sentence_tokens
            };
            current.push(sentence);
        }

        if !current.is_empty() {
            texts.push(current.join(" "));
        }
    }

    fn flush(texts: &mut Vec<String>, current: &mut Vec<&str>, current_tokens: &mut usize) {
        if !current.is_empty() {
            texts.push(current.join(PARAGRAPH_SEPARATOR));
            current.clear();
            *current_tokens = 0;
        }
    }
}

/// Split a paragraph at sentence boundaries.
///
/// A boundary is a `.`, `!` or `?` followed by whitespace (or end of
/// input). Terminators stay attached to their sentence; surrounding
/// whitespace is trimmed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars
                .peek()
                .is_none_or(|(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic counter: one token per whitespace-separated word.
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    fn chunker(max_tokens: usize) -> Chunker {
        Chunker::new(Arc::new(WordCounter), max_tokens)
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunker(10).split("").is_empty());
        assert!(chunker(10).split("   \n\n \t ").is_empty());
    }

    #[test]
    fn short_document_is_one_chunk() {
        let chunks = chunker(100).split("one two three\n\nfour five");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].text, "one two three\n\nfour five");
        assert_eq!(chunks[0].token_count, 5);
    }

    #[test]
    fn paragraphs_accumulate_greedily_up_to_the_budget() {
        // Three-word paragraphs, budget six: two paragraphs per chunk.
        let text = "a b c\n\nd e f\n\ng h i\n\nj k l";
        let chunks = chunker(6).split(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a b c\n\nd e f");
        assert_eq!(chunks[1].text, "g h i\n\nj k l");
        assert_eq!(chunks[0].token_count, 6);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn every_chunk_respects_the_token_bound() {
        let text = "one two\n\nthree four five six\n\nseven\n\neight nine ten";
        for max in 4..8 {
            for chunk in chunker(max).split(text) {
                assert!(
                    chunk.token_count <= max,
                    "chunk {:?} exceeds budget {}",
                    chunk.text,
                    max
                );
            }
        }
    }

    #[test]
    fn oversized_paragraph_falls_back_to_sentences() {
        let text = "First sentence here. Second sentence here. Third sentence here.";
        let chunks = chunker(6).split(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "First sentence here. Second sentence here.");
        assert_eq!(chunks[1].text, "Third sentence here.");
    }

    #[test]
    fn sentence_chunks_do_not_merge_with_following_paragraphs() {
        let text = "One two. Three four. Five six. Seven eight.\n\nnine ten";
        let chunks = chunker(4).split(text);
        // The oversized paragraph closes at sentence granularity; the next
        // paragraph starts a fresh chunk.
        assert_eq!(
            chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
            vec!["One two. Three four.", "Five six. Seven eight.", "nine ten"]
        );
    }

    #[test]
    fn pathological_sentence_is_emitted_oversized_not_truncated() {
        let text = "w1 w2 w3 w4 w5 w6 w7 w8";
        let chunks = chunker(3).split(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert!(chunks[0].token_count > 3);
    }

    #[test]
    fn splitting_is_idempotent_on_minimal_chunks() {
        let text = "alpha beta\n\ngamma delta epsilon\n\nzeta";
        let chunker = chunker(4);
        for chunk in chunker.split(text) {
            let re = chunker.split(&chunk.text);
            assert_eq!(re.len(), 1);
            assert_eq!(re[0].text, chunk.text);
            assert_eq!(re[0].token_count, chunk.token_count);
        }
    }

    #[test]
    fn no_content_is_lost_or_duplicated() {
        let text = "a b c\n\nd e\n\n \n\nf g h i\n\nj";
        let chunks = chunker(4).split(text);
        let reconstructed: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.text.split(PARAGRAPH_SEPARATOR))
            .collect();
        let expected: Vec<&str> = text
            .split(PARAGRAPH_SEPARATOR)
            .filter(|p| !p.trim().is_empty())
            .collect();
        assert_eq!(reconstructed, expected);
    }

    #[test]
    fn pre_segmented_paragraphs_match_joined_text() {
        let paragraphs = vec![
            "alpha beta gamma".to_string(),
            "delta epsilon".to_string(),
            "zeta eta theta iota".to_string(),
        ];
        let chunker = chunker(5);
        let from_paragraphs = chunker.split_paragraphs(&paragraphs);
        let from_text = chunker.split(&paragraphs.join(PARAGRAPH_SEPARATOR));
        assert_eq!(from_paragraphs, from_text);
    }

    #[test]
    fn sentence_terminators_stay_attached() {
        let sentences = split_sentences("Is it? Yes! Done. trailing words");
        assert_eq!(sentences, vec!["Is it?", "Yes!", "Done.", "trailing words"]);
    }

    #[test]
    fn abbreviation_dots_mid_word_do_not_split() {
        let sentences = split_sentences("See section 3.2 for details. Next.");
        assert_eq!(sentences, vec!["See section 3.2 for details.", "Next."]);
    }
}
