use rand::Rng;
use serde::{Deserialize, Serialize};

/// Word pool for lorem text; repeated words keep their natural weight.
pub const LOREM_WORDS: [&str; 69] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "ut",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "ut", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure",
    "dolor", "in", "reprehenderit", "in", "voluptate", "velit", "esse", "cillum", "dolore", "eu",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non",
    "proident", "sunt", "in", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id",
    "est", "laborum",
];

const COMMA_MIN_WORDS: usize = 8;
const COMMA_PROBABILITY: f64 = 0.35;
const COMMA_EDGE: usize = 3;

/// Lorem settings as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoremOptions {
    pub paragraphs: i64,
    pub min_sentences: i64,
    pub max_sentences: i64,
    pub min_words: i64,
    pub max_words: i64,
}

impl Default for LoremOptions {
    fn default() -> Self {
        Self {
            paragraphs: 1,
            min_sentences: 3,
            max_sentences: 7,
            min_words: 5,
            max_words: 12,
        }
    }
}

impl LoremOptions {
    /// Floor every minimum at 1 and raise every maximum to its minimum.
    pub fn bounds(&self) -> LoremBounds {
        let min_sentences = clamp_min(self.min_sentences);
        let min_words = clamp_min(self.min_words);
        LoremBounds {
            paragraphs: clamp_min(self.paragraphs),
            min_sentences,
            max_sentences: clamp_min(self.max_sentences).max(min_sentences),
            min_words,
            max_words: clamp_min(self.max_words).max(min_words),
        }
    }
}

fn clamp_min(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

/// Normalized lorem bounds; every range is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoremBounds {
    pub paragraphs: usize,
    pub min_sentences: usize,
    pub max_sentences: usize,
    pub min_words: usize,
    pub max_words: usize,
}

/// One capitalized sentence ending with a period.
pub fn generate_sentence<R: Rng + ?Sized>(
    rng: &mut R,
    min_words: usize,
    max_words: usize,
) -> String {
    let word_count = rng.random_range(min_words..=max_words);
    let mut words: Vec<String> = (0..word_count)
        .map(|_| LOREM_WORDS[rng.random_range(0..LOREM_WORDS.len())].to_string())
        .collect();

    if word_count >= COMMA_MIN_WORDS && rng.random_bool(COMMA_PROBABILITY) {
        let last = COMMA_EDGE.max(word_count - COMMA_EDGE);
        let pos = rng.random_range(COMMA_EDGE..=last);
        words[pos].push(',');
    }

    let mut sentence = capitalize(&words.join(" "));
    sentence.push('.');
    sentence
}

/// Paragraphs of sentences, separated by a blank line.
pub fn generate_lorem<R: Rng + ?Sized>(rng: &mut R, bounds: &LoremBounds) -> String {
    let mut paragraphs = Vec::new();
    for _ in 0..bounds.paragraphs {
        let sentence_count = rng.random_range(bounds.min_sentences..=bounds.max_sentences);
        let mut sentences = Vec::new();
        for _ in 0..sentence_count {
            sentences.push(generate_sentence(&mut *rng, bounds.min_words, bounds.max_words));
        }
        paragraphs.push(sentences.join(" "));
    }
    paragraphs.join("\n\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
