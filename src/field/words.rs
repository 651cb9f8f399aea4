//! The word bank new bubbles draw from.

use rand::{Rng, seq::IndexedRandom};

/// Every word a random bubble can hold. Duplicates are intentional: `&` and
/// `a` glue poems together, so they show up three times as often.
pub const WORDS: [&str; 44] = [
    "relax", "&", "&", "&", "enjoy", "life", "as", "is", "like", "love", "the", "best", "good",
    "happy", "dream", "listen", "to", "you", "are", "special", "this", "be", "one", "world",
    "bliss", "reach", "a", "a", "a", "an", "have", "in", "heaven", "splendid", "place", "will",
    "all", "people", "friend", "family", "heart", "soul", "peace", "calm",
];

/// Pick a word uniformly from [`WORDS`].
pub fn random_word(rng: &mut impl Rng) -> &'static str {
    // `WORDS` is a non-empty array, so `choose` always returns a word.
    WORDS.choose(rng).copied().unwrap_or(WORDS[0])
}

/// The text a new bubble will hold: the requested text verbatim, or a random
/// word when none was asked for. An explicit text never touches `rng`.
pub fn bubble_text(requested: Option<&str>, rng: &mut impl Rng) -> String {
    match requested {
        Some(text) => text.to_string(),
        None => random_word(rng).to_string(),
    }
}
