//! Candidate harvesting: from page text to a ranked list of version numbers
//!
//! - `tokenizer`: splits page text (outside tags) into raw words
//! - `rules`: the ordered chain of accept/reject/transform rules
//! - `collector`: the shared word map filled while the crawl runs
//! - `ranker`: orders the collected words once the crawl is done

mod collector;
mod ranker;
pub mod rules;
mod tokenizer;

pub use collector::CandidateCollector;
pub use ranker::{dot_count, rank};
pub use rules::{classify, Rule, Verdict, RULES};
pub use tokenizer::{RawToken, Tokenizer};

use crate::config::CandidateConfig;

/// Separators allowed inside a version number
pub const SPECIAL: &[char] = &['.', '-', '+', '_'];

/// Substrings that mark a word as an architecture or checksum tag
pub const DENYLIST: &[&str] = &["i686", "x86", "x64", "64bit", "32bit", "md5", "sha1"];

/// Returns true for characters that may be part of a candidate word
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_special(c)
}

/// Returns true for the version separators `.`, `-`, `+` and `_`
pub fn is_special(c: char) -> bool {
    SPECIAL.contains(&c)
}

/// Where and how early a candidate word was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Crawl depth left when the page was examined (the root has the most)
    pub depth: u32,

    /// Position among the accepted words of its page, starting at 0
    pub word_index: usize,

    /// Byte offset in the page body where the word ended
    pub char_index: usize,
}

/// Options that change how the rule chain treats a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierOptions {
    /// Keep letters instead of stripping them from accepted words
    pub keep_letters: bool,
}

impl From<&CandidateConfig> for ClassifierOptions {
    fn from(config: &CandidateConfig) -> Self {
        Self {
            keep_letters: config.keep_letters,
        }
    }
}
