use crate::candidates::{classify, is_allowed, CandidateCollector, CandidateRecord, ClassifierOptions};

/// A word as cut out of the page text, before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub word: &'a str,

    /// Byte offset of the character that closed the word
    pub char_index: usize,
}

/// Splits page bodies into words and feeds the accepted ones to a collector
#[derive(Debug, Clone)]
pub struct Tokenizer {
    options: ClassifierOptions,
    look_inside_tags: bool,
}

impl Tokenizer {
    /// Creates a tokenizer
    ///
    /// # Arguments
    ///
    /// * `options` - Options passed on to the rule chain
    /// * `look_inside_tags` - Also collect words between `<` and `>`
    pub fn new(options: ClassifierOptions, look_inside_tags: bool) -> Self {
        Self {
            options,
            look_inside_tags,
        }
    }

    /// Cuts `body` into runs of allowed characters
    ///
    /// A word ends at the first character outside the allowed alphabet, at
    /// a tag boundary, or at the end of the body. Text between `<` and `>`
    /// is skipped unless the tokenizer looks inside tags.
    ///
    /// # Example
    ///
    /// ```
    /// use getver::candidates::Tokenizer;
    /// use getver::ClassifierOptions;
    ///
    /// let tokenizer = Tokenizer::new(ClassifierOptions::default(), false);
    /// let words: Vec<&str> = tokenizer
    ///     .scan("<b class=x>v1.2</b> ok")
    ///     .iter()
    ///     .map(|t| t.word)
    ///     .collect();
    /// assert_eq!(words, vec!["v1.2", "ok"]);
    /// ```
    pub fn scan<'a>(&self, body: &'a str) -> Vec<RawToken<'a>> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;
        let mut in_tag = false;

        let mut close = |start: &mut Option<usize>, end: usize| {
            if let Some(begin) = start.take() {
                tokens.push(RawToken {
                    word: &body[begin..end],
                    char_index: end,
                });
            }
        };

        for (i, c) in body.char_indices() {
            if !in_tag && c == '<' {
                close(&mut start, i);
                in_tag = true;
            } else if in_tag && c == '>' {
                close(&mut start, i);
                in_tag = false;
            } else if in_tag && !self.look_inside_tags {
                continue;
            } else if is_allowed(c) {
                start.get_or_insert(i);
            } else {
                close(&mut start, i);
            }
        }
        close(&mut start, body.len());

        tokens
    }

    /// Classifies every word of `body` and stores the accepted ones
    ///
    /// Word indices restart at 0 for every page and count accepted words
    /// only. Harvesting stops early once the collector is full; a word the
    /// collector already holds still merges and does not stop the page.
    ///
    /// # Returns
    ///
    /// The number of accepted words
    pub fn harvest(&self, body: &str, depth: u32, collector: &CandidateCollector) -> usize {
        let mut word_index = 0;

        for token in self.scan(body) {
            let Some(word) = classify(token.word, &self.options) else {
                continue;
            };

            let record = CandidateRecord {
                depth,
                word_index,
                char_index: token.char_index,
            };
            word_index += 1;

            if !collector.insert(word, record) {
                tracing::debug!("Candidate limit reached, skipping the rest of the page");
                break;
            }
        }

        word_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokenizer: &Tokenizer, body: &str) -> Vec<String> {
        tokenizer
            .scan(body)
            .into_iter()
            .map(|t| t.word.to_string())
            .collect()
    }

    fn default_tokenizer() -> Tokenizer {
        Tokenizer::new(ClassifierOptions::default(), false)
    }

    #[test]
    fn test_scan_plain_text() {
        let tokens = default_tokenizer().scan("Version 3.2.1 released");
        assert_eq!(
            tokens,
            vec![
                RawToken { word: "Version", char_index: 7 },
                RawToken { word: "3.2.1", char_index: 13 },
                RawToken { word: "released", char_index: 22 },
            ]
        );
    }

    #[test]
    fn test_scan_skips_tags() {
        let body = r#"<a href="/v/9.9.9">Get 1.2</a>"#;
        assert_eq!(words(&default_tokenizer(), body), vec!["Get", "1.2"]);
    }

    #[test]
    fn test_tag_boundary_closes_word() {
        assert_eq!(
            words(&default_tokenizer(), "1.0<br>2.0"),
            vec!["1.0", "2.0"]
        );
    }

    #[test]
    fn test_scan_inside_tags() {
        let tokenizer = Tokenizer::new(ClassifierOptions::default(), true);
        assert_eq!(
            words(&tokenizer, r#"<img alt=v9.9>x"#),
            vec!["img", "alt", "v9.9", "x"]
        );
    }

    #[test]
    fn test_scan_handles_multibyte_text() {
        let tokens = default_tokenizer().scan("é1.0é");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "1.0");
        assert_eq!(tokens[0].char_index, 5);
    }

    #[test]
    fn test_harvest_records_positions() {
        let collector = CandidateCollector::new(100);
        let accepted = default_tokenizer().harvest("Version 3.2.1 and 1.0 released", 2, &collector);

        assert_eq!(accepted, 2);
        let words = collector.drain();
        assert_eq!(
            words.get("3.2.1"),
            Some(&CandidateRecord {
                depth: 2,
                word_index: 0,
                char_index: 13
            })
        );
        assert_eq!(words.get("1.0").map(|r| r.word_index), Some(1));
    }

    #[test]
    fn test_harvest_stops_when_full() {
        let collector = CandidateCollector::new(2);
        default_tokenizer().harvest("1.1 1.2 1.3 1.4", 1, &collector);
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_harvest_merges_known_words_when_full() {
        let collector = CandidateCollector::new(2);
        let shallow = CandidateRecord {
            depth: 3,
            word_index: 0,
            char_index: 0,
        };
        collector.insert("1.0".to_string(), shallow);
        collector.insert("2.0".to_string(), shallow);

        let accepted = default_tokenizer().harvest("1.0 2.0 3.0", 1, &collector);

        assert_eq!(accepted, 3);
        let words = collector.drain();
        assert_eq!(words.len(), 2);
        assert_eq!(words["1.0"].depth, 1);
        assert_eq!(words["2.0"].depth, 1);
    }
}
