//! The candidate rule chain
//!
//! Every raw word from the tokenizer runs through [`RULES`] in order. A rule
//! either keeps the word (possibly rewritten) for the next rule or rejects
//! it. A word that survives the whole table is a version candidate.

use crate::candidates::{is_special, ClassifierOptions, DENYLIST};

/// Longest word that can still be a version number ("100.23.3123-beta")
const MAX_WORD_LEN: usize = 16;

/// Outcome of applying one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Pass the (possibly rewritten) word on to the next rule
    Keep(String),
    /// Not a version number
    Reject,
}

/// What a rule sees besides the current word
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The word as the tokenizer produced it, before any rewriting
    pub raw: &'a str,
    pub options: &'a ClassifierOptions,
}

/// A named step of the rule chain
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(String, &RuleContext<'_>) -> Verdict,
}

impl Rule {
    /// Runs this rule on its own, without the rest of the chain
    pub fn check(&self, word: &str, options: &ClassifierOptions) -> Verdict {
        let context = RuleContext { raw: word, options };
        (self.apply)(word.to_string(), &context)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The rule chain, in the order it is applied
pub static RULES: [Rule; 22] = [
    Rule { name: "empty", apply: empty },
    Rule { name: "too-short", apply: too_short },
    Rule { name: "too-long", apply: too_long },
    Rule { name: "several-capitals", apply: several_capitals },
    Rule { name: "capital-without-dot", apply: capital_without_dot },
    Rule { name: "strip-trailing-dot", apply: strip_trailing_dot },
    Rule { name: "trim", apply: trim },
    Rule { name: "no-digit", apply: no_digit },
    Rule { name: "too-many-dots", apply: too_many_dots },
    Rule { name: "dots-without-other-separator", apply: dots_without_other_separator },
    Rule { name: "doubled-separator", apply: doubled_separator },
    Rule { name: "filename-extension", apply: filename_extension },
    Rule { name: "leading-separator", apply: leading_separator },
    Rule { name: "two-dash-date", apply: two_dash_date },
    Rule { name: "one-dash-date", apply: one_dash_date },
    Rule { name: "strip-letters", apply: strip_letters },
    Rule { name: "letters-before-dot", apply: letters_before_dot },
    Rule { name: "long-digit-run", apply: long_digit_run },
    Rule { name: "leading-zero", apply: leading_zero },
    Rule { name: "single-prefix-before-digit", apply: single_prefix_before_digit },
    Rule { name: "all-zeros", apply: all_zeros },
    Rule { name: "denylisted", apply: denylisted },
];

/// Runs `raw` through the whole rule chain
///
/// # Returns
///
/// * `Some(word)` - The accepted, possibly rewritten, word
/// * `None` - Some rule rejected it
///
/// # Examples
///
/// ```
/// use getver::candidates::classify;
/// use getver::ClassifierOptions;
///
/// let options = ClassifierOptions::default();
/// assert_eq!(classify("2.0.1", &options), Some("2.0.1".to_string()));
/// assert_eq!(classify("2016-01-29", &options), None);
/// ```
pub fn classify(raw: &str, options: &ClassifierOptions) -> Option<String> {
    let context = RuleContext { raw, options };
    let mut word = raw.to_string();

    for rule in RULES.iter() {
        match (rule.apply)(word, &context) {
            Verdict::Keep(next) => word = next,
            Verdict::Reject => {
                tracing::trace!("Rejected {:?} ({})", raw, rule.name);
                return None;
            }
        }
    }

    Some(word)
}

fn reject_if(word: String, condition: bool) -> Verdict {
    if condition {
        Verdict::Reject
    } else {
        Verdict::Keep(word)
    }
}

fn uppercase_count(word: &str) -> usize {
    word.chars().filter(char::is_ascii_uppercase).count()
}

fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn empty(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.is_empty();
    reject_if(word, condition)
}

fn too_short(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.len() < 2;
    reject_if(word, condition)
}

fn too_long(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.len() > MAX_WORD_LEN;
    reject_if(word, condition)
}

fn several_capitals(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = uppercase_count(&word) > 1;
    reject_if(word, condition)
}

fn capital_without_dot(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = uppercase_count(&word) == 1 && !word.contains('.');
    reject_if(word, condition)
}

fn strip_trailing_dot(word: String, _: &RuleContext<'_>) -> Verdict {
    match word.strip_suffix('.') {
        Some(stripped) => Verdict::Keep(stripped.to_string()),
        None => Verdict::Keep(word),
    }
}

fn trim(word: String, _: &RuleContext<'_>) -> Verdict {
    Verdict::Keep(word.trim().to_string())
}

fn no_digit(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = !word.chars().any(|c| c.is_ascii_digit());
    reject_if(word, condition)
}

fn too_many_dots(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.matches('.').count() > 4;
    reject_if(word, condition)
}

fn dots_without_other_separator(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition =
        word.matches('.').count() > 3 && !word.contains(|c| matches!(c, '-' | '+' | '_'));
    reject_if(word, condition)
}

fn doubled_separator(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0] == pair[1] && is_special(pair[0] as char));
    reject_if(word, condition)
}

fn filename_extension(word: String, _: &RuleContext<'_>) -> Verdict {
    let bytes = word.as_bytes();
    let len = bytes.len();
    let condition = len >= 4
        && !bytes[len - 1].is_ascii_digit()
        && (bytes[len - 4] == b'.' || bytes[len - 3] == b'.');
    reject_if(word, condition)
}

fn leading_separator(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.starts_with(is_special);
    reject_if(word, condition)
}

fn two_dash_date(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.matches('-').count() == 2
        && word.chars().all(|c| c.is_ascii_digit() || c == '-');
    reject_if(word, condition)
}

fn one_dash_date(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.matches('-').count() == 1
        && word.split_once('-').map_or(false, |(left, right)| {
            left.len() <= 2 && right.len() <= 2 && all_digits(left) && all_digits(right)
        });
    reject_if(word, condition)
}

fn strip_letters(word: String, context: &RuleContext<'_>) -> Verdict {
    if context.options.keep_letters || word.contains("alpha") || word.contains("beta") {
        return Verdict::Keep(word);
    }

    let stripped: String = word
        .chars()
        .filter(|c| c.is_ascii_digit() || is_special(*c))
        .collect();

    match stripped.strip_prefix('.') {
        Some(rest) => Verdict::Keep(rest.to_string()),
        None => Verdict::Keep(stripped),
    }
}

fn letters_before_dot(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word
        .split_once('.')
        .map_or(false, |(head, _)| head.chars().all(|c| c.is_ascii_alphabetic()));
    reject_if(word, condition)
}

fn long_digit_run(word: String, _: &RuleContext<'_>) -> Verdict {
    let longest = word
        .split(|c: char| !c.is_ascii_digit())
        .map(str::len)
        .max()
        .unwrap_or(0);
    reject_if(word, longest > 3)
}

fn leading_zero(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = !word.contains(is_special) && word.starts_with('0');
    reject_if(word, condition)
}

fn single_prefix_before_digit(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = match word.find(|c: char| c.is_ascii_digit()) {
        Some(1) => !word.as_bytes()[0].is_ascii_alphabetic(),
        _ => false,
    };
    reject_if(word, condition)
}

fn all_zeros(word: String, _: &RuleContext<'_>) -> Verdict {
    let condition = word.chars().all(|c| c == '0');
    reject_if(word, condition)
}

fn denylisted(word: String, context: &RuleContext<'_>) -> Verdict {
    let condition = DENYLIST
        .iter()
        .any(|tag| word.contains(tag) || context.raw.contains(tag));
    reject_if(word, condition)
}
