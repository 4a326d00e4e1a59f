//! Output module: turning the ranked words into what the user sees
//!
//! This module handles:
//! - The optional descending sort of the ranked words
//! - Picking a single 1-based result
//! - Plain and numbered listings
//! - The exit code for each outcome

use crate::GetverError;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when nothing was found, or a requested result does not exist
pub const EXIT_NO_RESULTS: i32 = 1;

/// Exit code when nothing was found in numbered mode
pub const EXIT_NO_RESULTS_NUMBERED: i32 = 2;

/// How the results should be printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One word per line
    All,
    /// One `N: word` line per result
    Numbered,
    /// Only the result with this 1-based number
    Single(usize),
}

impl Selection {
    /// Picks the selection from the `-u` and `--number` flags
    pub fn from_flags(single: Option<usize>, numbered: bool) -> Self {
        match (single, numbered) {
            (Some(n), _) => Self::Single(n),
            (None, true) => Self::Numbered,
            (None, false) => Self::All,
        }
    }

    /// Number of ranked results needed to serve this selection
    ///
    /// A single pick retrieves one more than its number so that sorting
    /// has something to compare against.
    pub fn results_to_retrieve(&self, max_results: usize) -> usize {
        match self {
            Self::Single(n) => n.saturating_add(1),
            _ => max_results,
        }
    }
}

/// What a finished run prints, and how it exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text for stdout, one line per result
    Found(String),
    /// Nothing to print
    NoResults { numbered: bool },
}

impl Outcome {
    /// Returns the process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Found(_) => EXIT_SUCCESS,
            Self::NoResults { numbered: false } => EXIT_NO_RESULTS,
            Self::NoResults { numbered: true } => EXIT_NO_RESULTS_NUMBERED,
        }
    }
}

/// Applies the optional descending sort to the ranked words
pub fn postprocess(mut words: Vec<String>, sort: bool) -> Vec<String> {
    if sort {
        words.sort_by(|a, b| b.cmp(a));
    }
    words
}

/// Renders the words for the chosen selection
///
/// # Returns
///
/// * `Ok(Outcome)` - Text to print, or an empty result
/// * `Err(GetverError::NotEnoughResults)` - The selected result does not exist
///
/// # Example
///
/// ```
/// use getver::output::{render, Outcome, Selection};
///
/// let words = vec!["1.2.3".to_string(), "1.2".to_string()];
/// let outcome = render(&words, Selection::Numbered).unwrap();
/// assert_eq!(outcome, Outcome::Found("1: 1.2.3\n2: 1.2\n".to_string()));
/// ```
pub fn render(words: &[String], selection: Selection) -> Result<Outcome, GetverError> {
    match selection {
        Selection::Single(n) => match n.checked_sub(1).and_then(|i| words.get(i)) {
            Some(word) => Ok(Outcome::Found(format!("{}\n", word))),
            None => Err(GetverError::NotEnoughResults {
                requested: n,
                available: words.len(),
            }),
        },
        _ if words.is_empty() => Ok(Outcome::NoResults {
            numbered: selection == Selection::Numbered,
        }),
        Selection::Numbered => Ok(Outcome::Found(
            words
                .iter()
                .enumerate()
                .map(|(i, word)| format!("{}: {}\n", i + 1, word))
                .collect(),
        )),
        Selection::All => Ok(Outcome::Found(
            words.iter().map(|word| format!("{}\n", word)).collect(),
        )),
    }
}
