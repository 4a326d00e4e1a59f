use crate::candidates::CandidateRecord;
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

/// Number of `.` in a word
pub fn dot_count(word: &str) -> usize {
    word.matches('.').count()
}

/// Orders the collected words, most likely version first
///
/// Words are sorted by, in order of priority:
/// 1. more dots first
/// 2. lower word index first (earlier on its page)
/// 3. higher depth first (closer to the crawl root)
/// 4. lower char index first
///
/// Remaining ties are broken by the word itself, so the result depends
/// only on the map contents. At most `max_results` words are returned.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use getver::candidates::rank;
/// use getver::CandidateRecord;
///
/// let record = CandidateRecord { depth: 1, word_index: 0, char_index: 0 };
/// let words = HashMap::from([("1.0".to_string(), record), ("2.0.0".to_string(), record)]);
/// assert_eq!(rank(&words, 2), vec!["2.0.0", "1.0"]);
/// ```
pub fn rank(candidates: &HashMap<String, CandidateRecord>, max_results: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &CandidateRecord)> = candidates.iter().collect();
    entries.sort_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(max_results)
        .map(|(word, _)| word.clone())
        .collect()
}

fn rank_key(word: &str, record: &CandidateRecord) -> (Reverse<usize>, usize, Reverse<u32>, usize) {
    (
        Reverse(dot_count(word)),
        record.word_index,
        Reverse(record.depth),
        record.char_index,
    )
}

fn compare(a: &(&String, &CandidateRecord), b: &(&String, &CandidateRecord)) -> Ordering {
    rank_key(a.0, a.1)
        .cmp(&rank_key(b.0, b.1))
        .then_with(|| a.0.cmp(b.0))
}
