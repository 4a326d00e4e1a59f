use crate::candidates::CandidateRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Word map shared by every page examined during one crawl
///
/// When a word shows up again, the occurrence with the smaller depth is
/// kept; on a tie the first stored record stays. The map never grows beyond
/// its word limit.
#[derive(Debug)]
pub struct CandidateCollector {
    max_words: usize,
    words: Mutex<HashMap<String, CandidateRecord>>,
}

impl CandidateCollector {
    /// Creates an empty collector holding at most `max_words` distinct words
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words,
            words: Mutex::new(HashMap::new()),
        }
    }

    /// Merges one occurrence of `word` into the map
    ///
    /// # Returns
    ///
    /// * `true` - More words can be collected, or `word` was already known
    /// * `false` - The map is full; new words are ignored from now on
    pub fn insert(&self, word: String, record: CandidateRecord) -> bool {
        let mut words = self.words.lock().unwrap_or_else(PoisonError::into_inner);
        let len = words.len();

        match words.entry(word) {
            Entry::Occupied(mut existing) => {
                if record.depth < existing.get().depth {
                    existing.insert(record);
                }
                true
            }
            Entry::Vacant(slot) if len < self.max_words => {
                slot.insert(record);
                len + 1 < self.max_words
            }
            Entry::Vacant(_) => false,
        }
    }

    /// Returns the number of distinct words collected
    pub fn len(&self) -> usize {
        self.words
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes every collected word out of the map
    pub fn drain(&self) -> HashMap<String, CandidateRecord> {
        std::mem::take(&mut *self.words.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
