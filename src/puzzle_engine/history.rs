use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub trial: u32,
    pub correct: bool,
    pub summary: String,
}

/// Rolling window of the most recent resolved trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl TrialHistory {
    pub fn new(capacity: usize) -> Self {
        TrialHistory { capacity: capacity.max(1), entries: VecDeque::new() }
    }

    pub fn push(&mut self, trial: u32, correct: bool, summary: impl Into<String>) {
        self.entries.push_back(HistoryEntry { trial, correct, summary: summary.into() });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest() {
        let mut h = TrialHistory::new(4);
        for n in 1..=6 {
            h.push(n, n % 2 == 0, format!("trial {n}"));
        }
        let kept: Vec<u32> = h.entries().map(|e| e.trial).collect();
        assert_eq!(kept, vec![3, 4, 5, 6]);
        assert_eq!(h.entries().next_back().map(|e| e.correct), Some(true));
        h.clear();
        assert!(h.is_empty());
    }
}
