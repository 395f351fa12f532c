//! Insertion-ordered occurrence counter.
//!
//! Buckets keep the order in which their label was first seen, so chart
//! series come out in a stable order and ties for the maximum resolve to the
//! earliest label.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Tally {
    index: HashMap<String, usize>,
    buckets: Vec<(String, u64)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a bucket exists, without counting anything.
    pub fn seed(&mut self, label: &str) {
        self.slot(label);
    }

    pub fn increment(&mut self, label: &str) {
        let slot = self.slot(label);
        self.buckets[slot].1 += 1;
    }

    /// Label with the highest count; the first-seen label wins a tie.
    pub fn most_common(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for bucket in &self.buckets {
            if best.map_or(true, |b| bucket.1 > b.1) {
                best = Some(bucket);
            }
        }
        best.map(|(label, _)| label.as_str())
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn into_entries(self) -> Vec<(String, u64)> {
        self.buckets
    }

    fn slot(&mut self, label: &str) -> usize {
        if let Some(&slot) = self.index.get(label) {
            return slot;
        }
        let slot = self.buckets.len();
        self.buckets.push((label.to_string(), 0));
        self.index.insert(label.to_string(), slot);
        slot
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Self::new();
        for label in iter {
            tally.increment(label);
        }
        tally
    }
}
