//! Per-kind tally of inserted records

use std::collections::BTreeMap;
use std::fmt;

/// Number of records inserted per entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    counts: BTreeMap<String, u64>,
}

impl SeedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more record of `kind`
    pub fn tally(&mut self, kind: &str) {
        *self.counts.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Records inserted of one kind
    pub fn count(&self, kind: &str) -> u64 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Records inserted across every kind
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Histogram `"<n> <Kind>, <n> <Kind>"`, kinds sorted case-insensitively
impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return f.write_str("nothing");
        }

        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by_key(|(kind, _)| kind.to_lowercase());

        let parts: Vec<String> = entries
            .into_iter()
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
