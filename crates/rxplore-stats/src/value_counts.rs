use std::collections::HashMap;

use serde::Serialize;

/// Frequency table of categorical values.
///
/// Entries are ordered by count (descending). Values with equal counts keep
/// the order in which they were first seen.
///
/// # Examples
///
/// ```
/// use rxplore_stats::value_counts::ValueCounts;
///
/// let counts = ValueCounts::new(["acne", "pain", "acne", "flu", "pain", "acne"]);
/// let top = counts.top(2).collect::<Vec<_>>();
/// assert_eq!(top, [("acne", 3), ("pain", 2)]);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValueCounts {
    entries: Vec<ValueCount>,
}

/// A single value together with the number of times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

impl ValueCounts {
    /// Counts the occurrences of each value.
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = HashMap::<String, usize>::new();
        let mut entries = Vec::<ValueCount>::new();
        for value in values {
            let value = value.as_ref();
            if let Some(&idx) = index.get(value) {
                entries[idx].count += 1;
            } else {
                index.insert(value.to_owned(), entries.len());
                entries.push(ValueCount {
                    value: value.to_owned(),
                    count: 1,
                });
            }
        }
        // stable sort keeps first-seen order among ties
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries, most frequent first.
    #[must_use]
    pub fn entries(&self) -> &[ValueCount] {
        &self.entries
    }

    /// Returns the `n` most frequent values with their counts.
    pub fn top(&self, n: usize) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .take(n)
            .map(|entry| (entry.value.as_str(), entry.count))
    }

    /// Keeps only the `n` most frequent values.
    #[must_use]
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let counts = ValueCounts::new(Vec::<String>::new());
        assert!(counts.is_empty());
        assert_eq!(counts.top(10).count(), 0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let counts = ValueCounts::new(["b", "a", "c", "a", "b"]);
        let values = counts
            .entries()
            .iter()
            .map(|e| e.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(values, ["b", "a", "c"]);
    }

    #[test]
    fn test_truncated() {
        let counts = ValueCounts::new(["x", "y", "x"]).truncated(1);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.top(5).collect::<Vec<_>>(), [("x", 2)]);
    }
}
