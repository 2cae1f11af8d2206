//! Year-month buckets of ledger entries and the primitive mutations on them.

use std::collections::BTreeMap;

use crate::domain::{LedgerEntry, YearMonth};

/// Result of a write against the bucket map.
///
/// Writes never fail; a write that cannot land is skipped and reported here.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// The target month was never fetched, so there is no bucket to write to.
    BucketNotFetched,
    /// The bucket exists but holds no entry with the requested id.
    EntryNotFound,
    /// A cross-month update took the entry out of its old bucket, but the new
    /// month was never fetched, so the entry is no longer held anywhere.
    RemovedOnly,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }
}

/// Ledger entries grouped by the month of their date, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    buckets: BTreeMap<YearMonth, Vec<LedgerEntry>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces (or creates) the bucket for `year_month`.
    pub fn set_bucket(&mut self, year_month: YearMonth, entries: Vec<LedgerEntry>) {
        self.buckets.insert(year_month, entries);
    }

    /// Appends `entry` to the bucket of its own month, if that bucket exists.
    pub fn append(&mut self, entry: LedgerEntry) -> Mutation {
        let list = match entry.year_month() {
            Some(year_month) => self.buckets.get_mut(&year_month),
            None => None,
        };
        let Some(list) = list else {
            tracing::debug!(id = %entry.id, date = %entry.date, "append skipped: month not fetched");
            return Mutation::BucketNotFetched;
        };
        list.push(entry);
        Mutation::Applied
    }

    /// Replaces the first entry in `year_month` whose id matches `entry.id`.
    pub fn replace(&mut self, year_month: &str, entry: LedgerEntry) -> Mutation {
        let Some(list) = self.buckets.get_mut(year_month) else {
            return Mutation::BucketNotFetched;
        };
        match list.iter().position(|existing| existing.id == entry.id) {
            Some(index) => {
                list[index] = entry;
                Mutation::Applied
            }
            None => {
                tracing::debug!(id = %entry.id, year_month, "replace skipped: id not in bucket");
                Mutation::EntryNotFound
            }
        }
    }

    /// Removes the first entry in `year_month` with the given id.
    pub fn remove(&mut self, year_month: &str, id: &str) -> Mutation {
        let Some(list) = self.buckets.get_mut(year_month) else {
            return Mutation::BucketNotFetched;
        };
        match list.iter().position(|existing| existing.id == id) {
            Some(index) => {
                list.remove(index);
                Mutation::Applied
            }
            None => Mutation::EntryNotFound,
        }
    }

    pub fn bucket(&self, year_month: &str) -> Option<&[LedgerEntry]> {
        self.buckets.get(year_month).map(Vec::as_slice)
    }

    pub fn entry(&self, year_month: &str, id: &str) -> Option<&LedgerEntry> {
        self.bucket(year_month)?
            .iter()
            .find(|entry| entry.id == id)
    }

    /// Fetched months in chronological order.
    pub fn year_months(&self) -> impl Iterator<Item = &YearMonth> + '_ {
        self.buckets.keys()
    }

    pub fn is_fetched(&self, year_month: &str) -> bool {
        self.buckets.contains_key(year_month)
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(raw: &str) -> YearMonth {
        raw.parse().unwrap()
    }

    fn entry(id: &str, date: &str) -> LedgerEntry {
        LedgerEntry::new(date, "Lunch", "食費")
            .with_id(id)
            .with_outgo(800.0)
    }

    #[test]
    fn append_requires_fetched_bucket() {
        let mut store = LedgerStore::new();
        assert_eq!(
            store.append(entry("x1", "2024-05-10")),
            Mutation::BucketNotFetched
        );
        assert!(store.bucket("2024-05").is_none());

        store.set_bucket(month("2024-05"), Vec::new());
        assert!(store.append(entry("x1", "2024-05-10")).is_applied());
        assert_eq!(store.bucket("2024-05").unwrap().len(), 1);
    }

    #[test]
    fn replace_with_unknown_id_leaves_bucket_untouched() {
        let mut store = LedgerStore::new();
        store.set_bucket(
            month("2024-05"),
            vec![entry("a", "2024-05-01"), entry("b", "2024-05-02")],
        );

        let outcome = store.replace("2024-05", entry("zzz", "2024-05-03"));
        assert_eq!(outcome, Mutation::EntryNotFound);
        let ids: Vec<_> = store
            .bucket("2024-05")
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn remove_with_unknown_id_keeps_last_entry() {
        let mut store = LedgerStore::new();
        store.set_bucket(
            month("2024-05"),
            vec![entry("a", "2024-05-01"), entry("b", "2024-05-02")],
        );

        assert_eq!(store.remove("2024-05", "missing"), Mutation::EntryNotFound);
        assert_eq!(store.bucket("2024-05").unwrap().len(), 2);
        assert_eq!(store.remove("2024-06", "a"), Mutation::BucketNotFetched);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut store = LedgerStore::new();
        let mut duplicate = entry("dup", "2024-05-02");
        duplicate.title = "second".into();
        store.set_bucket(month("2024-05"), vec![entry("dup", "2024-05-01"), duplicate]);

        assert!(store.remove("2024-05", "dup").is_applied());
        let remaining = store.bucket("2024-05").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "second");
    }

    #[test]
    fn year_months_are_chronological() {
        let mut store = LedgerStore::new();
        store.set_bucket(month("2024-06"), Vec::new());
        store.set_bucket(month("2023-12"), Vec::new());
        store.set_bucket(month("2024-01"), vec![entry("a", "2024-01-05")]);

        let months: Vec<_> = store.year_months().map(YearMonth::as_str).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-06"]);
        assert_eq!(store.entry_count(), 1);
        assert!(store.entry("2024-01", "a").is_some());
    }
}
