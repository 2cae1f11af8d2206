use crate::{
    core::errors::Result,
    domain::{LedgerEntry, YearMonth},
};

/// Supplies the entries of one month when it is fetched.
pub trait EntrySource {
    fn fetch_month(&self, year_month: &YearMonth) -> Result<Vec<LedgerEntry>>;
}

/// Source with no backing data; every month fetches as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl EntrySource for EmptySource {
    fn fetch_month(&self, _year_month: &YearMonth) -> Result<Vec<LedgerEntry>> {
        Ok(Vec::new())
    }
}

/// Returns one sample outgo on the 1st and one sample income on the 2nd of
/// every fetched month. Useful for demos and UI work without a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl EntrySource for SampleSource {
    fn fetch_month(&self, year_month: &YearMonth) -> Result<Vec<LedgerEntry>> {
        Ok(vec![
            LedgerEntry::new(year_month.day(1), "支出サンプル", "買い物")
                .with_id("a34109ed")
                .with_tags("固定費")
                .with_outgo(2000.0)
                .with_memo("メモ"),
            LedgerEntry::new(year_month.day(2), "収入サンプル", "給料")
                .with_id("7c8fa764")
                .with_tags("固定費,カード")
                .with_income(2000.0)
                .with_memo("メモ"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_entries_fall_inside_the_fetched_month() {
        let ym: YearMonth = "2024-02".parse().unwrap();
        let entries = SampleSource.fetch_month(&ym).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|entry| entry.year_month().as_ref() == Some(&ym)));
        assert_eq!(entries[0].amount(), -2000.0);
        assert_eq!(entries[1].amount(), 2000.0);
    }
}
