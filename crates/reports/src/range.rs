use chrono::{DateTime, Datelike, Local, Utc};

use scrapledger_core::{LedgerError, LedgerResult};
use scrapledger_model::Transaction;

/// Report period selector.
///
/// `ThisMonth`/`LastMonth` are bound to calendar-month boundaries in the
/// system's local time; `Custom` is an inclusive `[start, end]` timestamp
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    All,
    ThisMonth,
    LastMonth,
    Custom {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DateRange {
    /// An inverted custom range fails loudly instead of silently returning
    /// all rows.
    pub fn validate(&self) -> LedgerResult<()> {
        if let DateRange::Custom { start, end } = self
            && start > end
        {
            return Err(LedgerError::validation(
                "date_range",
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(())
    }

    /// The subset of `transactions` inside the range at `now`.
    pub fn filter(
        &self,
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.validate()?;
        Ok(transactions
            .iter()
            .filter(|t| self.contains(t.created_at(), now))
            .cloned()
            .collect())
    }

    fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match *self {
            DateRange::All => true,
            DateRange::ThisMonth => local_year_month(at) == local_year_month(now),
            DateRange::LastMonth => local_year_month(at) == previous_month(local_year_month(now)),
            DateRange::Custom { start, end } => start <= at && at <= end,
        }
    }
}

fn local_year_month(at: DateTime<Utc>) -> (i32, u32) {
    let local = at.with_timezone(&Local);
    (local.year(), local.month())
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}
