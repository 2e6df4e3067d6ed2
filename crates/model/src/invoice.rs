use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use scrapledger_core::{LedgerError, LedgerResult};

/// Human-readable identifier grouping a customer's transactions recorded in
/// one session.
///
/// Standard format `AAA-YYYYMMDD-NNN`: three customer initials, the issue
/// date, and a 1-based sequence scoped to (customer, day). When the store
/// cannot be reached the sequencer issues a degraded `INV-NNNNNNNN` number
/// instead (millisecond tail), which still satisfies uniqueness for
/// practical purposes but carries no customer/day structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Compose a standard invoice number from pre-derived initials.
    ///
    /// `initials` must already be exactly 3 uppercase ASCII letters (see
    /// [`initials`]); the sequence is rendered 3 digits, zero-padded.
    pub fn compose(initials: &str, date: NaiveDate, seq: u32) -> Self {
        Self(format!("{initials}-{}-{seq:03}", date.format("%Y%m%d")))
    }

    /// Degraded fallback number: `INV-` + last 8 digits of unix millis.
    pub fn degraded(at: DateTime<Utc>) -> Self {
        let tail = at.timestamp_millis().rem_euclid(100_000_000);
        Self(format!("INV-{tail:08}"))
    }

    /// Parse a wire-format invoice number, accepting both the standard and
    /// the degraded shape.
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        if is_standard(raw) || is_degraded(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(LedgerError::validation(
                "invoice_number",
                format!("'{raw}' matches neither AAA-YYYYMMDD-NNN nor INV-NNNNNNNN"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_degraded(&self) -> bool {
        is_degraded(&self.0)
    }

    /// The `AAA-YYYYMMDD-` prefix shared by all of a customer's numbers for
    /// one day; `None` for degraded numbers.
    pub fn day_prefix(&self) -> Option<&str> {
        is_standard(&self.0).then(|| &self.0[..13])
    }

    /// The trailing sequence; `None` for degraded numbers.
    pub fn sequence(&self) -> Option<u32> {
        is_standard(&self.0)
            .then(|| self.0[13..].parse().ok())
            .flatten()
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive invoice initials from a customer name: first ASCII letter of each
/// whitespace-separated word, uppercased, truncated to 3 and right-padded
/// with `X` to exactly 3 characters.
pub fn initials(name: &str) -> String {
    let mut out: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .take(3)
        .collect();
    while out.len() < 3 {
        out.push('X');
    }
    out
}

// `^[A-Z]{3}-\d{8}-\d{3}$`
fn is_standard(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 16
        && b[..3].iter().all(u8::is_ascii_uppercase)
        && b[3] == b'-'
        && b[4..12].iter().all(u8::is_ascii_digit)
        && b[12] == b'-'
        && b[13..].iter().all(u8::is_ascii_digit)
}

// `^INV-\d{8}$`
fn is_degraded(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 12 && b.starts_with(b"INV-") && b[4..].iter().all(u8::is_ascii_digit)
}
