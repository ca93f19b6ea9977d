//! Naira amounts in minor currency units.
//!
//! Paystack expresses every amount in kobo (1/100 of a naira). Amounts are
//! carried as integers end to end; conversion to naira only happens for
//! display and logging.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kobo per naira.
pub const KOBO_PER_NAIRA: u64 = 100;

/// An amount of money in kobo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kobo(u64);

impl Kobo {
    /// Zero kobo.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw kobo amount.
    pub fn new(kobo: u64) -> Self {
        Self(kobo)
    }

    /// Converts a whole-naira amount, returning `None` on overflow.
    pub fn from_naira(naira: u64) -> Option<Self> {
        naira_to_kobo(naira).map(Self)
    }

    /// Returns the raw kobo value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the amount in naira.
    pub fn as_naira(&self) -> f64 {
        kobo_to_naira(self.0)
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Kobo {
    /// Formats as `₦1,234.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / KOBO_PER_NAIRA;
        let fraction = self.0 % KOBO_PER_NAIRA;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "₦{}.{:02}", grouped, fraction)
    }
}

/// Converts whole naira to kobo. Returns `None` if the result overflows.
pub fn naira_to_kobo(naira: u64) -> Option<u64> {
    naira.checked_mul(KOBO_PER_NAIRA)
}

/// Converts kobo to naira.
///
/// Exact for every kobo value below 2^53.
pub fn kobo_to_naira(kobo: u64) -> f64 {
    kobo as f64 / KOBO_PER_NAIRA as f64
}
