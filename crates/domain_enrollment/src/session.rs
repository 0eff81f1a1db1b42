//! Training session entity

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Money, SessionId};
use serde::{Deserialize, Serialize};

use crate::error::EnrollmentError;

/// A scheduled training session that students can enroll in
///
/// The `price` is the default amount charged per enrollment; individual
/// enrollments may override it at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Unique short code, e.g. "RUST-2025-01"
    pub code: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session, validating date order and price sign
    ///
    /// # Arguments
    /// * `code` - Unique session code
    /// * `title` - Human-readable title
    /// * `start_date` - First day of the session
    /// * `end_date` - Last day, inclusive; must not precede `start_date`
    /// * `price` - Default enrollment price, must not be negative
    ///
    /// # Returns
    /// The session, or an error when the dates are out of order or the
    /// price is negative.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price: Money,
    ) -> Result<Self, EnrollmentError> {
        if end_date < start_date {
            return Err(EnrollmentError::SessionDatesOutOfOrder {
                start: start_date,
                end: end_date,
            });
        }
        if price.is_negative() {
            return Err(EnrollmentError::NegativeAmount(price.amount()));
        }

        let now = Utc::now();
        Ok(Self {
            id: SessionId::new_v7(),
            code: code.into(),
            title: title.into(),
            start_date,
            end_date,
            price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Number of calendar days the session spans, inclusive of both ends
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether the session is in progress on the given date
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_end_before_start() {
        let result = Session::new(
            "RUST-2025-01",
            "Rust Fundamentals",
            date(2025, 3, 10),
            date(2025, 3, 7),
            Money::new(dec!(1500)),
        );
        assert!(matches!(
            result,
            Err(EnrollmentError::SessionDatesOutOfOrder { .. })
        ));
    }

    #[test]
    fn test_single_day_session_is_valid() {
        let session = Session::new(
            "SEC-2025-02",
            "Security Workshop",
            date(2025, 5, 2),
            date(2025, 5, 2),
            Money::new(dec!(450)),
        )
        .unwrap();
        assert_eq!(session.duration_days(), 1);
        assert!(session.is_running_on(date(2025, 5, 2)));
        assert!(!session.is_running_on(date(2025, 5, 3)));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Session::new(
            "RUST-2025-01",
            "Rust Fundamentals",
            date(2025, 3, 10),
            date(2025, 3, 14),
            Money::new(dec!(-1)),
        );
        assert!(matches!(result, Err(EnrollmentError::NegativeAmount(_))));
    }
}
