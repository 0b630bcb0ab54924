//! Row types for the bitemporal tables

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Sentinel timestamp marking an open-ended validity interval.
///
/// Kept as a far-future equality rather than NULL so the open-row predicate
/// stays indexable (`valid_to = sentinel`).
pub fn open_ended() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap()
}

/// One interval of an account's balance timeline.
///
/// `valid_from`/`valid_to` bound the interval in valid time (half-open,
/// `valid_to = open_ended()` on the currently-effective row). `system_from`/
/// `system_to` record when the system believed the row true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Balance {
    pub user_id: String,
    /// Amount in minor units
    #[schema(example = 10_000_000_i64)]
    pub amount: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub system_from: DateTime<Utc>,
    pub system_to: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
}

impl Balance {
    /// Whether this row is the currently-effective one
    pub fn is_open(&self) -> bool {
        self.valid_to == open_ended()
    }
}

/// An immutable audit entry for a committed transfer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub id: i64,
    pub sender_id: String,
    pub receiver_id: String,
    #[schema(example = 100_i64)]
    pub amount: i64,
    /// Caller-supplied idempotency key, unique across all history
    pub transaction_id: String,
    pub effective_date: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
    pub system_from: DateTime<Utc>,
    pub system_to: DateTime<Utc>,
}

/// Fields of a history entry prior to insertion
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: i64,
    pub transaction_id: String,
    pub effective_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_open_ended_sentinel() {
        let sentinel = open_ended();
        assert_eq!(sentinel.to_rfc3339(), "9999-12-31T23:59:59+00:00");
    }

    #[test]
    fn test_balance_is_open() {
        let now = Utc::now();
        let open = Balance {
            user_id: "user1".to_string(),
            amount: 100,
            valid_from: now,
            valid_to: open_ended(),
            system_from: now,
            system_to: open_ended(),
            recorded_at: now,
        };
        assert!(open.is_open());

        let closed = Balance {
            valid_to: now + Duration::hours(1),
            ..open
        };
        assert!(!closed.is_open());
    }
}
