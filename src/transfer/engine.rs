//! Transfer pipeline: validate → lock → dedupe → debit → credit → record → commit

use chrono::{DateTime, Utc};

use super::error::TransferError;
use crate::store::{is_unique_violation, NewHistoryEntry, Store};

/// A validated-shape transfer submission
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub sender_id: String,
    pub receiver_id: String,
    /// Amount in minor units, strictly positive
    pub amount: i64,
    /// Caller-supplied idempotency key
    pub transaction_id: String,
    /// Valid-time of the transfer; must be strictly in the future
    pub effective_date: DateTime<Utc>,
}

/// Orchestrates the transfer state machine over the [`Store`]
///
/// The engine holds no in-process locks; serialization of competing
/// transfers is delegated entirely to the database. Any error before
/// commit drops the transaction, which rolls back and releases the
/// advisory locks.
#[derive(Clone)]
pub struct TransferEngine {
    store: Store,
}

impl TransferEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Execute a transfer as a single atomic unit.
    ///
    /// Nothing is observable until commit; after commit the transfer is
    /// immutable (compensate with a new transfer, never rewrite).
    pub async fn create_transfer(&self, req: &TransferRequest) -> Result<(), TransferError> {
        validate(req, Utc::now())?;

        let mut tx = self.store.begin().await?;

        for user_id in [&req.sender_id, &req.receiver_id] {
            if !self.store.user_exists(&mut tx, user_id).await? {
                tracing::warn!(%user_id, "transfer rejected: unknown user");
                return Err(TransferError::UserNotFound);
            }
        }

        // Both accounts stay locked until the transaction ends. The dedupe
        // probe sits inside the lock so concurrent retries serialize.
        self.store
            .acquire_account_locks(&mut tx, &req.sender_id, &req.receiver_id)
            .await?;

        if self
            .store
            .find_by_transaction_id(&mut tx, &req.transaction_id)
            .await?
        {
            tracing::info!(
                transaction_id = %req.transaction_id,
                "transfer rejected: duplicate transaction id"
            );
            return Err(TransferError::DuplicateTransaction);
        }

        // Debit first: solvency errors take priority over anything that
        // could go wrong on the receiving side.
        let sender_balance = self
            .store
            .read_open_balance(&mut tx, &req.sender_id)
            .await?
            .ok_or(TransferError::UserNotFound)?;

        if req.amount > sender_balance.amount {
            tracing::info!(
                sender_id = %req.sender_id,
                amount = req.amount,
                available = sender_balance.amount,
                "transfer rejected: insufficient balance"
            );
            return Err(TransferError::InsufficientBalance);
        }

        self.split_timeline(
            &mut tx,
            &sender_balance,
            sender_balance.amount - req.amount,
            req.effective_date,
        )
        .await?;

        let receiver_balance = self
            .store
            .read_open_balance(&mut tx, &req.receiver_id)
            .await?
            .ok_or(TransferError::UserNotFound)?;

        self.split_timeline(
            &mut tx,
            &receiver_balance,
            receiver_balance.amount + req.amount,
            req.effective_date,
        )
        .await?;

        // History last, so no failed transfer ever leaves an audit trace.
        let entry = NewHistoryEntry {
            sender_id: req.sender_id.clone(),
            receiver_id: req.receiver_id.clone(),
            amount: req.amount,
            transaction_id: req.transaction_id.clone(),
            effective_date: req.effective_date,
        };
        self.store
            .insert_history(&mut tx, &entry)
            .await
            .map_err(|e| {
                // The UNIQUE(transaction_id) constraint is the authoritative
                // duplicate guard; a violation here is a concurrent retry
                // that slipped past the pre-check, not a store failure.
                if is_unique_violation(&e) {
                    TransferError::DuplicateTransaction
                } else {
                    TransferError::Store(e)
                }
            })?;

        tx.commit().await?;

        tracing::info!(
            transaction_id = %req.transaction_id,
            sender_id = %req.sender_id,
            receiver_id = %req.receiver_id,
            amount = req.amount,
            "transfer committed"
        );
        Ok(())
    }

    /// Close-then-insert: split a user's balance timeline at
    /// `effective_date`, with `new_amount` effective from that point on.
    ///
    /// Close precedes insert so there is never an instant with two open
    /// rows for the same user. When the open row already starts at the
    /// split point (a second transfer at the same effective instant), the
    /// split would produce a zero-width interval and collide on
    /// `(user_id, valid_from)`; the row is superseded in place instead,
    /// collapsing same-instant changes to their net amount.
    async fn split_timeline(
        &self,
        tx: &mut crate::store::StoreTx,
        open: &crate::store::Balance,
        new_amount: i64,
        effective_date: DateTime<Utc>,
    ) -> Result<(), TransferError> {
        if effective_date < open.valid_from {
            // A split before the start of the open interval would overlap
            // the already-closed part of the timeline.
            return Err(TransferError::InvalidEffectiveDate);
        }

        if effective_date == open.valid_from {
            let updated = self
                .store
                .supersede_open_balance(tx, &open.user_id, new_amount)
                .await?;
            if !updated {
                return Err(TransferError::Store(sqlx::Error::RowNotFound));
            }
            return Ok(());
        }

        let closed = self
            .store
            .close_open_balance(tx, &open.user_id, effective_date)
            .await?;
        if !closed {
            // The open row was read moments ago under the account lock
            return Err(TransferError::Store(sqlx::Error::RowNotFound));
        }

        self.store
            .insert_balance(tx, &open.user_id, new_amount, effective_date)
            .await?;
        Ok(())
    }
}

/// Structural validation, applied before any database work
fn validate(req: &TransferRequest, now: DateTime<Utc>) -> Result<(), TransferError> {
    if req.amount <= 0 {
        return Err(TransferError::InvalidAmount);
    }
    if req.effective_date <= now {
        return Err(TransferError::InvalidEffectiveDate);
    }
    if req.transaction_id.is_empty() {
        return Err(TransferError::TransactionIdRequired);
    }
    if req.sender_id.is_empty() || req.receiver_id.is_empty() {
        return Err(TransferError::UserNotFound);
    }
    if req.sender_id == req.receiver_id {
        return Err(TransferError::SameParty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request() -> TransferRequest {
        TransferRequest {
            sender_id: "user1".to_string(),
            receiver_id: "user2".to_string(),
            amount: 100,
            transaction_id: "tx1".to_string(),
            effective_date: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate(&request(), Utc::now()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let req = TransferRequest {
            amount: 0,
            ..request()
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::InvalidAmount)
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let req = TransferRequest {
            amount: -100,
            ..request()
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::InvalidAmount)
        ));
    }

    #[test]
    fn test_validate_rejects_past_effective_date() {
        let now = Utc::now();
        let req = TransferRequest {
            effective_date: now - Duration::hours(1),
            ..request()
        };
        assert!(matches!(
            validate(&req, now),
            Err(TransferError::InvalidEffectiveDate)
        ));
    }

    #[test]
    fn test_validate_rejects_effective_date_equal_to_now() {
        let now = Utc::now();
        let req = TransferRequest {
            effective_date: now,
            ..request()
        };
        assert!(matches!(
            validate(&req, now),
            Err(TransferError::InvalidEffectiveDate)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_transaction_id() {
        let req = TransferRequest {
            transaction_id: String::new(),
            ..request()
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::TransactionIdRequired)
        ));
    }

    #[test]
    fn test_validate_rejects_self_transfer() {
        let req = TransferRequest {
            receiver_id: "user1".to_string(),
            ..request()
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::SameParty)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_party() {
        let req = TransferRequest {
            sender_id: String::new(),
            ..request()
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::UserNotFound)
        ));
    }

    #[test]
    fn test_validate_error_priority_amount_first() {
        // A request wrong in every way reports the amount error first
        let req = TransferRequest {
            sender_id: "user1".to_string(),
            receiver_id: "user1".to_string(),
            amount: 0,
            transaction_id: String::new(),
            effective_date: Utc::now() - Duration::hours(1),
        };
        assert!(matches!(
            validate(&req, Utc::now()),
            Err(TransferError::InvalidAmount)
        ));
    }
}
