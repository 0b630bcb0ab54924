use thiserror::Error;

/// Transfer engine error taxonomy
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("effective date must be in the future")]
    InvalidEffectiveDate,

    #[error("transaction id is required")]
    TransactionIdRequired,

    #[error("sender and receiver must be different users")]
    SameParty,

    #[error("user not found")]
    UserNotFound,

    #[error("duplicate transaction")]
    DuplicateTransaction,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}
