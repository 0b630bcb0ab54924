//! Schema bootstrap for the bitemporal tables

use anyhow::Result;
use sqlx::PgPool;

/// Create tables and indexes if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing PostgreSQL schema...");

    for (name, ddl) in [
        ("users", CREATE_USERS_TABLE),
        ("balances", CREATE_BALANCES_TABLE),
        ("transaction_history", CREATE_HISTORY_TABLE),
        ("balances index", CREATE_BALANCES_INDEX),
        ("sender index", CREATE_SENDER_INDEX),
        ("receiver index", CREATE_RECEIVER_INDEX),
    ] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", name, e))?;
    }

    tracing::info!("PostgreSQL schema initialized successfully");
    Ok(())
}

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id    VARCHAR(255) PRIMARY KEY,
    username   VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ  NOT NULL DEFAULT now()
)
"#;

const CREATE_BALANCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS balances (
    user_id     VARCHAR(255) NOT NULL REFERENCES users(user_id),
    amount      BIGINT       NOT NULL,
    valid_from  TIMESTAMPTZ  NOT NULL,
    valid_to    TIMESTAMPTZ  NOT NULL DEFAULT '9999-12-31 23:59:59+00',
    system_from TIMESTAMPTZ  NOT NULL DEFAULT now(),
    system_to   TIMESTAMPTZ  NOT NULL DEFAULT '9999-12-31 23:59:59+00',
    recorded_at TIMESTAMPTZ  NOT NULL DEFAULT now(),
    PRIMARY KEY (user_id, valid_from)
)
"#;

const CREATE_HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transaction_history (
    id             BIGSERIAL    PRIMARY KEY,
    sender_id      VARCHAR(255) NOT NULL REFERENCES users(user_id),
    receiver_id    VARCHAR(255) NOT NULL REFERENCES users(user_id),
    amount         BIGINT       NOT NULL,
    transaction_id VARCHAR(255) NOT NULL UNIQUE,
    effective_date TIMESTAMPTZ  NOT NULL,
    recorded_at    TIMESTAMPTZ  NOT NULL,
    system_from    TIMESTAMPTZ  NOT NULL DEFAULT now(),
    system_to      TIMESTAMPTZ  NOT NULL DEFAULT '9999-12-31 23:59:59+00'
)
"#;

const CREATE_BALANCES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_balances_user_id_valid_to ON balances(user_id, valid_to)";

const CREATE_SENDER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_transaction_history_sender_id ON transaction_history(sender_id)";

const CREATE_RECEIVER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_transaction_history_receiver_id ON transaction_history(receiver_id)";

/// Seed two demo users with opening balances. Idempotent; used by local
/// bring-up and the DB-gated integration tests.
pub async fn seed_demo_users(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for (user_id, username, amount) in [
        ("user1", "Alice", 10_000_000_i64),
        ("user2", "Bob", 20_000_000_i64),
    ] {
        sqlx::query(
            "INSERT INTO users (user_id, username) VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(username)
        .execute(&mut *tx)
        .await?;

        // Open the balance timeline only if the user has no rows at all
        sqlx::query(
            "INSERT INTO balances (user_id, amount, valid_from)
             SELECT $1, $2, now()
             WHERE NOT EXISTS (SELECT 1 FROM balances WHERE user_id = $1)",
        )
        .bind(user_id)
        .bind(amount)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!("Demo users seeded");
    Ok(())
}
