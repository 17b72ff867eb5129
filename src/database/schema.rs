use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

// Idempotent: safe to run on every startup. Later statements add columns
// that older deployments of the tables may lack.
const SYNC_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(20) NOT NULL UNIQUE,
        api_key UUID NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        content VARCHAR(95) NOT NULL,
        done BOOLEAN NOT NULL DEFAULT false,
        owner_id INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE todos ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE todos ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
];

/// Bring the `users` and `todos` tables up to date. Must finish before the
/// listener accepts traffic.
pub async fn sync(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SYNC_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema sync complete ({} statements)", SYNC_STATEMENTS.len());
    Ok(())
}
