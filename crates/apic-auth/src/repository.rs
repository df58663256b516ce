use super::*;
use apic_core::RoleId;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;
use tokio_postgres::Client;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:    &str = "users";
/// Table backing the revocation [`Registry`].
#[rustfmt::skip]
pub const REGISTRY: &str = "registry";

const CREATE_USERS: &str = const_format::concatcp!(
    "CREATE TABLE IF NOT EXISTS ",
    USERS,
    " (
        id          BIGSERIAL PRIMARY KEY,
        username    VARCHAR(64) UNIQUE NOT NULL,
        hashword    TEXT NOT NULL,
        role_id     BIGINT NOT NULL
    );"
);
const CREATE_REGISTRY: &str = const_format::concatcp!(
    "CREATE TABLE IF NOT EXISTS ",
    REGISTRY,
    " (
        key         TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        expires_at  TIMESTAMPTZ
    );
    CREATE INDEX IF NOT EXISTS idx_registry_expires ON ",
    REGISTRY,
    " (expires_at) WHERE expires_at IS NOT NULL;"
);

/// Create the users and registry tables if they do not exist yet.
pub async fn migrate(client: &Client) -> Result<(), AuthError> {
    client
        .batch_execute(CREATE_USERS)
        .await
        .map_err(|e| AuthError::StorageWrite(e.to_string()))?;
    client
        .batch_execute(CREATE_REGISTRY)
        .await
        .map_err(|e| AuthError::StorageWrite(e.to_string()))?;
    log::info!("auth tables ready");
    Ok(())
}

#[async_trait::async_trait]
impl Directory for Arc<Client> {
    async fn lookup(&self, username: &str) -> Result<Member, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, hashword, role_id FROM ",
                USERS,
                " WHERE username = $1"
            ),
            &[&username],
        )
        .await
        .map_err(|e| AuthError::StorageRead(e.to_string()))
        .map(|opt| {
            opt.map(|row| {
                Member::new(
                    row.get::<_, i64>(0),
                    row.get::<_, String>(1),
                    row.get::<_, String>(2),
                    row.get::<_, i64>(3),
                )
            })
            .unwrap_or_else(Member::nobody)
        })
    }

    async fn create(
        &self,
        username: &str,
        hashword: &str,
        role: RoleId,
    ) -> Result<Member, AuthError> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (username, hashword, role_id) VALUES ($1, $2, $3) RETURNING id"
            ),
            &[&username, &hashword, &role],
        )
        .await
        .map_err(|e| AuthError::StorageWrite(e.to_string()))
        .map(|row| {
            Member::new(
                row.get::<_, i64>(0),
                username.to_string(),
                hashword.to_string(),
                role,
            )
        })
    }
}

#[async_trait::async_trait]
impl Registry for Arc<Client> {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError> {
        let deadline = ttl.map(|ttl| SystemTime::now() + ttl);
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                REGISTRY,
                " WHERE expires_at IS NOT NULL AND expires_at <= NOW()"
            ),
            &[],
        )
        .await
        .map(|n| log::debug!("purged {} expired registry rows", n))
        .map_err(|e| AuthError::StorageWrite(e.to_string()))?;
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                REGISTRY,
                " (key, value, expires_at) VALUES ($1, $2, $3)
                 ON CONFLICT (key) DO UPDATE
                 SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at"
            ),
            &[&key, &value, &deadline],
        )
        .await
        .map(|_| ())
        .map_err(|e| AuthError::StorageWrite(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT value FROM ",
                REGISTRY,
                " WHERE key = $1 AND (expires_at IS NULL OR expires_at > NOW())"
            ),
            &[&key],
        )
        .await
        .map(|opt| opt.map(|row| row.get::<_, String>(0)))
        .map_err(|e| AuthError::StorageRead(e.to_string()))
    }
}
