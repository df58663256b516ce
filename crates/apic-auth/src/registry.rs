use super::*;
use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::RwLock;

/// Key-value side store holding revocation markers.
///
/// `ttl` of `None` keeps the entry until it is overwritten.
/// Expired entries read as absent.
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError>;
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;
}

/// In-process registry. Expired entries are purged on every write.
#[derive(Default)]
pub struct Ledger {
    entries: RwLock<HashMap<String, (String, Option<Instant>)>>,
}

#[async_trait::async_trait]
impl Registry for Ledger {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, deadline)| deadline.map_or(true, |d| d > now));
        entries.insert(key.to_string(), (value.to_string(), ttl.map(|ttl| now + ttl)));
        Ok(())
    }
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|(_, deadline)| deadline.map_or(true, |d| d > now))
            .map(|(value, _)| value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_write_wins() {
        let ledger = Ledger::default();
        ledger.set("k", "a", None).await.unwrap();
        ledger.set("k", "b", None).await.unwrap();
        assert_eq!(ledger.get("k").await.unwrap().as_deref(), Some("b"));
        assert_eq!(ledger.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let ledger = Ledger::default();
        ledger.set("gone", "x", Some(Duration::ZERO)).await.unwrap();
        ledger.set("kept", "y", Some(Duration::from_secs(60))).await.unwrap();
        ledger.set("forever", "z", None).await.unwrap();
        assert_eq!(ledger.get("gone").await.unwrap(), None);
        assert_eq!(ledger.get("kept").await.unwrap().as_deref(), Some("y"));
        assert_eq!(ledger.get("forever").await.unwrap().as_deref(), Some("z"));
    }

    #[tokio::test]
    async fn writes_purge_expired_entries() {
        let ledger = Ledger::default();
        ledger.set("revoked:a", "a", Some(Duration::ZERO)).await.unwrap();
        ledger.set("revoked:b", "b", Some(Duration::ZERO)).await.unwrap();
        ledger.set("revoked:c", "c", Some(Duration::from_secs(60))).await.unwrap();
        let entries = ledger.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("revoked:c"));
    }
}
