use super::*;
use apic_core::RoleId;
use apic_core::UserId;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// User storage as seen by authentication.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    /// Fetch a user by name. Returns [`Member::nobody`] when absent.
    async fn lookup(&self, username: &str) -> Result<Member, AuthError>;
    /// Persist a new user whose password is already hashed.
    async fn create(&self, username: &str, hashword: &str, role: RoleId)
    -> Result<Member, AuthError>;
}

/// Hash `password` and store a new user under `username`.
pub async fn enroll<D>(
    directory: &D,
    username: &str,
    password: &str,
    role: RoleId,
) -> Result<Member, AuthError>
where
    D: Directory + ?Sized,
{
    let hashword = password::hash(password)?;
    directory
        .create(username, &hashword, role)
        .await
        .inspect(|m| log::info!("enrolled user {} with role {}", m.username(), m.role()))
}

/// In-process user table keyed by username.
pub struct Roster {
    members: RwLock<HashMap<String, Member>>,
    count: AtomicI64,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            count: AtomicI64::new(1),
        }
    }
}

impl Roster {
    /// Insert a fully formed record, replacing any user with the same name.
    pub async fn insert(&self, member: Member) {
        self.members
            .write()
            .await
            .insert(member.username().to_string(), member);
    }
    fn next(&self) -> UserId {
        self.count.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl Directory for Roster {
    async fn lookup(&self, username: &str) -> Result<Member, AuthError> {
        Ok(self
            .members
            .read()
            .await
            .get(username)
            .cloned()
            .unwrap_or_else(Member::nobody))
    }
    async fn create(
        &self,
        username: &str,
        hashword: &str,
        role: RoleId,
    ) -> Result<Member, AuthError> {
        let mut members = self.members.write().await;
        if members.contains_key(username) {
            return Err(AuthError::StorageWrite(format!(
                "username {} already exists",
                username
            )));
        }
        let member = Member::new(self.next(), username.to_string(), hashword.to_string(), role);
        members.insert(username.to_string(), member.clone());
        Ok(member)
    }
}
