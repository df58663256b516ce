use apic_core::NOBODY;
use apic_core::RoleId;
use apic_core::UserId;

/// Stored user record as returned by a [`crate::Directory`].
///
/// Owned by the storage collaborator; authentication only reads it.
/// An id of [`NOBODY`] means the lookup found no such user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Member {
    id: UserId,
    username: String,
    hashword: String,
    role: RoleId,
}

impl Member {
    pub fn new(id: UserId, username: String, hashword: String, role: RoleId) -> Self {
        Self {
            id,
            username,
            hashword,
            role,
        }
    }
    /// The not-found sentinel.
    pub fn nobody() -> Self {
        Self::default()
    }
    pub fn exists(&self) -> bool {
        self.id != NOBODY
    }
    pub fn id(&self) -> UserId {
        self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
    pub fn role(&self) -> RoleId {
        self.role
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("hashword", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
