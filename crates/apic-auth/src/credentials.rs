use super::*;

/// Username and plaintext password as submitted to `POST /token`.
#[derive(Clone, serde::Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Look up the claimed user and check the password against its hash.
    ///
    /// The comparison is Argon2's own verifier, so timing does not depend
    /// on where the candidate diverges from the stored password.
    pub async fn verify<D>(&self, directory: &D) -> Result<Member, AuthError>
    where
        D: Directory + ?Sized,
    {
        let member = directory.lookup(&self.username).await?;
        if !member.exists() {
            log::debug!("login for unknown user {}", self.username);
            return Err(AuthError::UserNotFound);
        }
        if !password::verify(&self.password, member.hashword()) {
            log::debug!("login for {} rejected", self.username);
            return Err(AuthError::InvalidCredentials);
        }
        Ok(member)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn roster() -> Roster {
        let roster = Roster::default();
        roster
            .insert(Member::new(
                1,
                "alice".into(),
                password::hash("secret").unwrap(),
                2,
            ))
            .await;
        roster
    }

    #[tokio::test]
    async fn correct_password_returns_member() {
        let roster = roster().await;
        let member = Credentials::new("alice", "secret")
            .verify(&roster)
            .await
            .unwrap();
        assert_eq!(member.id(), 1);
        assert_eq!(member.username(), "alice");
        assert_eq!(member.role(), 2);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid() {
        let roster = roster().await;
        let err = Credentials::new("alice", "wrong")
            .verify(&roster)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_for_any_password() {
        let roster = roster().await;
        for password in ["x", "secret", ""] {
            let err = Credentials::new("bob", password)
                .verify(&roster)
                .await
                .unwrap_err();
            assert_eq!(err, AuthError::UserNotFound);
        }
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        struct Down;
        #[async_trait::async_trait]
        impl Directory for Down {
            async fn lookup(&self, _: &str) -> Result<Member, AuthError> {
                Err(AuthError::StorageRead("offline".into()))
            }
            async fn create(&self, _: &str, _: &str, _: i64) -> Result<Member, AuthError> {
                Err(AuthError::StorageWrite("offline".into()))
            }
        }
        let err = Credentials::new("alice", "secret")
            .verify(&Down)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StorageRead(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let shown = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(!shown.contains("hunter2"));
    }
}
