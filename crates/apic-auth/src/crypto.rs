use super::*;
use apic_core::TOKEN_DURATION;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;

/// Token manager: signs, verifies, decodes, and revokes HS256 tokens.
///
/// Built once at startup from the injected secret and shared read-only.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    strict: Validation,
    lenient: Validation,
    revocation: Revocation,
}

impl Crypto {
    pub fn new(secret: &[u8], revocation: Revocation) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Signing("signing secret is empty".into()));
        }
        let mut strict = Validation::new(Algorithm::HS256);
        strict.leeway = 0;
        let mut lenient = strict.clone();
        lenient.validate_exp = false;
        Ok(Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            strict,
            lenient,
            revocation,
        })
    }
    /// Sign claims for `member`, valid for [`TOKEN_DURATION`] from `now`.
    pub fn issue(&self, member: &Member, now: std::time::SystemTime) -> Result<String, AuthError> {
        self.encode(&Claims::new(member, now))
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&jsonwebtoken::Header::new(Algorithm::HS256), claims, &self.encoding)
            .inspect_err(|e| log::error!("token signing failed: {}", e))
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature and expiry, yielding the raw claim map.
    pub fn verify(&self, token: &str) -> Result<RawClaims, AuthError> {
        jsonwebtoken::decode::<RawClaims>(token, &self.decoding, &self.strict)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    /// Reshape verified claims into [`Claims`].
    ///
    /// Does not re-check signature or expiry; `raw` must come from
    /// [`Crypto::verify`]. Lossy, see `From<&RawClaims> for Claims`.
    pub fn decode(raw: &RawClaims) -> Claims {
        Claims::from(raw)
    }

    /// Record `token` as revoked. Best effort: registry failures are logged
    /// and swallowed, so a failed write leaves the token usable.
    pub async fn revoke<R>(&self, token: &str, registry: &R)
    where
        R: Registry + ?Sized,
    {
        let key = self.revocation.key(token);
        let ttl = match self.revocation {
            Revocation::Slot => None,
            Revocation::Denylist => match self.remaining(token) {
                Some(ttl) if ttl.is_zero() => {
                    log::debug!("token {} already expired", Self::hash(token));
                    return;
                }
                Some(ttl) => Some(ttl),
                None => Some(TOKEN_DURATION),
            },
        };
        if let Err(e) = registry.set(&key, token, ttl).await {
            log::error!("failed to record revocation: {}", e);
        }
        match registry.get(&key).await {
            Ok(Some(held)) => log::debug!("{} holds {}", key, Self::hash(&held)),
            Ok(None) => log::debug!("{} is empty after revocation", key),
            Err(e) => log::error!("failed to read back revocation: {}", e),
        }
    }

    /// Whether the registry currently marks `token` as revoked.
    /// Read failures are logged and count as not revoked.
    pub async fn revoked<R>(&self, token: &str, registry: &R) -> bool
    where
        R: Registry + ?Sized,
    {
        let key = self.revocation.key(token);
        match registry.get(&key).await {
            Ok(held) => match self.revocation {
                Revocation::Slot => held.as_deref() == Some(token),
                Revocation::Denylist => held.is_some(),
            },
            Err(e) => {
                log::error!("failed to read revocation marker: {}", e);
                false
            }
        }
    }

    /// Lifetime left on a correctly signed token, ignoring expiry checks.
    fn remaining(&self, token: &str) -> Option<std::time::Duration> {
        let claims = jsonwebtoken::decode::<RawClaims>(token, &self.decoding, &self.lenient)
            .map(|data| Self::decode(&data.claims))
            .ok()?;
        let now = apic_core::epoch(std::time::SystemTime::now());
        Some(std::time::Duration::from_secs(
            claims.expires_at().saturating_sub(now).max(0) as u64,
        ))
    }

    /// Hex SHA-256 digest of a token, for keys and logs.
    pub fn hash(token: &str) -> String {
        use sha2::Digest;
        format!("{:x}", sha2::Sha256::digest(token.as_bytes()))
    }
}
