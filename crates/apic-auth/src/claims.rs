use super::*;
use apic_core::RoleId;
use apic_core::TOKEN_DURATION;
use apic_core::Timestamp;

/// Untyped claim map, as produced by signature and expiry verification.
pub type RawClaims = serde_json::Map<String, serde_json::Value>;

/// Token payload: who, with which role, until when.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: RoleId,
    pub exp: Timestamp,
}

impl Claims {
    /// Claims for `member`, expiring one [`TOKEN_DURATION`] after `now`.
    pub fn new(member: &Member, now: std::time::SystemTime) -> Self {
        Self {
            username: member.username().to_string(),
            role: member.role(),
            exp: apic_core::epoch(now + TOKEN_DURATION),
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn role(&self) -> RoleId {
        self.role
    }
    pub fn expires_at(&self) -> Timestamp {
        self.exp
    }
}

/// Best-effort reshape of an already-verified claim map.
///
/// Missing or mistyped fields fall back to their zero value rather than
/// failing, so a token minted without a `role` reads as role `0`. Callers
/// that need a guarantee must check the fields themselves.
impl From<&RawClaims> for Claims {
    fn from(raw: &RawClaims) -> Self {
        Self {
            username: raw
                .get("username")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_default(),
            role: raw
                .get("role")
                .and_then(|v| v.as_i64())
                .unwrap_or_default(),
            exp: raw
                .get("exp")
                .and_then(|v| v.as_i64())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawClaims {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn expiry_is_one_day_after_issue() {
        let now = std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        let member = Member::new(1, "alice".into(), String::new(), 2);
        let claims = Claims::new(&member, now);
        assert_eq!(claims.expires_at(), 1_700_000_000 + 86_400);
        assert_eq!(claims.username(), "alice");
        assert_eq!(claims.role(), 2);
    }

    #[test]
    fn reshapes_complete_map() {
        let claims = Claims::from(&raw(json!({
            "username": "alice",
            "role": 2,
            "exp": 1_700_086_400_i64,
        })));
        assert_eq!(
            claims,
            Claims {
                username: "alice".into(),
                role: 2,
                exp: 1_700_086_400,
            }
        );
    }

    #[test]
    fn missing_role_reads_as_zero() {
        let claims = Claims::from(&raw(json!({ "username": "alice", "exp": 10 })));
        assert_eq!(claims.role(), 0);
        assert_eq!(claims.username(), "alice");
    }

    #[test]
    fn mistyped_fields_read_as_zero() {
        let claims = Claims::from(&raw(json!({ "username": 7, "role": "admin" })));
        assert_eq!(claims, Claims::default());
    }
}
