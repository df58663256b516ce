use apic_core::DENYLIST_PREFIX;
use apic_core::REVOKED_KEY;

/// How revoked tokens are recorded in a [`crate::Registry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Revocation {
    /// One fixed key holding the most recently revoked token, with no expiry.
    /// Revoking a second token makes the first valid again.
    Slot,
    /// One key per revoked token digest, expiring with the token itself.
    #[default]
    Denylist,
}

impl Revocation {
    /// Registry key under which `token`'s revocation is recorded.
    pub fn key(&self, token: &str) -> String {
        match self {
            Self::Slot => REVOKED_KEY.to_string(),
            Self::Denylist => format!("{}{}", DENYLIST_PREFIX, crate::Crypto::hash(token)),
        }
    }
}

impl std::str::FromStr for Revocation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slot" => Ok(Self::Slot),
            "denylist" => Ok(Self::Denylist),
            other => Err(format!("unknown revocation mode {:?}", other)),
        }
    }
}

impl std::fmt::Display for Revocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot => f.write_str("slot"),
            Self::Denylist => f.write_str("denylist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!("slot".parse::<Revocation>(), Ok(Revocation::Slot));
        assert_eq!(" Denylist ".parse::<Revocation>(), Ok(Revocation::Denylist));
        assert!("set".parse::<Revocation>().is_err());
    }

    #[test]
    fn slot_shares_one_key() {
        assert_eq!(Revocation::Slot.key("a"), Revocation::Slot.key("b"));
        assert_eq!(Revocation::Slot.key("a"), "token_invalid");
    }

    #[test]
    fn denylist_keys_by_digest() {
        let key = Revocation::Denylist.key("a.b.c");
        assert!(key.starts_with("revoked:"));
        assert!(!key.contains("a.b.c"));
        assert_ne!(key, Revocation::Denylist.key("a.b.d"));
    }
}
