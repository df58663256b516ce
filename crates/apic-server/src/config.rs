use apic_auth::Revocation;

/// Boot-time settings, read once from the environment.
pub struct Config {
    pub bind: String,
    pub db_url: String,
    pub secret: String,
    pub revocation: Revocation,
    pub workers: usize,
}

impl Config {
    /// Reads `BIND_ADDR`, `DB_URL`, `JWT_SECRET`, and optionally
    /// `REVOCATION` (default `denylist`) and `WORKERS` (default 4).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} must be set", key))
        };
        let revocation = match var("REVOCATION") {
            Some(mode) => mode.parse::<Revocation>().map_err(|e| anyhow::anyhow!(e))?,
            None => Revocation::default(),
        };
        let workers = match var("WORKERS") {
            Some(n) => n.trim().parse::<usize>()?,
            None => 4,
        };
        Ok(Self {
            bind: required("BIND_ADDR")?,
            db_url: required("DB_URL")?,
            secret: required("JWT_SECRET")?,
            revocation,
            workers,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("db_url", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("revocation", &self.revocation)
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    const BASE: [(&str, &str); 3] = [
        ("BIND_ADDR", "127.0.0.1:8080"),
        ("DB_URL", "postgres://localhost/collection"),
        ("JWT_SECRET", "hunter2"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(env(&BASE)).unwrap();
        assert_eq!(config.revocation, Revocation::Denylist);
        assert_eq!(config.workers, 4);
        assert_eq!(config.secret, "hunter2");
    }

    #[test]
    fn missing_secret_fails() {
        let err = Config::from_lookup(env(&BASE[..2])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn blank_secret_fails() {
        let mut pairs = BASE.to_vec();
        pairs[2] = ("JWT_SECRET", "  ");
        assert!(Config::from_lookup(env(&pairs)).is_err());
    }

    #[test]
    fn slot_mode_is_selectable() {
        let mut pairs = BASE.to_vec();
        pairs.push(("REVOCATION", "slot"));
        pairs.push(("WORKERS", "2"));
        let config = Config::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.revocation, Revocation::Slot);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn debug_hides_secret() {
        let config = Config::from_lookup(env(&BASE)).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
