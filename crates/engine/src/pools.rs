//! Named pools of candidate substitution values consumed by placeholder
//! resolution.

use std::collections::BTreeMap;

use rand::Rng;

use article_core::{ArticleError, ArticleResult};

/// Immutable mapping from pool name to an ordered list of candidates.
///
/// Built once at startup (or merged per request) and then shared read-only,
/// so concurrent batches can borrow the same instance.
#[derive(Debug, Clone, Default)]
pub struct VariablePools {
    pools: BTreeMap<String, Vec<String>>,
}

impl VariablePools {
    pub fn new(pools: BTreeMap<String, Vec<String>>) -> Self {
        Self { pools }
    }

    /// The default pools shipped with the engine.
    pub fn builtin() -> Self {
        let mut pools = BTreeMap::new();
        let mut insert = |name: &str, values: &[&str]| {
            pools.insert(
                name.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            );
        };

        insert(
            "products",
            &[
                "CallShield",
                "PrivacyLine",
                "SecureTalk",
                "VoiceVault",
                "AnonDial",
            ],
        );
        insert(
            "competitors",
            &["Skype", "Zoom", "Google Voice", "WhatsApp", "Viber"],
        );
        insert(
            "audiences",
            &[
                "remote teams",
                "journalists",
                "small businesses",
                "freelancers",
                "privacy-conscious users",
            ],
        );
        insert(
            "use_cases",
            &[
                "private business calls",
                "anonymous interviews",
                "secure client communication",
                "confidential negotiations",
            ],
        );
        insert(
            "problems",
            &[
                "call tracking",
                "number harvesting",
                "spam callbacks",
                "data retention",
            ],
        );
        insert(
            "goals",
            &[
                "protect your identity",
                "keep conversations private",
                "avoid spam callbacks",
                "stay off data-broker lists",
            ],
        );
        insert(
            "benefits",
            &[
                "no registration required",
                "end-to-end encryption",
                "pay-per-use pricing",
                "works in any browser",
            ],
        );
        insert(
            "locations",
            &["New York", "London", "Berlin", "Singapore", "Toronto"],
        );
        insert(
            "services",
            &[
                "anonymous calling",
                "encrypted voice chat",
                "disposable phone numbers",
            ],
        );
        insert(
            "topics",
            &[
                "anonymous calling",
                "call privacy",
                "browser-based telephony",
                "secure communication",
            ],
        );
        insert(
            "actions",
            &[
                "make an anonymous call",
                "set up a private call room",
                "hide your caller ID",
            ],
        );
        insert(
            "cryptocurrencies",
            &["Bitcoin", "Ethereum", "Monero", "Litecoin"],
        );
        insert(
            "languages",
            &["Rust", "Python", "TypeScript", "Go"],
        );

        Self { pools }
    }

    /// Candidates for `name`, or `EmptyPool` if unknown or empty.
    pub fn resolve(&self, name: &str) -> ArticleResult<&[String]> {
        match self.pools.get(name) {
            Some(values) if !values.is_empty() => Ok(values),
            _ => Err(ArticleError::EmptyPool(name.to_string())),
        }
    }

    /// Draw one candidate from `name` using the caller's rng.
    pub fn pick<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> ArticleResult<&str> {
        let values = self.resolve(name)?;
        let idx = rng.gen_range(0..values.len());
        Ok(&values[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pools
            .get(name)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    /// Merge request-supplied overrides on top of these pools. An override
    /// replaces the pool of the same name wholesale; no partial merge, so
    /// selection stays deterministic under a fixed seed.
    pub fn merged(&self, overrides: &BTreeMap<String, Vec<String>>) -> Self {
        let mut pools = self.pools.clone();
        for (name, values) in overrides {
            pools.insert(name.clone(), values.clone());
        }
        Self { pools }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_core::rng;

    #[test]
    fn test_builtin_pools_resolve() {
        let pools = VariablePools::builtin();
        assert!(pools.resolve("products").is_ok());
        assert!(pools.resolve("locations").is_ok());
        assert!(pools.contains("topics"));
    }

    #[test]
    fn test_unknown_pool_is_empty_pool_error() {
        let pools = VariablePools::builtin();
        let err = pools.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, ArticleError::EmptyPool(name) if name == "nonexistent"));
    }

    #[test]
    fn test_override_replaces_pool_wholesale() {
        let pools = VariablePools::builtin();
        let overrides = BTreeMap::from([(
            "products".to_string(),
            vec!["WidgetPro".to_string()],
        )]);
        let merged = pools.merged(&overrides);

        assert_eq!(merged.resolve("products").unwrap(), ["WidgetPro"]);
        // Other pools are untouched.
        assert_eq!(
            merged.resolve("topics").unwrap(),
            pools.resolve("topics").unwrap()
        );
    }

    #[test]
    fn test_empty_override_pool_fails_pick() {
        let pools = VariablePools::builtin();
        let overrides = BTreeMap::from([("products".to_string(), Vec::new())]);
        let merged = pools.merged(&overrides);
        let mut rng = rng::seeded(7);
        assert!(merged.pick("products", &mut rng).is_err());
    }

    #[test]
    fn test_pick_is_deterministic_under_seed() {
        let pools = VariablePools::builtin();
        let a = pools.pick("products", &mut rng::seeded(99)).unwrap().to_string();
        let b = pools.pick("products", &mut rng::seeded(99)).unwrap().to_string();
        assert_eq!(a, b);
    }
}
