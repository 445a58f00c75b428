// ⚙️ Session configuration - every field has a default

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Venue ids marked as favorites when a session starts
    pub seed_favorites: Vec<u32>,

    /// How many venues the home page features
    pub featured_count: usize,

    pub min_password_length: usize,

    /// Share of the event price due up front (0.0 - 1.0)
    pub advance_payment_ratio: f64,

    /// Title of the listing before any search narrows it
    pub default_listing_title: String,

    /// Register a demo account (with mock bookings) at startup
    pub seed_demo_account: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            seed_favorites: vec![1, 3],
            featured_count: 3,
            min_password_length: 6,
            advance_payment_ratio: 0.25,
            default_listing_title: "Search Results".to_string(),
            seed_demo_account: true,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: SessionConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        if !(0.0..=1.0).contains(&config.advance_payment_ratio) {
            anyhow::bail!(
                "advance_payment_ratio must be between 0 and 1, got {}",
                config.advance_payment_ratio
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.seed_favorites, vec![1, 3]);
        assert_eq!(config.min_password_length, 6);
        assert_eq!(config.featured_count, 3);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed_favorites": [], "min_password_length": 8 }}"#).unwrap();

        let config = SessionConfig::from_file(file.path()).unwrap();
        assert!(config.seed_favorites.is_empty());
        assert_eq!(config.min_password_length, 8);
        assert_eq!(config.advance_payment_ratio, 0.25);
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "advance_payment_ratio": 1.5 }}"#).unwrap();
        assert!(SessionConfig::from_file(file.path()).is_err());
    }
}
