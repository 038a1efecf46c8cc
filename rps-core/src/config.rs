//! Session configuration.

use thiserror::Error;

/// Environment variable holding an optional opponent seed.
pub const SEED_ENV_VAR: &str = "RPS_SEED";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Seed was not an unsigned 64-bit integer
    #[error("invalid seed {0:?}: expected an unsigned integer")]
    InvalidSeed(String),
}

/// Settings for one game session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fixed opponent seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read `RPS_SEED` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(SEED_ENV_VAR) {
            Ok(raw) => Ok(Self { seed: Some(parse_seed(&raw)?) }),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Parse a seed string.
pub fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed(" 7 "), Ok(7));
        assert!(matches!(parse_seed("-1"), Err(ConfigError::InvalidSeed(_))));
        assert!(parse_seed("abc").is_err());
    }

    #[test]
    fn test_default_is_unseeded() {
        assert_eq!(SessionConfig::default().seed, None);
        assert_eq!(SessionConfig::seeded(9).seed, Some(9));
    }
}
