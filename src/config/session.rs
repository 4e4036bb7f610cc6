//! Session storage configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest accepted idle TTL (30 days)
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Session repository configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is discarded
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl SessionConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_secs, 3600);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_validation_zero_ttl() {
        let config = SessionConfig { ttl_secs: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTtl));
    }

    #[test]
    fn test_validation_ttl_too_long() {
        let config = SessionConfig { ttl_secs: MAX_TTL_SECS + 1 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTtl));

        let config = SessionConfig { ttl_secs: u64::MAX };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTtl));
    }

    #[test]
    fn test_validation_valid_ttl() {
        let config = SessionConfig { ttl_secs: 60 };
        assert!(config.validate().is_ok());
    }
}
