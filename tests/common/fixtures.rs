//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use trustgate::config::Config;
use trustgate::core::disclosure::{UserIdentity, VisibilityLevel};
use uuid::Uuid;

/// Signing secret long enough to pass auth validation
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789-abcdefghijklmnop";

/// Factory for user identities
pub struct IdentityFactory;

impl IdentityFactory {
    /// Identity with every optional detail filled in
    pub fn create(alias: &str, level: VisibilityLevel) -> UserIdentity {
        let mut identity = UserIdentity::new(Uuid::new_v4(), alias);
        identity.real_name = Some(format!("Real {}", alias));
        identity.visibility_level = level;
        identity.fields_of_interest = vec!["Backend Engineer".to_string(), "SRE".to_string()];
        identity.school = Some("State University".to_string());
        identity.graduation_year = Some(2021);
        identity
    }

    pub fn anonymous(alias: &str) -> UserIdentity {
        Self::create(alias, VisibilityLevel::Anonymous)
    }

    pub fn public(alias: &str) -> UserIdentity {
        Self::create(alias, VisibilityLevel::RealName)
    }
}

/// Factory for service configuration
pub struct ConfigFactory;

impl ConfigFactory {
    /// Default configuration with a fixed signing secret and in-memory storage
    pub fn create() -> Config {
        let mut config = Config::default();
        config.gateway.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        config.gateway.storage.database.enabled = false;
        config
    }

    /// Configuration with moderation switched off
    pub fn without_moderation() -> Config {
        let mut config = Self::create();
        config.gateway.moderation.enabled = false;
        config
    }
}
