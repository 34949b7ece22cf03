mod common;

use common::EnvVarGuard;
use credkit::AuthenticationError;
use credkit::Authenticator;
use credkit::Config;
use credkit::DigestAlgorithm;
use credkit::SigningAlgorithm;

// Environment variables are process-wide, so every case touching them
// lives in this one test.
#[test]
fn test_environment_overrides() {
    let defaults = Config::load().expect("Failed to load config");
    assert_eq!(defaults, Config::default());

    {
        let _ttl = EnvVarGuard::set("CREDKIT_TOKEN__TTL_MINUTES", "15");
        let _cost = EnvVarGuard::set("CREDKIT_PASSWORD__COST", "5");
        let _mac = EnvVarGuard::set("CREDKIT_MAC__ALGORITHM", "HS384");
        let _digest = EnvVarGuard::set("CREDKIT_DIGEST__ALGORITHM", "sha512");

        let config = Config::load().expect("Failed to load config");
        assert_eq!(config.token.ttl_minutes, 15);
        assert_eq!(config.password.cost, 5);
        assert_eq!(config.mac.algorithm, SigningAlgorithm::HS384);
        assert_eq!(config.digest.algorithm, DigestAlgorithm::Sha512);
        assert_eq!(config.token.secret, None);
    }

    {
        let _ttl = EnvVarGuard::set("CREDKIT_TOKEN__TTL_MINUTES", "-5");

        let config = Config::load().expect("Failed to load config");
        assert!(matches!(
            Authenticator::from_config(&config),
            Err(AuthenticationError::InvalidTokenLifetime(-5))
        ));
    }

    // Guards removed the overrides
    assert_eq!(Config::load().expect("Failed to load config"), Config::default());
}
