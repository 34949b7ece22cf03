use std::env;

use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as Settings;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::algorithm::DigestAlgorithm;
use crate::algorithm::SigningAlgorithm;
use crate::codec::CodecVariant;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub token: TokenConfig,
    pub mac: MacConfig,
    pub password: PasswordConfig,
    #[serde(default)]
    pub codec: CodecConfig,
    pub digest: DigestConfig,
}

/// Token signing settings. Tokens are always HS512, so a configured
/// secret must decode to 64 bytes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TokenConfig {
    /// Standard base64 secret; a key is generated when absent.
    #[serde(default)]
    pub secret: Option<String>,
    pub ttl_minutes: i64,
}

/// Message authentication settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MacConfig {
    /// Standard base64 secret sized for `algorithm`; generated when absent.
    #[serde(default)]
    pub secret: Option<String>,
    pub algorithm: SigningAlgorithm,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PasswordConfig {
    pub cost: u32,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CodecConfig {
    #[serde(default)]
    pub variant: Option<CodecVariant>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DigestConfig {
    pub algorithm: DigestAlgorithm,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CREDKIT_PASSWORD__COST, CREDKIT_TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = with_defaults(Settings::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: CREDKIT_PASSWORD__COST=10 overrides password.cost
            .add_source(
                Environment::with_prefix("CREDKIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        tracing::debug!(
            run_mode = %run_mode,
            mac_algorithm = config.mac.algorithm.as_str(),
            cost = config.password.cost,
            token_secret_configured = config.token.secret.is_some(),
            mac_secret_configured = config.mac.secret.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Build configuration from an in-memory TOML document layered over
    /// the built-in defaults.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        with_defaults(Settings::builder())?
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: TokenConfig {
                secret: None,
                ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            },
            mac: MacConfig {
                secret: None,
                algorithm: SigningAlgorithm::default(),
            },
            password: PasswordConfig {
                cost: bcrypt::DEFAULT_COST,
            },
            codec: CodecConfig::default(),
            digest: DigestConfig {
                algorithm: DigestAlgorithm::default(),
            },
        }
    }
}

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("token.ttl_minutes", DEFAULT_TOKEN_TTL_MINUTES)?
        .set_default("mac.algorithm", "HS512")?
        .set_default("password.cost", i64::from(bcrypt::DEFAULT_COST))?
        .set_default("digest.algorithm", "sha256")
}
