use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};

use super::{ConfigFormat, WordfreqConfig};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "WORDFREQ_";

impl WordfreqConfig {
    /// Load the layered configuration.
    ///
    /// Priority, lowest first: embedded defaults, user config, repository
    /// config, `custom_config`, then `WORDFREQ_` environment variables.
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            // User config - support multiple formats
            .merge(Toml::file(format!("{}.toml", Self::user_config_base_path())))
            .merge(Json::file(format!("{}.json", Self::user_config_base_path())))
            .merge(Yaml::file(format!("{}.yaml", Self::user_config_base_path())))
            // Repository config - support multiple formats
            .merge(Toml::file("wordfreq.toml"))
            .merge(Json::file("wordfreq.json"))
            .merge(Yaml::file("wordfreq.yaml"));

        if let Some(path) = custom_config {
            if !std::path::Path::new(path).is_file() {
                bail!("Config file not found: {}", path);
            }
            tracing::trace!("CONFIG LOAD: Applying custom config {}", path);
            figment = match ConfigFormat::from_path(path) {
                ConfigFormat::Json => figment.merge(Json::file(path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(path)),
                ConfigFormat::Toml => figment.merge(Toml::file(path)),
            };
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(figment)
    }

    /// Extract and validate a configuration from an already-built figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: WordfreqConfig = figment
            .extract()
            .context("Failed to parse wordfreq configuration")?;
        config.validate()?;

        tracing::trace!("CONFIG LOAD: Final counter settings = {:?}", config.counter);
        Ok(config)
    }

    /// The embedded defaults as a figment, for callers layering their own sources
    pub fn defaults_figment() -> Figment {
        Figment::new().merge(Toml::string(DEFAULT_CONFIG))
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/wordfreq/config", home),
            Err(_) => "~/.config/wordfreq/config".to_string(),
        }
    }
}
