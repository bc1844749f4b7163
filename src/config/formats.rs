use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Serialize any value in this format
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = match self {
            ConfigFormat::Json => serde_json::to_string_pretty(value)?,
            ConfigFormat::Toml => toml::to_string_pretty(value)?,
            ConfigFormat::Yaml => serde_yml::to_string(value)?,
        };

        Ok(output)
    }

    /// Guess the format of a config file from its extension, defaulting to TOML
    pub fn from_path(path: &str) -> Self {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => ConfigFormat::Json,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordfreqConfig;

    #[test]
    fn test_config_export_formats() {
        let config = WordfreqConfig::default();

        let json_output = config.render(ConfigFormat::Json).unwrap();
        assert!(json_output.contains("\"top_words\": 5"));

        let toml_output = config.render(ConfigFormat::Toml).unwrap();
        assert!(toml_output.contains("[counter]"));
        assert!(toml_output.contains("top_words = 5"));

        let yaml_output = config.render(ConfigFormat::Yaml).unwrap();
        assert!(yaml_output.contains("top_words: 5"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path("conf.json"), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path("conf.YML"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("conf.yaml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("conf.toml"), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("conf"), ConfigFormat::Toml);
    }
}
