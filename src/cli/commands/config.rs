use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigFormat, WordfreqConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format: json, toml, yaml
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// Validate the merged configuration
    Validate,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let config = WordfreqConfig::load(custom_config)?;
            println!("{}", config.render(format)?);
        }
        ConfigCommand::Validate => {
            // Loading validates
            WordfreqConfig::load(custom_config)?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}
