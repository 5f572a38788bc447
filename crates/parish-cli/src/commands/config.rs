//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration with secrets masked
    Show,
    /// Check the configuration and summarize it
    Validate,
}

/// Copy of `config` safe to print.
pub fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.database.url = mask_password(&config.database.url);
    if config.admin.is_protected() {
        config.admin.api_token = "****".to_string();
    }
    config
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let safe = redacted(config);
            match format {
                OutputFormat::Json => output::print_item(&safe, format),
                OutputFormat::Table => {
                    for (section, value) in [
                        ("server", serde_json::to_value(&safe.server)?),
                        ("database", serde_json::to_value(&safe.database)?),
                        ("booking", serde_json::to_value(&safe.booking)?),
                        ("admin", serde_json::to_value(&safe.admin)?),
                        ("logging", serde_json::to_value(&safe.logging)?),
                    ] {
                        println!("[{section}]");
                        output::print_item(&value, format);
                    }
                }
            }
        }
        ConfigCommand::Validate => {
            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Code prefix", &config.booking.confirmation_prefix);
            output::print_kv(
                "UTC offset",
                &format!("{:+} h", config.booking.utc_offset_hours),
            );
            if !config.admin.is_protected() {
                output::print_warning("admin.api_token is empty: staff routes are open");
            }
        }
    }

    Ok(())
}
