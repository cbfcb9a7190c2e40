//! GeoTrack CLI Tool
//!
//! Command line interface for querying geolocation services

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geotrack_core::config::loader::load_config_from_path;
use geotrack_core::{
    GlobalSettings, LocateRequest, Locator, LocatorFactory, UnifiedLocator, GOOGLE, MOZILLA,
    YANDEX,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geotrack")]
#[command(about = "Locate a device from observed cell towers and Wi-Fi access points")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a location request and print the resolved position
    Locate {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: String,
        /// Provider id from the configuration file
        #[arg(short, long, conflicts_with = "url")]
        provider: Option<String>,
        /// Service URL to query directly instead of a configured provider
        #[arg(short, long)]
        url: Option<String>,
        /// API key used together with --url
        #[arg(short, long, default_value = "", requires = "url")]
        key: String,
        /// JSON file with the request (cellTowers, wifiAccessPoints, ipAddress, ...)
        #[arg(short, long)]
        request: String,
    },
    /// Validate configuration file
    ValidateConfig {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: String,
    },
    /// Generate example configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config_example.toml")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            config,
            provider,
            url,
            key,
            request,
        } => {
            let locator = build_locator(&config, provider.as_deref(), url.as_deref(), &key)?;
            let request = read_request(&request)?;

            tracing::info!(
                "Querying {} service at {}",
                locator.dialect(),
                locator.service_url()
            );
            match locator.locate(&request).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(e) => {
                    eprintln!("❌ Location lookup failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::ValidateConfig { config } => {
            println!("Validating configuration file: {}", config);
            let result = load_config_from_path(&config).and_then(|cfg| {
                cfg.validate()?;
                Ok(cfg)
            });
            match result {
                Ok(cfg) => {
                    println!("✅ Configuration is valid");
                    println!("  - {} providers configured", cfg.providers.len());
                    for (id, provider) in cfg.enabled_providers() {
                        println!("  - {} ({}, {})", id, provider.name, provider.dialect());
                    }
                }
                Err(e) => {
                    eprintln!("❌ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::GenerateConfig { output } => {
            println!("Generating configuration file: {}", output);
            std::fs::write(&output, example_config())
                .with_context(|| format!("Failed to write {}", output))?;
            println!("✅ Configuration file generated successfully");
        }
    }

    Ok(())
}

/// 从配置文件中的 provider 或直接给出的地址创建客户端
fn build_locator(
    config_path: &str,
    provider: Option<&str>,
    url: Option<&str>,
    key: &str,
) -> Result<UnifiedLocator> {
    match (provider, url) {
        (Some(provider_id), _) => {
            let cfg = load_config_from_path(config_path)?;
            cfg.validate()?;
            cfg.create_locator(provider_id)
        }
        (None, Some(url)) => {
            // 配置文件存在时沿用其中的全局设置
            let settings = if Path::new(config_path).exists() {
                load_config_from_path(config_path)?.settings
            } else {
                GlobalSettings::default()
            };
            Ok(LocatorFactory::with_settings(
                url,
                key,
                settings.locator_settings(),
            )?)
        }
        (None, None) => anyhow::bail!("Either --provider or --url must be given"),
    }
}

fn read_request(path: &str) -> Result<LocateRequest> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read request {}", path))?;
    let request = serde_json::from_str(&data).context("Failed to parse request")?;
    Ok(request)
}

fn example_config() -> String {
    format!(
        r#"# GeoTrack Configuration File

[settings]
request_timeout_seconds = 30
ignore_ip_method = false
user_agent = "GeoTrack/1.0"

[providers.mozilla]
name = "Mozilla Location Service"
service_url = "{MOZILLA}"
api_key = "test"
enabled = true

[providers.google]
name = "Google Geolocation API"
service_url = "{GOOGLE}"
api_key = "your-google-api-key"
enabled = false

[providers.yandex]
name = "Yandex Locator"
service_url = "{YANDEX}"
api_key = "your-yandex-api-key"
enabled = false
"#
    )
}
