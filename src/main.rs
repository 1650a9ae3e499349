//! swagger-tag - Embed Swagger UI viewers into a rendered documentation site.

mod build;
mod cli;
mod config;
mod logger;
mod plugin;
mod site;
mod swagger;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::path::Path;
use swagger::publish_assets;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config),
        Commands::Assets { .. } => publish_assets(&config.site.bundle_dir, &config.site.site_dir),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        let config = SiteConfig::from_path(&config_path)?;
        log!("config"; "Loaded `{}`", config.config_path.display());
        config
    } else {
        log!("config"; "`{}` not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
