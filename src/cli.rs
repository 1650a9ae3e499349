//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Embed Swagger UI into a built documentation site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (defaults to the current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: swagger-tag.toml)
    #[arg(short = 'C', long, default_value = "swagger-tag.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Build arguments overriding the `[site]` section
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Documentation source directory (relative to project root)
    #[arg(short, long)]
    pub docs_dir: Option<PathBuf>,

    /// Rendered site directory (relative to project root)
    #[arg(short, long)]
    pub site_dir: Option<PathBuf>,

    /// Theme that rendered the site, e.g. `material`
    #[arg(short, long)]
    pub theme: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replace <swagger-ui> tags in every rendered page, then copy the assets
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Only copy the Swagger UI assets into the site
    Assets {
        /// Rendered site directory (relative to project root)
        #[arg(short, long)]
        site_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from([
            "swagger-tag",
            "--root",
            "/project",
            "build",
            "--site-dir",
            "public",
            "--theme",
            "readthedocs",
        ]);

        assert_eq!(cli.root, Some(PathBuf::from("/project")));
        assert_eq!(cli.config, PathBuf::from("swagger-tag.toml"));
        match cli.command {
            Commands::Build { build_args } => {
                assert_eq!(build_args.site_dir, Some(PathBuf::from("public")));
                assert_eq!(build_args.theme.as_deref(), Some("readthedocs"));
                assert!(build_args.docs_dir.is_none());
            }
            Commands::Assets { .. } => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_assets() {
        let cli = Cli::parse_from(["swagger-tag", "-C", "docs.toml", "assets"]);

        assert_eq!(cli.config, PathBuf::from("docs.toml"));
        assert!(matches!(cli.command, Commands::Assets { site_dir: None }));
    }
}
