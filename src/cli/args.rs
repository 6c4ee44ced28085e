//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! Every branch-layout flag is optional: values fall back to the repo's
//! `gitflow.toml` (if present) and then to the conventional GitFlow
//! defaults. The release version may alternatively come from the
//! `RELEASE_VERSION` environment variable.

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::ConfigOverrides;

/// gitflow-gate - CI policy gate enforcing GitFlow branching discipline
#[derive(Parser, Debug)]
#[command(name = "gitflow-gate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Trunk (production) branch name [default: main]
    #[arg(long)]
    pub trunk: Option<String>,

    /// Integration (pre-release) branch name [default: develop]
    #[arg(long)]
    pub develop: Option<String>,

    /// Feature branch prefix [default: feature/]
    #[arg(long)]
    pub feature_prefix: Option<String>,

    /// Bugfix branch prefix [default: bugfix/]
    #[arg(long)]
    pub bugfix_prefix: Option<String>,

    /// Release branch prefix [default: release/]
    #[arg(long)]
    pub release_prefix: Option<String>,

    /// Hotfix branch prefix [default: hotfix/]
    #[arg(long)]
    pub hotfix_prefix: Option<String>,

    /// Support branch prefix [default: support/]
    #[arg(long)]
    pub support_prefix: Option<String>,

    /// Release tag prefix [default: v]
    #[arg(long)]
    pub tag_prefix: Option<String>,

    /// Declared release version (falls back to $RELEASE_VERSION)
    #[arg(long)]
    pub release_version: Option<String>,

    /// Path to the config file [default: ./gitflow.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host API base URL (for GitHub Enterprise)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// The config overrides carried by this invocation's flags.
    pub fn overrides(&self, release_version: Option<String>) -> ConfigOverrides {
        ConfigOverrides {
            trunk: self.trunk.clone(),
            develop: self.develop.clone(),
            feature_prefix: self.feature_prefix.clone(),
            bugfix_prefix: self.bugfix_prefix.clone(),
            release_prefix: self.release_prefix.clone(),
            hotfix_prefix: self.hotfix_prefix.clone(),
            support_prefix: self.support_prefix.clone(),
            tag_prefix: self.tag_prefix.clone(),
            release_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_branch_layout_flags() {
        let cli = Cli::parse_from([
            "gitflow-gate",
            "--trunk",
            "production",
            "--release-version",
            "2.0.0",
            "--debug",
        ]);
        assert_eq!(cli.trunk.as_deref(), Some("production"));
        assert_eq!(cli.release_version.as_deref(), Some("2.0.0"));
        assert!(cli.debug);
        assert!(cli.develop.is_none());
    }

    #[test]
    fn overrides_carry_the_resolved_release_version() {
        let cli = Cli::parse_from(["gitflow-gate"]);
        let overrides = cli.overrides(Some("1.2.3".to_string()));
        assert_eq!(overrides.release_version.as_deref(), Some("1.2.3"));
        assert!(overrides.trunk.is_none());
    }
}
