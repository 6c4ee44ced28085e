//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration (defaults, `gitflow.toml`, flags)
//! - Build the event context and the forge client
//! - Delegate to the [`crate::engine`] and hand the outcome back to `main`
//!
//! The CLI layer is thin: it performs no validation of its own and never
//! decides the process exit code. That decision belongs to `main`.

pub mod args;

pub use args::Cli;

use std::env;
use std::path::Path;

use anyhow::Result;

use crate::core::config::{BranchConfig, FileConfig, CONFIG_FILE_NAME};
use crate::engine;
use crate::event::EventContext;
use crate::forge::github::{GitHubForge, DEFAULT_API_BASE};
use crate::ui::output::{self, Verbosity};

/// Run the gate. Returns whether the aggregate verdict passed.
///
/// Fatal errors (configuration, environment, host API) come back as `Err`;
/// policy violations come back as `Ok(false)`.
pub async fn run() -> Result<bool> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let file = load_file_config(&cli, verbosity)?;

    let release_version = cli
        .release_version
        .clone()
        .or_else(|| env::var("RELEASE_VERSION").ok());
    let config = BranchConfig::resolve(file.as_ref(), &cli.overrides(release_version))?;
    output::debug(format!("resolved config: {:?}", config), verbosity);

    let ctx = EventContext::from_env(&config)?;
    output::debug(
        format!("event: {:?} on branch '{}'", ctx.kind, ctx.branch),
        verbosity,
    );

    let api_base = cli
        .api_base
        .clone()
        .or_else(|| file.as_ref().and_then(|f| f.api_base.clone()))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
    let forge = GitHubForge::with_api_base(token, &ctx.repository, api_base);

    let verdict = engine::run(&ctx, &config, &forge, verbosity).await?;
    Ok(verdict.passed())
}

/// Load `gitflow.toml` from the explicit `--config` path or the working
/// directory. An explicit path must exist; the implicit one is optional.
fn load_file_config(cli: &Cli, verbosity: Verbosity) -> Result<Option<FileConfig>> {
    match &cli.config {
        Some(path) => {
            let file = FileConfig::load(path)?;
            output::debug(format!("loaded config file {}", path.display()), verbosity);
            Ok(Some(file))
        }
        None => {
            let path = Path::new(CONFIG_FILE_NAME);
            let file = FileConfig::load_optional(path)?;
            if file.is_some() {
                output::debug(format!("loaded config file {}", path.display()), verbosity);
            }
            Ok(file)
        }
    }
}
