//! `recast run` handler.

use super::RunArgs;
use anyhow::Context;
use recast::{FailurePolicy, RecastConfig, render, rewrite};
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::info;

fn read_content(args: &RunArgs) -> anyhow::Result<String> {
    if let Some(content) = &args.content {
        return Ok(content.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No content given: pass --content, --file, or pipe text on stdin");
    }
    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read content from stdin")?;
    Ok(content)
}

/// Rewrites the given content and prints one section per platform.
///
/// Empty content prints nothing and succeeds without reading any settings.
#[tracing::instrument(skip_all, fields(format = ?args.format, isolated = args.isolated))]
pub async fn handle_run_command(config_path: Option<&Path>, args: RunArgs) -> anyhow::Result<()> {
    let content = read_content(&args)?;
    if content.is_empty() {
        info!("Empty content, nothing to rewrite");
        return Ok(());
    }

    let mut config = RecastConfig::load(config_path)?;
    if args.isolated {
        let pipeline = config
            .pipeline()
            .clone()
            .with_failure_policy(FailurePolicy::Isolated);
        config = config.with_pipeline(pipeline);
    }

    let result = rewrite(&config, &content).await?;
    info!(platforms = result.len(), "Run completed");

    println!("{}", render(&result, args.format)?);
    Ok(())
}
