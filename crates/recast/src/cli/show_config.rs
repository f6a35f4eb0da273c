//! `recast config` handler.

use recast::RecastConfig;
use std::path::Path;

/// Prints the effective configuration.
pub fn handle_config_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = RecastConfig::load(config_path)?;
    print!("{}", config.to_redacted_toml()?);
    Ok(())
}
