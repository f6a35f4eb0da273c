//! `recast platforms` handler.

use recast::catalog;

/// Lists every platform with the editor role that writes for it.
pub fn handle_platforms_command() -> anyhow::Result<()> {
    for profile in catalog::default_profiles()? {
        let platform = profile.platform();
        println!(
            "{:<10} {:<18} {}",
            platform.as_ref(),
            platform.output_key(),
            profile.editor().name()
        );
        println!("{:<29} goal: {}", "", profile.editor().goal());
    }

    let critic = catalog::critic_role()?;
    println!();
    println!("Reviewed by: {} ({})", critic.name(), critic.goal());
    Ok(())
}
