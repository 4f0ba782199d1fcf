use anyhow::{Context, Result};
use std::path::Path;

use crate::args::ConfigArgs;
use crate::printing::print_parameters;

/// Write the resolved configuration to `output` as JSON.
pub fn init_config(args: &ConfigArgs, output: &Path, force: bool) -> Result<()> {
    println!("🧬 purgesim - Bottleneck Load Simulator");
    println!("============================================\n");

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let config = args.resolve()?;
    print_parameters(&config);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, config.to_json())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n✓ Configuration written: {}", output.display());
    println!("\n💡 Use 'purgesim run -c {}' to start the simulation", output.display());
    Ok(())
}
