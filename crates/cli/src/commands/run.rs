use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use purgesim_analysis::Reporter;
use purgesim_sim::simulation::Simulation;

use crate::args::ConfigArgs;
use crate::defaults::PROGRESS_TEMPLATE;
use crate::printing::print_simulation_parameters;

pub fn run_simulation(args: &ConfigArgs, show_progress: bool) -> Result<()> {
    println!("🧬 purgesim - Running Simulation");
    println!("============================================\n");

    let config = args.resolve()?;
    let mut sim = Simulation::new(config).context("Failed to initialize simulation")?;
    let mut reporter = Reporter::create(&sim).context("Failed to create report files")?;

    println!("Configuration:");
    print_simulation_parameters(&sim);

    let end = sim.schedule().end();
    println!("Running {end} generations...");

    let pb = if show_progress {
        let pb = ProgressBar::new(end);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let result = sim.run_with(|sim, summary| {
        reporter.record(sim)?;
        if let Some(pb) = &pb {
            pb.set_message(format!("N={} Ne={}", summary.size, summary.target_ne));
            pb.inc(1);
        }
        Ok(())
    });

    if let Some(pb) = &pb {
        pb.finish_with_message("Done");
    }
    result.with_context(|| format!("Simulation stopped at generation {}", sim.generation()))?;

    info!(
        "{} mutations created, {} report rows written",
        sim.mutations_created(),
        reporter.rows_written()
    );

    println!("\n✓ Simulation complete!");
    println!("  Final generation: {end}");
    println!("  Final population size: {}", sim.population().size());
    println!("\nReports:");
    for path in reporter.paths() {
        println!("  • {}", path.display());
    }

    Ok(())
}
