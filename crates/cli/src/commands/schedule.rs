use anyhow::{Context, Result};
use purgesim_sim::simulation::DemographicSchedule;

use crate::args::ConfigArgs;

/// Print the target-Ne trajectory as TSV.
pub fn print_schedule(args: &ConfigArgs) -> Result<()> {
    let config = args.resolve()?;
    let schedule = DemographicSchedule::build(config.execution.capacity, &config.demography)
        .context("Failed to build demographic schedule")?;

    println!("# burnInEnd\t{}", schedule.burn_in_end());
    println!("# end\t{}", schedule.end());
    println!("generation\ttargetNe");
    for (generation, target) in schedule.entries() {
        println!("{generation}\t{target}");
    }
    Ok(())
}
