use purgesim_sim::simulation::{Configuration, DemographicSchedule, Simulation};

pub fn print_simulation_parameters(sim: &Simulation) {
    print_parameters(sim.config());
    print_schedule_summary(sim.schedule());
    println!("  • Random Seed: {} (effective)", sim.seed());
    println!();
}

pub fn print_parameters(config: &Configuration) {
    let execution = &config.execution;
    let architecture = &config.architecture;
    let demography = &config.demography;
    let reporting = &config.reporting;

    println!("\n📋 Simulation Configuration");
    println!("  • Carrying Capacity: {} [-K, --capacity]", execution.capacity);
    if let Some(seed) = execution.seed {
        println!("  • Random Seed: {seed} [--seed]");
    } else {
        println!("  • Random Seed: Random [--seed]");
    }
    println!(
        "  • Regulator Tolerance: {:.3} [--regulator-tolerance]",
        execution.regulator_tolerance
    );

    println!("\n🧬 Genetic Architecture");
    println!(
        "  • Genes: {} × {} sites [--gene-count, --gene-length]",
        architecture.gene_count, architecture.gene_length
    );
    println!(
        "  • Chromosome Groups: {} [--chromosomes]",
        architecture.chromosome_count
    );
    println!(
        "  • Deleterious Types: {} [--del-mut], lethal fraction {:.3} [--lethal-fraction]",
        architecture.deleterious_types, architecture.lethal_fraction
    );
    println!(
        "  • Mutation Rate: {:.2e} /site/gen [--mutation-rate]",
        architecture.mutation_rate
    );
    println!(
        "  • Recombination Rate: {:.2e} between genes [--recombination-rate]",
        architecture.recombination_rate
    );

    println!("\n📉 Demography");
    println!("  • Burn-in: {} × K [--burn-in]", demography.burn_in_multiplier);
    println!(
        "  • Bottleneck: Ne {} [--bottleneck-ne], ramp {} [--bottleneck-ramp], duration {} [--bottleneck-duration]",
        demography.bottleneck_ne, demography.bottleneck_ramp, demography.bottleneck_duration
    );
    println!(
        "  • Recovery: {} × K [--recovery-fraction], ramp {} [--recovery-ramp]",
        demography.recovery_fraction, demography.recovery_ramp
    );
    println!("  • Tail: {} generations [--tail]", demography.tail);

    println!("\n📝 Reporting");
    println!(
        "  • Output: {}/{}_*.tsv [-o, --output-dir] [-N, --name]",
        reporting.output_dir.display(),
        reporting.name
    );
    println!(
        "  • Interval: every {} generations during burn-in [--report-every-burnin], then every {} [--report-every]",
        reporting.report_every_burnin, reporting.report_every
    );
    println!(
        "  • Samples: {} individuals [--individual-sample], {} for π [--pi-sample]",
        reporting.individual_sample_size, reporting.pi_sample_size
    );
    println!("  • π Window: {} sites [--pi-window]", reporting.pi_window);
    println!(
        "  • Genotypes: {} [--genotypes]",
        if reporting.genotypes { "Enabled" } else { "Disabled" }
    );
}

pub fn print_schedule_summary(schedule: &DemographicSchedule) {
    println!("\n⏱  Schedule");
    println!("  • Burn-in ends: generation {}", schedule.burn_in_end());
    println!("  • Final generation: {}", schedule.end());
    println!("  • Scheduled changes: {}", schedule.len());
}
