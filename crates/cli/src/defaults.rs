//! Shared defaults of the command-line driver.
//! Simulation parameters default through `Configuration::default()`.

pub const CONFIG_FILE: &str = "purgesim.json";

pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";
