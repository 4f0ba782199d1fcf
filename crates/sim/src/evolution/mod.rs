//! Evolutionary processes: the genetic architecture and the mutation,
//! recombination and selection operators driven by it.

pub mod architecture;
pub mod mutation;
pub mod recombination;
pub mod selection;

pub use architecture::{
    dominance_for, draw_selection_coefficients, GeneticArchitecture, MutationCatalog,
};
pub use mutation::MutationModel;
pub use recombination::RecombinationModel;
pub use selection::{update_cached_fitness, IndividualFitness, MultiplicativeFitness};
