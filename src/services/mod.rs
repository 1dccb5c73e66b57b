pub mod analysis;

pub use analysis::EnergyService;
