//! Scenario generation systems

mod diplomacy;
pub mod economy;
mod generation;
mod military;
pub mod politics;
mod strength;
pub mod territory;

pub use diplomacy::evaluate_postures;
pub use economy::{aggregate_countries, aggregate_world, derive_region_stats};
pub use generation::{generate_countries, generate_map, CULTURES};
pub use military::{choose_doctrines, generate_military};
pub use politics::{apportion, generate_politics};
pub use strength::{evaluate_countries, strength_score, PowerRanking};
pub use territory::{assign_regions, MAX_GROWTH_PASSES};
