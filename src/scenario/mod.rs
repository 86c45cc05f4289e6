//! Scenario synthesis - territory, economy, power, diplomacy, politics and armies
//!
//! The `Scenario` arena owns regions and countries; systems in
//! [`systems`] mutate it in the order run by [`generator::generate_scenario`].

pub mod country;
pub mod generator;
pub mod output;
pub mod region;
pub mod strategic;
pub mod systems;
pub mod units;
pub mod world;

pub use country::{
    Country, CountryStats, Division, Military, Politics, Posture, Relation, RelationKind,
};
pub use generator::{build_scenario, generate_scenario};
pub use output::{ScenarioOutput, ScenarioStats, WorldSnapshot};
pub use region::{Industry, Province, Region, ResourceStock, Terrain};
pub use strategic::{StrategicRegion, WeatherMonth};
pub use units::{UnitLibrary, UnitTemplate};
pub use world::{Scenario, WorldTotals};
