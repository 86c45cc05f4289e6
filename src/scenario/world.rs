//! Scenario - the arena owning regions, countries and the random stream

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScenarioError};
use crate::core::types::CountryId;
use crate::scenario::country::Country;
use crate::scenario::region::{Industry, Region, ResourceStock};
use crate::scenario::strategic::StrategicRegion;

/// The scenario state shared by every generation phase
pub struct Scenario {
    /// All regions; `regions[i].id == i`
    pub regions: Vec<Region>,
    /// Country roster; `countries[i].id == CountryId(i)`
    pub countries: Vec<Country>,
    pub world_totals: WorldTotals,
    pub strategic_regions: Vec<StrategicRegion>,
    /// Single deterministic random stream, drawn from in pipeline order
    pub rng: ChaCha8Rng,
}

/// Sums over every land region of the map
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldTotals {
    pub population: u64,
    pub industry: Industry,
    pub resources: ResourceStock,
    pub land_regions: usize,
    pub area: f64,
}

impl Scenario {
    pub fn new(regions: Vec<Region>, rng: ChaCha8Rng) -> Self {
        Self {
            regions,
            countries: Vec::new(),
            world_totals: WorldTotals::default(),
            strategic_regions: Vec::new(),
            rng,
        }
    }

    pub fn get_region(&self, id: u32) -> Option<&Region> {
        self.regions.get(id as usize)
    }

    pub fn region(&self, id: u32) -> Result<&Region> {
        self.get_region(id).ok_or(ScenarioError::UnknownRegion(id))
    }

    pub fn get_country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(id.index())
    }

    pub fn country(&self, id: CountryId) -> Result<&Country> {
        self.get_country(id).ok_or(ScenarioError::UnknownCountry(id))
    }

    /// Next country id to assign
    pub fn next_country_id(&self) -> CountryId {
        CountryId(self.countries.len() as u32)
    }
}

/// Owners of regions adjacent to `country_id`'s territory, ascending by id
pub fn neighbors_of(regions: &[Region], country_id: CountryId) -> Vec<CountryId> {
    let neighbor_owners: BTreeSet<CountryId> = regions
        .iter()
        .filter(|r| r.owner == Some(country_id))
        .flat_map(|r| r.neighbors.iter().copied())
        .filter_map(|id| regions.get(id as usize))
        .filter_map(|r| r.owner)
        .filter(|&owner| owner != country_id)
        .collect();

    neighbor_owners.into_iter().collect()
}

/// True if any region of `a` borders a region of `b`
pub fn are_adjacent(regions: &[Region], a: CountryId, b: CountryId) -> bool {
    regions
        .iter()
        .filter(|r| r.owner == Some(a))
        .flat_map(|r| r.neighbors.iter())
        .filter_map(|&id| regions.get(id as usize))
        .any(|r| r.owner == Some(b))
}
