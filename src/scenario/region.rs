//! Region - unit of ownership and economic aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{CountryId, Resource};

/// A map region: immutable geography plus fields derived during generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub name: String,

    // Geography
    pub terrain: Terrain,
    pub sea: bool,
    pub coastal: bool,
    /// Land area in map units; negative input is treated as zero
    pub area: f32,
    /// 0.0 at the equator, 1.0 at either pole
    pub latitude: f32,
    pub neighbors: Vec<u32>,
    pub provinces: Vec<Province>,

    // Ownership
    pub owner: Option<CountryId>,
    pub assigned: bool,

    // Derived by economic aggregation
    pub development: f64,
    pub population: u64,
    pub industry: Industry,
    pub resources: ResourceStock,
    pub state_category: u8,

    pub strategic_region: Option<u32>,
}

/// Sub-division of a region; owned only through its region
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Province {
    pub id: u32,
    pub owner: Option<CountryId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Mountain,
    Forest,
    Plains,
    Marsh,
    Coast,
    Desert,
    Hills,
    River,
    Ocean,
}

/// Factory counts of a region or an aggregate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub civilian: u32,
    pub military: u32,
    pub naval: u32,
}

impl Industry {
    pub fn total(&self) -> u64 {
        self.civilian as u64 + self.military as u64 + self.naval as u64
    }

    /// Component-wise sum, saturating at `u32::MAX`
    pub fn add(&mut self, other: &Industry) {
        self.civilian = self.civilian.saturating_add(other.civilian);
        self.military = self.military.saturating_add(other.military);
        self.naval = self.naval.saturating_add(other.naval);
    }
}

/// Quantities of every tracked resource; absent entries count as zero
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStock(pub BTreeMap<Resource, u32>);

impl ResourceStock {
    pub fn get(&self, resource: Resource) -> u32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    pub fn set(&mut self, resource: Resource, amount: u32) {
        if amount == 0 {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, amount);
        }
    }

    pub fn add(&mut self, other: &ResourceStock) {
        for (&resource, &amount) in &other.0 {
            let total = self.0.entry(resource).or_insert(0);
            *total = total.saturating_add(amount);
        }
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&v| v as u64).sum()
    }
}

impl Region {
    /// Create a region with base attributes only; derived fields start empty
    pub fn new(id: u32, terrain: Terrain, area: f32, neighbors: Vec<u32>) -> Self {
        let sea = terrain == Terrain::Ocean;
        Self {
            id,
            name: format!("Region_{}", id),
            terrain,
            sea,
            coastal: false,
            area,
            latitude: 0.5,
            neighbors,
            provinces: Vec::new(),
            owner: None,
            assigned: false,
            development: 0.0,
            population: 0,
            industry: Industry::default(),
            resources: ResourceStock::default(),
            state_category: 0,
            strategic_region: None,
        }
    }

    /// Set owner on the region and every province inside it
    pub fn set_owner(&mut self, owner: CountryId) {
        self.assigned = true;
        self.owner = Some(owner);
        for province in &mut self.provinces {
            province.owner = Some(owner);
        }
    }

    /// How well the terrain supports population and industry (0.0 to 1.0)
    pub fn habitability(terrain: Terrain) -> f64 {
        match terrain {
            Terrain::Plains => 1.0,
            Terrain::River => 1.0,
            Terrain::Coast => 0.9,
            Terrain::Hills => 0.6,
            Terrain::Forest => 0.5,
            Terrain::Marsh => 0.3,
            Terrain::Mountain => 0.25,
            Terrain::Desert => 0.15,
            Terrain::Ocean => 0.0,
        }
    }

    /// Chance (0.0 to 1.0) that a resource deposit exists on this terrain
    pub fn resource_affinity(terrain: Terrain, resource: Resource) -> f64 {
        use Resource::*;
        match (terrain, resource) {
            (Terrain::Ocean, _) => 0.0,
            (Terrain::Mountain, Chromium | Tungsten) => 0.5,
            (Terrain::Mountain, Steel) => 0.6,
            (Terrain::Hills, Steel) => 0.5,
            (Terrain::Hills, Aluminium) => 0.35,
            (Terrain::Desert, Oil) => 0.6,
            (Terrain::Marsh, Oil) => 0.35,
            (Terrain::Forest | Terrain::Marsh, Rubber) => 0.4,
            (Terrain::River | Terrain::Coast, Aluminium) => 0.2,
            (_, Steel) => 0.15,
            _ => 0.05,
        }
    }
}
