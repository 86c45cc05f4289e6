//! Scenario output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::focus::tree::FocusTree;
use crate::scenario::country::Country;
use crate::scenario::region::Region;
use crate::scenario::strategic::StrategicRegion;
use crate::scenario::systems::PowerRanking;
use crate::scenario::world::{Scenario, WorldTotals};

/// Complete generation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub world: WorldSnapshot,
    pub ranking: PowerRanking,
    pub focus_trees: Vec<FocusTree>,
    pub statistics: ScenarioStats,
}

/// Serializable snapshot of the finished scenario
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub regions: Vec<Region>,
    pub countries: Vec<Country>,
    pub world_totals: WorldTotals,
    pub strategic_regions: Vec<StrategicRegion>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioStats {
    pub generation_time_ms: u64,
    pub regions: usize,
    pub land_regions: usize,
    pub strategic_regions: usize,
    pub countries: usize,
    pub major_powers: usize,
    pub regional_powers: usize,
    pub weak_powers: usize,
    pub civil_war_risks: usize,
    pub democracies: usize,
    pub divisions: u64,
    pub focus_chains: usize,
    pub foci: usize,
    pub world_population: u64,
    pub world_industry: u64,
}

impl ScenarioOutput {
    pub fn new(
        scenario: Scenario,
        seed: u64,
        ranking: PowerRanking,
        focus_trees: Vec<FocusTree>,
        elapsed: Duration,
    ) -> Self {
        let statistics = ScenarioStats {
            generation_time_ms: elapsed.as_millis() as u64,
            regions: scenario.regions.len(),
            land_regions: scenario.world_totals.land_regions,
            strategic_regions: scenario.strategic_regions.len(),
            countries: scenario.countries.len(),
            major_powers: ranking.major.len(),
            regional_powers: ranking.regional.len(),
            weak_powers: ranking.weak.len(),
            civil_war_risks: scenario
                .countries
                .iter()
                .filter(|c| c.posture.civil_war_risk)
                .count(),
            democracies: scenario
                .countries
                .iter()
                .filter(|c| c.politics.allow_elections)
                .count(),
            divisions: scenario
                .countries
                .iter()
                .map(|c| c.military.total_divisions() as u64)
                .sum(),
            focus_chains: scenario
                .countries
                .iter()
                .map(|c| c.focus_chains.len())
                .sum(),
            foci: focus_trees.iter().map(|t| t.len()).sum(),
            world_population: scenario.world_totals.population,
            world_industry: scenario.world_totals.industry.total(),
        };

        Self {
            world: WorldSnapshot {
                seed,
                regions: scenario.regions,
                countries: scenario.countries,
                world_totals: scenario.world_totals,
                strategic_regions: scenario.strategic_regions,
            },
            ranking,
            focus_trees,
            statistics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn country(&self, tag: &str) -> Option<&Country> {
        self.world.countries.iter().find(|c| c.tag == tag)
    }

    pub fn focus_tree(&self, tag: &str) -> Option<&FocusTree> {
        self.focus_trees.iter().find(|t| t.tag == tag)
    }

    pub fn summary(&self) -> String {
        let s = &self.statistics;
        format!(
            "Generated scenario (seed {}) in {}ms\n\
             {} regions ({} land) in {} strategic regions\n\
             {} countries: {} major, {} regional, {} weak ({} at risk of civil war)\n\
             {} democracies, {} divisions\n\
             {} focus chains, {} foci\n\
             world population {}, {} factories",
            self.world.seed,
            s.generation_time_ms,
            s.regions,
            s.land_regions,
            s.strategic_regions,
            s.countries,
            s.major_powers,
            s.regional_powers,
            s.weak_powers,
            s.civil_war_risks,
            s.democracies,
            s.divisions,
            s.focus_chains,
            s.foci,
            s.world_population,
            s.world_industry,
        )
    }
}
