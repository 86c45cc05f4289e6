//! Strength scoring and positional tier classification

use std::cmp::Reverse;
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::{ScenarioConfig, StrengthWeights};
use crate::core::types::{CountryId, Tier};
use crate::scenario::country::CountryStats;
use crate::scenario::world::{Scenario, WorldTotals};

/// Countries ordered by descending strength, plus the three tier bands
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PowerRanking {
    pub ordered: Vec<(CountryId, f64)>,
    pub major: Vec<CountryId>,
    pub regional: Vec<CountryId>,
    pub weak: Vec<CountryId>,
}

impl PowerRanking {
    pub fn tier_of(&self, id: CountryId) -> Option<Tier> {
        if self.major.contains(&id) {
            Some(Tier::Major)
        } else if self.regional.contains(&id) {
            Some(Tier::Regional)
        } else if self.weak.contains(&id) {
            Some(Tier::Weak)
        } else {
            None
        }
    }
}

/// Weighted sum of a country's shares of world industry, population and resources
pub fn strength_score(stats: &CountryStats, world: &WorldTotals, weights: &StrengthWeights) -> f64 {
    let industry = share(stats.industry.total() as f64, world.industry.total() as f64);
    let population = share(stats.population as f64, world.population as f64);
    let resources = share(stats.resources.total() as f64, world.resources.total() as f64);

    weights.industry * industry + weights.population * population + weights.resources * resources
}

fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Score every country, rank them and assign tiers by position.
///
/// Equal scores keep roster order. The first `major_count` ranked countries
/// are majors, the next `regional_count` regional powers, everyone else weak.
pub fn evaluate_countries(scenario: &mut Scenario, config: &ScenarioConfig) -> PowerRanking {
    let mut by_score: BTreeMap<Reverse<OrderedFloat<f64>>, Vec<CountryId>> = BTreeMap::new();

    for country in &mut scenario.countries {
        let score = strength_score(&country.stats, &scenario.world_totals, &config.strength);
        country.strength_score = score;
        by_score
            .entry(Reverse(OrderedFloat(score)))
            .or_default()
            .push(country.id);
    }

    let best = by_score
        .keys()
        .next()
        .map(|Reverse(score)| score.into_inner())
        .unwrap_or(0.0);

    let mut ranking = PowerRanking::default();
    for (Reverse(score), ids) in &by_score {
        for &id in ids {
            let tier = if ranking.major.len() < config.tiers.major_count {
                ranking.major.push(id);
                Tier::Major
            } else if ranking.regional.len() < config.tiers.regional_count {
                ranking.regional.push(id);
                Tier::Regional
            } else {
                ranking.weak.push(id);
                Tier::Weak
            };
            ranking.ordered.push((id, score.into_inner()));

            let country = &mut scenario.countries[id.index()];
            country.tier = tier;
            country.relative_score = if best > 0.0 {
                score.into_inner() / best
            } else {
                0.0
            };
        }
    }

    tracing::info!(
        "Ranked {} countries: {} major, {} regional, {} weak",
        ranking.ordered.len(),
        ranking.major.len(),
        ranking.regional.len(),
        ranking.weak.len()
    );

    ranking
}
