//! Military - doctrine choice and division composition

use std::collections::BTreeSet;

use crate::core::config::MilitaryConfig;
use crate::core::error::Result;
use crate::core::types::{Doctrine, Stance, Tier};
use crate::scenario::country::{Country, Division};
use crate::scenario::systems::politics::apportion;
use crate::scenario::units::UnitLibrary;
use crate::scenario::world::{Scenario, WorldTotals};

/// Relative strength from which an expansionist country fields armour
const ARMOR_THRESHOLD: f64 = 0.5;
/// A population share this many times the industry share means a manpower army
const MASS_RATIO: f64 = 1.5;

/// Pick doctrines and divisions for every country.
///
/// Doctrines are set first so unit templates can require them. The division
/// total comes from population and military factories, capped by
/// `max_divisions`, and is split across the available templates by weight.
/// Every division deploys to the first province of the capital. Returns the
/// number of divisions fielded.
pub fn generate_military(
    scenario: &mut Scenario,
    units: &UnitLibrary,
    config: &MilitaryConfig,
) -> Result<u32> {
    let mut fielded: u32 = 0;

    for i in 0..scenario.countries.len() {
        let capital = scenario.countries[i].capital;
        let location = scenario.region(capital)?.provinces.first().map(|p| p.id);
        let doctrines = choose_doctrines(&scenario.countries[i], &scenario.world_totals);

        let country = &mut scenario.countries[i];
        country.military.doctrines = doctrines;

        let templates = units.available_for(country);
        let weights: Vec<u32> = templates.iter().map(|t| t.weight).collect();
        let total = division_count(country, config);

        country.military.divisions = templates
            .iter()
            .zip(apportion(&weights, total))
            .filter(|(_, count)| *count > 0)
            .map(|(template, count)| Division {
                template: template.name.clone(),
                count,
                location,
            })
            .collect();

        tracing::debug!(
            "{} fields {} divisions with {:?}",
            country.tag,
            total,
            country.military.doctrines
        );
        fielded = fielded.saturating_add(total);
    }

    tracing::info!("Fielded {} divisions", fielded);
    Ok(fielded)
}

/// Doctrines from stance, tier, relative strength and the manpower balance
pub fn choose_doctrines(country: &Country, world: &WorldTotals) -> Vec<Doctrine> {
    let mut doctrines = BTreeSet::new();

    match country.posture.stance {
        Stance::Expansionist => {
            doctrines.insert(if country.tier == Tier::Major {
                Doctrine::Blitz
            } else {
                Doctrine::Infantry
            });
            if country.relative_score >= ARMOR_THRESHOLD {
                doctrines.insert(Doctrine::Armored);
            }
        }
        Stance::Defensive => {
            doctrines.insert(Doctrine::Defensive);
            doctrines.insert(Doctrine::Artillery);
        }
        Stance::Isolationist => {
            doctrines.insert(Doctrine::Militia);
            doctrines.insert(Doctrine::Support);
        }
    }
    if country.posture.civil_war_risk {
        doctrines.insert(Doctrine::Militia);
    }

    let population = fraction(country.stats.population as f64, world.population as f64);
    let industry = fraction(
        country.stats.industry.total() as f64,
        world.industry.total() as f64,
    );
    if population > 0.0 && population > MASS_RATIO * industry {
        doctrines.insert(Doctrine::Mass);
    }

    doctrines.into_iter().collect()
}

fn fraction(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Divisions backed by population plus one per military factory.
///
/// At least one, never above `max_divisions`.
fn division_count(country: &Country, config: &MilitaryConfig) -> u32 {
    let manpower = country
        .stats
        .population
        .checked_div(config.people_per_division)
        .unwrap_or(0);
    let total = manpower.saturating_add(country.stats.industry.military as u64);
    total.max(1).min(config.max_divisions as u64) as u32
}
