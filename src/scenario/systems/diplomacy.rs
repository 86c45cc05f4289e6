//! Diplomatic posture - relations and strategy stance from tiers and adjacency

use crate::core::config::DiplomacyConfig;
use crate::core::types::{CountryId, Stance, Tier};
use crate::scenario::country::{Country, Posture, RelationKind};
use crate::scenario::world::{neighbors_of, Scenario};

/// Derive every country's posture in one pass over the current tiers.
///
/// Existing postures are replaced.
pub fn evaluate_postures(scenario: &mut Scenario, config: &DiplomacyConfig) {
    let neighbors: Vec<Vec<CountryId>> = scenario
        .countries
        .iter()
        .map(|c| neighbors_of(&scenario.regions, c.id))
        .collect();

    let postures: Vec<Posture> = scenario
        .countries
        .iter()
        .map(|country| {
            evaluate_posture(
                country,
                &neighbors[country.id.index()],
                &scenario.countries,
                config,
            )
        })
        .collect();

    let mut civil_wars = 0;
    for (country, posture) in scenario.countries.iter_mut().zip(postures) {
        if posture.civil_war_risk {
            civil_wars += 1;
        }
        country.posture = posture;
    }

    tracing::info!(
        "Evaluated postures for {} countries ({} at risk of civil war)",
        scenario.countries.len(),
        civil_wars
    );
}

fn evaluate_posture(
    country: &Country,
    neighbors: &[CountryId],
    roster: &[Country],
    config: &DiplomacyConfig,
) -> Posture {
    let mut posture = Posture::default();

    for &other_id in neighbors {
        let Some(other) = roster.get(other_id.index()) else {
            tracing::warn!("{} borders unknown country {:?}", country.tag, other_id);
            continue;
        };

        if other.culture == country.culture && country.tier.at_least(&other.tier) {
            posture.add_relation(RelationKind::Unification, other.id);
        }

        if other.tier.outranks(&country.tier) {
            posture.add_relation(RelationKind::Rival, other.id);
        } else if country.tier.outranks(&other.tier) {
            posture.add_relation(RelationKind::ExpansionTarget, other.id);
        }
    }

    if country.stats.region_count >= config.civil_war_min_regions
        && country.stats.development_variance < config.civil_war_variance
    {
        posture.civil_war_risk = true;
        posture.add_relation(RelationKind::CivilWar, country.id);
    }

    posture.stance = choose_stance(country.tier, &posture);
    tracing::debug!(
        "{} is {:?} with {} relations",
        country.tag,
        posture.stance,
        posture.relations.len()
    );

    posture
}

fn choose_stance(tier: Tier, posture: &Posture) -> Stance {
    if tier == Tier::Major {
        return Stance::Expansionist;
    }
    if posture.targets(RelationKind::Rival).next().is_some() {
        return Stance::Defensive;
    }
    let has_prey = posture
        .relations
        .iter()
        .any(|r| matches!(r.kind, RelationKind::ExpansionTarget | RelationKind::Unification));
    if has_prey {
        Stance::Expansionist
    } else {
        Stance::Isolationist
    }
}
