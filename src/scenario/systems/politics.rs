//! Politics - party popularity, ruling ideology and elections

use std::cmp::Reverse;

use rand::Rng;

use crate::core::config::PoliticsConfig;
use crate::core::types::{Ideology, Stance};
use crate::scenario::country::{Country, Politics};
use crate::scenario::world::Scenario;

/// Draw every country's party popularity and derive its government.
///
/// Four base weights are drawn per country in roster order, the ideologies
/// its posture favours get `stance_bias` on top, and the weights are turned
/// into whole percentages summing to 100. The most popular party rules;
/// ties go to the earlier ideology. Only democracies hold elections.
pub fn generate_politics(scenario: &mut Scenario, config: &PoliticsConfig) {
    let mut democracies = 0;

    for country in &mut scenario.countries {
        let mut weights = [0u32; 4];
        for weight in &mut weights {
            *weight = scenario.rng.gen_range(1..=100);
        }
        for ideology in favoured_ideologies(country) {
            let weight = &mut weights[ideology.index()];
            *weight = weight.saturating_add(config.stance_bias);
        }

        let shares = apportion(&weights, 100);
        let parties = [shares[0], shares[1], shares[2], shares[3]];
        let ruling_party = ruling_party(&parties);

        country.politics = Politics {
            ruling_party,
            parties,
            allow_elections: ruling_party == Ideology::Democratic,
        };
        if country.politics.allow_elections {
            democracies += 1;
        }
        tracing::debug!("{} is ruled by {:?} {:?}", country.tag, ruling_party, parties);
    }

    tracing::info!(
        "Generated governments for {} countries ({} democracies)",
        scenario.countries.len(),
        democracies
    );
}

fn favoured_ideologies(country: &Country) -> Vec<Ideology> {
    let mut favoured = vec![match country.posture.stance {
        Stance::Expansionist => Ideology::Fascism,
        Stance::Defensive => Ideology::Democratic,
        Stance::Isolationist => Ideology::Neutrality,
    }];
    if country.posture.civil_war_risk {
        favoured.push(Ideology::Communism);
    }
    favoured
}

fn ruling_party(parties: &[u32; 4]) -> Ideology {
    Ideology::ALL
        .into_iter()
        .max_by_key(|i| (parties[i.index()], Reverse(i.index())))
        .unwrap_or(Ideology::Neutrality)
}

/// Split `total` proportionally to `weights` by largest remainder.
///
/// The result always sums to `total` unless every weight is zero, in which
/// case everything is zero. Equal remainders favour the earlier entry.
pub fn apportion(weights: &[u32], total: u32) -> Vec<u32> {
    let sum: u64 = weights.iter().map(|&w| w as u64).sum();
    if sum == 0 {
        return vec![0; weights.len()];
    }

    let mut shares: Vec<u32> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(u64, usize)> = Vec::with_capacity(weights.len());
    for (i, &weight) in weights.iter().enumerate() {
        let scaled = weight as u64 * total as u64;
        shares.push((scaled / sum) as u32);
        remainders.push((scaled % sum, i));
    }

    let assigned: u64 = shares.iter().map(|&s| s as u64).sum();
    let leftover = (total as u64 - assigned) as usize;
    remainders.sort_by_key(|&(remainder, i)| (Reverse(remainder), i));
    for &(_, i) in remainders.iter().take(leftover) {
        shares[i] += 1;
    }

    shares
}
