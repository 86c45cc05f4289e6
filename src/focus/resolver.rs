//! Focus chain resolver - decides which chains apply to a country and
//! instantiates their steps

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{ChainId, CountryId, StepId};
use crate::focus::requirement::{
    step_fulfills_requirements, target_fulfills_requirements, TargetRequirement,
};
use crate::focus::template::{FocusChainTemplate, FocusLibrary, FocusStepTemplate};
use crate::focus::{ChainInstance, NationalFocus, Position};
use crate::scenario::country::Country;
use crate::scenario::region::Region;
use crate::scenario::world::Scenario;

/// Rows reserved for each tree level
pub const LEVEL_HEIGHT: i32 = 8;

/// Targets already taken by a country's chains, per tree level
pub type LevelTargets = BTreeMap<usize, BTreeSet<CountryId>>;

/// Country-scoped id and layout counters
#[derive(Clone, Debug, Default)]
pub struct FocusCounters {
    pub next_step: u32,
    pub next_chain: u32,
    /// Left column of the next accepted chain
    pub next_column: i32,
}

/// Everything needed to instantiate one step of an accepted chain
pub struct FocusContext<'a> {
    pub library: &'a FocusLibrary,
    pub chain: &'a FocusChainTemplate,
    pub chain_id: ChainId,
    /// Absolute id of every step in the chain, by template index
    pub step_ids: &'a [StepId],
    pub source_tag: &'a str,
    pub dest_tag: Option<&'a str>,
    pub column_offset: i32,
}

/// Instantiate step `index` of the context's chain.
///
/// Relative links are resolved through `ctx.step_ids`; text keys are looked
/// up in the library with `{source}` and `{target}` filled in.
pub fn build_focus(index: usize, step: &FocusStepTemplate, ctx: &FocusContext) -> NationalFocus {
    let resolve = |offsets: &[i32]| -> Vec<StepId> {
        offsets
            .iter()
            .filter_map(|&offset| FocusStepTemplate::link_target(index, offset, ctx.step_ids.len()))
            .map(|i| ctx.step_ids[i])
            .collect()
    };
    let texts = |keys: &[String], table: &BTreeMap<String, String>| -> Vec<String> {
        keys.iter()
            .filter_map(|key| table.get(key))
            .map(|text| {
                text.replace("{source}", ctx.source_tag)
                    .replace("{target}", ctx.dest_tag.unwrap_or(""))
            })
            .collect()
    };

    NationalFocus {
        step_id: ctx.step_ids[index],
        chain_id: ctx.chain_id,
        step_index: index,
        focus_type: step.focus_type,
        chain_name: ctx.chain.name.clone(),
        source_tag: ctx.source_tag.to_string(),
        dest_tag: ctx.dest_tag.map(str::to_string),
        position: Position {
            x: ctx.column_offset + step.position.x,
            y: ctx.chain.level as i32 * LEVEL_HEIGHT + step.position.y,
        },
        preceding: resolve(&step.after),
        and_foci: resolve(&step.and_with),
        xor_foci: resolve(&step.xor),
        available: texts(&step.available, &ctx.library.available),
        bypasses: texts(&step.bypasses, &ctx.library.bypasses),
        rewards: texts(&step.rewards, &ctx.library.rewards),
    }
}

/// Try to instantiate `template` for `source` (and `target` if directed).
///
/// Checks run cheapest first: chain requirements, then every step's
/// requirements, then target requirements. Rejection returns `None` and
/// leaves `counters` untouched.
pub fn resolve_chain(
    library: &FocusLibrary,
    template: &FocusChainTemplate,
    source: &Country,
    target: Option<&Country>,
    regions: &[Region],
    level_targets: &LevelTargets,
    counters: &mut FocusCounters,
) -> Option<ChainInstance> {
    if template.target != target.is_some() {
        return None;
    }
    if !step_fulfills_requirements(&template.requirements, source) {
        return None;
    }
    if !template
        .steps
        .iter()
        .all(|step| step_fulfills_requirements(&step.requirements, source))
    {
        return None;
    }
    if let Some(target) = target {
        if !target_fulfills_requirements(
            &template.target_requirements,
            source,
            target,
            regions,
            level_targets,
            template.level,
        ) {
            return None;
        }
    }

    // Phase 1: absolute ids
    let chain_id = ChainId(counters.next_chain);
    counters.next_chain += 1;
    let step_ids: Vec<StepId> = (0..template.steps.len())
        .map(|i| StepId(counters.next_step + i as u32))
        .collect();
    counters.next_step += template.steps.len() as u32;

    let min_x = template.steps.iter().map(|s| s.position.x).min().unwrap_or(0);
    let column_offset = counters.next_column - min_x;
    counters.next_column += template.width() + 1;

    // Phase 2: links over the immutable id map
    let ctx = FocusContext {
        library,
        chain: template,
        chain_id,
        step_ids: &step_ids,
        source_tag: &source.tag,
        dest_tag: target.map(|t| t.tag.as_str()),
        column_offset,
    };
    let foci = template
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| build_focus(i, step, &ctx))
        .collect();

    Some(ChainInstance {
        chain_id,
        template_name: template.name.clone(),
        level: template.level,
        target: target.map(|t| t.id),
        foci,
    })
}

/// Resolve every chain of the library for every country.
///
/// Directed chains try each other country in roster order and stop after
/// `max_instances` accepted targets. Returns the number of chain instances
/// created.
pub fn evaluate_country_goals(scenario: &mut Scenario, library: &FocusLibrary) -> usize {
    let mut all_chains: Vec<Vec<ChainInstance>> = Vec::with_capacity(scenario.countries.len());

    for source in &scenario.countries {
        let mut counters = FocusCounters::default();
        let mut level_targets = LevelTargets::new();
        let mut chains = Vec::new();

        for template in &library.chains {
            if !template.target {
                chains.extend(resolve_chain(
                    library,
                    template,
                    source,
                    None,
                    &scenario.regions,
                    &level_targets,
                    &mut counters,
                ));
                continue;
            }

            if let Err(e) = check_relation_targets(scenario, source, template) {
                tracing::warn!("{}: skipping chain '{}': {}", source.tag, template.name, e);
                continue;
            }

            let mut accepted = 0;
            for target in &scenario.countries {
                if accepted >= template.max_instances {
                    break;
                }
                let Some(chain) = resolve_chain(
                    library,
                    template,
                    source,
                    Some(target),
                    &scenario.regions,
                    &level_targets,
                    &mut counters,
                ) else {
                    continue;
                };
                tracing::debug!("{} takes '{}' against {}", source.tag, template.name, target.tag);
                level_targets
                    .entry(template.level)
                    .or_default()
                    .insert(target.id);
                chains.push(chain);
                accepted += 1;
            }
        }

        if chains.is_empty() {
            tracing::info!("{} qualifies for no focus chain", source.tag);
        }
        all_chains.push(chains);
    }

    let mut created = 0;
    for (country, chains) in scenario.countries.iter_mut().zip(all_chains) {
        created += chains.len();
        country.focus_chains = chains;
    }

    tracing::info!("Instantiated {} focus chains", created);
    created
}

/// Relations a directed chain depends on must point into the roster
fn check_relation_targets(
    scenario: &Scenario,
    source: &Country,
    template: &FocusChainTemplate,
) -> crate::core::error::Result<()> {
    for requirement in &template.target_requirements {
        if let TargetRequirement::Relation { relation } = requirement {
            for id in source.posture.targets(*relation) {
                scenario.country(id)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Tier;
    use crate::focus::FocusType;
    use crate::scenario::country::RelationKind;
    use crate::scenario::region::Terrain;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const LIBRARY: &str = r#"
        [rewards]
        claim = "add_claim = {target}"
        pp = "add_political_power = 50"

        [[chain]]
        name = "reform"
        requirements = [{ kind = "min_tier", tier = "regional" }]

        [[chain.step]]
        focus_type = "politics"
        rewards = ["pp"]

        [[chain.step]]
        focus_type = "economy"
        position = { x = 0, y = 1 }
        after = [-1]
        xor = [1]

        [[chain.step]]
        focus_type = "army"
        position = { x = 1, y = 1 }
        after = [-2]
        xor = [-1]

        [[chain]]
        name = "conquest"
        target = true
        max_instances = 2
        target_requirements = [{ kind = "neighbour" }, { kind = "weaker" }]

        [[chain.step]]
        focus_type = "attack"
        rewards = ["claim"]
    "#;

    /// Countries 0..3 each own one region of a line
    fn scenario(tiers: &[Tier], scores: &[f64]) -> Scenario {
        let n = tiers.len() as u32;
        let regions = (0..n)
            .map(|i| {
                let mut neighbors = Vec::new();
                if i > 0 {
                    neighbors.push(i - 1);
                }
                if i + 1 < n {
                    neighbors.push(i + 1);
                }
                let mut region = Region::new(i, Terrain::Plains, 10.0, neighbors);
                region.set_owner(CountryId(i));
                region
            })
            .collect();
        let mut scenario = Scenario::new(regions, ChaCha8Rng::seed_from_u64(0));
        for i in 0..n as usize {
            let mut country = Country::new(CountryId(i as u32), format!("C{:02}", i), "Name".into(), i as u32);
            country.regions = vec![i as u32];
            country.tier = tiers[i];
            country.strength_score = scores[i];
            scenario.countries.push(country);
        }
        scenario
    }

    #[test]
    fn test_rejected_chain_leaves_counters_untouched() {
        let library = FocusLibrary::from_toml_str(LIBRARY).unwrap();
        let scenario = scenario(&[Tier::Weak], &[0.1]);
        let mut counters = FocusCounters::default();

        let chain = resolve_chain(
            &library,
            library.get("reform").unwrap(),
            &scenario.countries[0],
            None,
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        );

        assert!(chain.is_none());
        assert_eq!(counters.next_step, 0);
        assert_eq!(counters.next_chain, 0);
    }

    #[test]
    fn test_failing_step_rejects_whole_chain() {
        let library = FocusLibrary::from_toml_str(
            r#"
            [[chain]]
            name = "steelworks"

            [[chain.step]]
            focus_type = "economy"

            [[chain.step]]
            focus_type = "economy"
            position = { x = 0, y = 1 }
            requirements = [{ kind = "owns_resource", resource = "steel", amount = 10 }]
            after = [-1]
            "#,
        )
        .unwrap();
        let mut scenario = scenario(&[Tier::Major], &[0.5]);
        let mut counters = FocusCounters {
            next_step: 4,
            next_chain: 1,
            next_column: 2,
        };
        let template = library.get("steelworks").unwrap();

        let rejected = resolve_chain(
            &library,
            template,
            &scenario.countries[0],
            None,
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        );
        assert!(rejected.is_none());
        assert_eq!(counters.next_step, 4);
        assert_eq!(counters.next_chain, 1);
        assert_eq!(counters.next_column, 2);

        scenario.countries[0]
            .stats
            .resources
            .set(crate::core::types::Resource::Steel, 10);
        let accepted = resolve_chain(
            &library,
            template,
            &scenario.countries[0],
            None,
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        )
        .unwrap();
        assert_eq!(accepted.foci.len(), 2);
        assert_eq!(counters.next_step, 6);
    }

    #[test]
    fn test_links_resolve_to_absolute_ids() {
        let library = FocusLibrary::from_toml_str(LIBRARY).unwrap();
        let scenario = scenario(&[Tier::Major], &[0.5]);
        let mut counters = FocusCounters {
            next_step: 10,
            next_chain: 3,
            next_column: 4,
        };

        let chain = resolve_chain(
            &library,
            library.get("reform").unwrap(),
            &scenario.countries[0],
            None,
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        )
        .unwrap();

        assert_eq!(chain.chain_id, ChainId(3));
        let ids: Vec<StepId> = chain.step_ids().collect();
        assert_eq!(ids, vec![StepId(10), StepId(11), StepId(12)]);
        assert_eq!(chain.foci[1].preceding, vec![StepId(10)]);
        assert_eq!(chain.foci[1].xor_foci, vec![StepId(12)]);
        assert_eq!(chain.foci[2].preceding, vec![StepId(10)]);
        assert_eq!(chain.foci[2].xor_foci, vec![StepId(11)]);
        assert_eq!(chain.foci[0].focus_type, FocusType::Politics);
        assert_eq!(chain.foci[0].rewards, vec!["add_political_power = 50".to_string()]);
        assert_eq!(chain.foci[2].position, Position { x: 5, y: 1 });
        assert_eq!(counters.next_step, 13);
        assert_eq!(counters.next_column, 7);
    }

    #[test]
    fn test_target_tag_substituted() {
        let library = FocusLibrary::from_toml_str(LIBRARY).unwrap();
        let scenario = scenario(&[Tier::Major, Tier::Weak], &[0.5, 0.1]);
        let mut counters = FocusCounters::default();

        let chain = resolve_chain(
            &library,
            library.get("conquest").unwrap(),
            &scenario.countries[0],
            Some(&scenario.countries[1]),
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        )
        .unwrap();

        assert_eq!(chain.target, Some(CountryId(1)));
        assert_eq!(chain.foci[0].dest_tag.as_deref(), Some("C01"));
        assert_eq!(chain.foci[0].rewards, vec!["add_claim = C01".to_string()]);
    }

    #[test]
    fn test_directed_chain_needs_a_target() {
        let library = FocusLibrary::from_toml_str(LIBRARY).unwrap();
        let scenario = scenario(&[Tier::Major], &[0.5]);
        let mut counters = FocusCounters::default();

        assert!(resolve_chain(
            &library,
            library.get("conquest").unwrap(),
            &scenario.countries[0],
            None,
            &scenario.regions,
            &LevelTargets::new(),
            &mut counters,
        )
        .is_none());
    }

    #[test]
    fn test_country_goals_respect_max_instances_and_uniqueness() {
        let library = FocusLibrary::from_toml_str(LIBRARY).unwrap();
        let mut scenario = scenario(
            &[Tier::Weak, Tier::Major, Tier::Weak],
            &[0.1, 0.6, 0.2],
        );

        evaluate_country_goals(&mut scenario, &library);

        let middle = &scenario.countries[1];
        let targets: Vec<Option<CountryId>> = middle
            .focus_chains
            .iter()
            .filter(|c| c.template_name == "conquest")
            .map(|c| c.target)
            .collect();
        assert_eq!(targets, vec![Some(CountryId(0)), Some(CountryId(2))]);
        assert!(middle.focus_chains.iter().any(|c| c.template_name == "reform"));

        // Step ids are unique across the whole country
        let mut ids: Vec<StepId> = middle.focus_chains.iter().flat_map(|c| c.step_ids()).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);

        // Country 0 only borders the major and is weaker, so no conquest
        assert!(scenario.countries[0].focus_chains.is_empty());
        // Country 2 borders the major only, and is stronger than nobody
        assert!(scenario.countries[2].focus_chains.is_empty());
    }

    #[test]
    fn test_unknown_relation_target_skips_chain() {
        let library = FocusLibrary::from_toml_str(
            r#"
            [[chain]]
            name = "grudge"
            target = true
            target_requirements = [{ kind = "relation", relation = "rival" }]

            [[chain.step]]
            focus_type = "attack"
            "#,
        )
        .unwrap();
        let mut scenario = scenario(&[Tier::Weak, Tier::Weak], &[0.1, 0.2]);
        scenario.countries[0]
            .posture
            .add_relation(RelationKind::Rival, CountryId(1));
        scenario.countries[1]
            .posture
            .add_relation(RelationKind::Rival, CountryId(99));

        evaluate_country_goals(&mut scenario, &library);

        assert_eq!(scenario.countries[0].focus_chains.len(), 1);
        assert!(scenario.countries[1].focus_chains.is_empty());
    }
}
