//! Scenario pipeline - runs every generation phase in order

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::ScenarioConfig;
use crate::core::error::Result;
use crate::focus::template::FocusLibrary;
use crate::focus::tree::build_focus_tree;
use crate::focus::evaluate_country_goals;
use crate::scenario::output::ScenarioOutput;
use crate::scenario::region::Region;
use crate::scenario::strategic::build_strategic_regions;
use crate::scenario::systems;
use crate::scenario::units::UnitLibrary;
use crate::scenario::world::Scenario;

/// Generate the stand-in map and build a full scenario on it
pub fn generate_scenario(
    config: &ScenarioConfig,
    library: &FocusLibrary,
    units: &UnitLibrary,
) -> Result<ScenarioOutput> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let regions = systems::generate_map(&config.map, config.seed, &mut rng);

    build_scenario(regions, rng, config, library, units)
}

/// Build a scenario on an existing region graph.
///
/// `regions[i].id` must equal `i`. All random draws come from `rng`.
pub fn build_scenario(
    regions: Vec<Region>,
    rng: ChaCha8Rng,
    config: &ScenarioConfig,
    library: &FocusLibrary,
    units: &UnitLibrary,
) -> Result<ScenarioOutput> {
    let start = Instant::now();
    let mut scenario = Scenario::new(regions, rng);

    // 1. Region economy and world totals
    systems::derive_region_stats(&mut scenario.regions, &config.economy, config.seed);
    scenario.world_totals = systems::aggregate_world(&scenario.regions);

    // 2. Countries and territory
    systems::generate_countries(&mut scenario, &config.countries)?;

    // 3. Country totals
    systems::aggregate_countries(&mut scenario.countries, &scenario.regions);

    // 4. Strategic regions and weather
    scenario.strategic_regions =
        build_strategic_regions(&mut scenario.regions, &config.strategic, &mut scenario.rng);

    // 5. Strength and tiers
    let ranking = systems::evaluate_countries(&mut scenario, config);

    // 6. Diplomatic posture
    systems::evaluate_postures(&mut scenario, &config.diplomacy);

    // 7. Governments, doctrines and divisions
    systems::generate_politics(&mut scenario, &config.politics);
    systems::generate_military(&mut scenario, units, &config.military)?;

    // 8. Focus chains and trees
    evaluate_country_goals(&mut scenario, library);
    let focus_trees = scenario.countries.iter().map(build_focus_tree).collect();

    let output = ScenarioOutput::new(scenario, config.seed, ranking, focus_trees, start.elapsed());
    tracing::info!("{}", output.summary());
    Ok(output)
}
