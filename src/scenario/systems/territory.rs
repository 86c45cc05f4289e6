//! Territory assignment - bounded random flood fill from a start region

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, ScenarioError};
use crate::scenario::country::Country;
use crate::scenario::region::Region;

/// Outer growth passes before a stalled country gives up
pub const MAX_GROWTH_PASSES: u32 = 100;

/// Grow `country` from `start_region` until it owns `max_regions` regions
/// or growth stalls.
///
/// Each pass walks the owned list in insertion order (regions claimed during
/// the pass are walked too). Every visited region picks one neighbour at
/// random and claims it if it is unowned land. The start region must be
/// unowned land and `max_regions` at least 1. Returns the number of regions
/// owned afterwards.
pub fn assign_regions(
    max_regions: usize,
    regions: &mut [Region],
    start_region: u32,
    country: &mut Country,
    rng: &mut ChaCha8Rng,
) -> Result<usize> {
    if max_regions == 0 {
        return Err(ScenarioError::Config(
            "max_regions must be at least 1".into(),
        ));
    }
    let start = regions
        .get(start_region as usize)
        .ok_or(ScenarioError::UnknownRegion(start_region))?;
    if start.sea {
        return Err(ScenarioError::SeaRegion(start_region));
    }
    if start.assigned {
        return Err(ScenarioError::RegionTaken(start_region));
    }
    add_region(regions, start_region, country);

    let mut passes = 0;
    while country.regions.len() < max_regions && passes < MAX_GROWTH_PASSES {
        passes += 1;

        let mut i = 0;
        while i < country.regions.len() {
            if country.regions.len() >= max_regions {
                break;
            }
            let current = &regions[country.regions[i] as usize];
            i += 1;

            let Some(&next) = current.neighbors.choose(rng) else {
                continue;
            };
            let claimable = regions
                .get(next as usize)
                .is_some_and(|r| !r.assigned && !r.sea);
            if claimable {
                add_region(regions, next, country);
            }
        }
    }

    if country.regions.len() < max_regions {
        tracing::info!(
            "{} stalled at {}/{} regions after {} passes",
            country.tag,
            country.regions.len(),
            max_regions,
            passes
        );
    }

    Ok(country.regions.len())
}

fn add_region(regions: &mut [Region], region_id: u32, country: &mut Country) {
    regions[region_id as usize].set_owner(country.id);
    country.regions.push(region_id);
}
