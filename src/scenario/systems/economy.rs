//! Economic aggregation - region statistics and their country/world totals

use crate::core::config::EconomyConfig;
use crate::core::types::Resource;
use crate::scenario::country::{Country, CountryStats};
use crate::scenario::region::{Industry, Region, ResourceStock};
use crate::scenario::world::WorldTotals;

/// People per map unit of fully habitable land
const PEOPLE_PER_AREA: f64 = 10_000.0;
/// Factories per million inhabitants at development 1.0
const FACTORIES_PER_MILLION: f64 = 4.0;
/// Resource units of a deposit on an average-sized region
const RESOURCE_YIELD: f64 = 40.0;
/// Highest state category index
pub const MAX_STATE_CATEGORY: u8 = 11;

const MILITARY_SHARE: f64 = 0.35;
const NAVAL_SHARE: f64 = 0.15;

/// Derive development, population, industry, resources and state category
/// for every land region. Sea regions are zeroed.
///
/// Deterministic: the per-region variation comes from a hash of the region
/// id and `seed`, not from the shared random stream.
pub fn derive_region_stats(regions: &mut [Region], config: &EconomyConfig, seed: u64) {
    let (land_count, land_area) = regions
        .iter()
        .filter(|r| !r.sea)
        .fold((0usize, 0.0f64), |(n, a), r| (n + 1, a + clamped_area(r)));
    let mean_area = if land_count > 0 {
        land_area / land_count as f64
    } else {
        0.0
    };

    for region in regions.iter_mut() {
        if region.sea {
            region.development = 0.0;
            region.population = 0;
            region.industry = Industry::default();
            region.resources = ResourceStock::default();
            region.state_category = 0;
            continue;
        }

        let area = clamped_area(region);
        let habitability = Region::habitability(region.terrain);
        let coastal_bonus = if region.coastal { 0.15 } else { 0.0 };
        let variation = region_noise(region.id, 0, seed);

        region.development = ((0.55 * habitability + coastal_bonus + 0.3 * variation)
            * config.development_factor)
            .clamp(0.0, 1.0);

        region.population = (area
            * PEOPLE_PER_AREA
            * habitability
            * (0.5 + region.development)
            * config.world_population_factor)
            .round() as u64;

        region.industry = derive_industry(region.population, region.development, region.coastal, config);

        let area_share = if mean_area > 0.0 { area / mean_area } else { 0.0 };
        let mut resources = ResourceStock::default();
        for (i, resource) in Resource::ALL.iter().enumerate() {
            let affinity = Region::resource_affinity(region.terrain, *resource);
            let roll = region_noise(region.id, 1 + i as u32, seed);
            if roll < affinity {
                let richness = 1.0 - roll / affinity;
                let amount =
                    RESOURCE_YIELD * area_share * config.resource_factor * (0.5 + richness);
                resources.set(*resource, amount.round() as u32);
            }
        }
        region.resources = resources;

        region.state_category = state_category(region.development, region.population);
    }
}

fn derive_industry(population: u64, development: f64, coastal: bool, config: &EconomyConfig) -> Industry {
    let capacity = (population as f64 / 1_000_000.0)
        * development
        * FACTORIES_PER_MILLION
        * config.industry_factor;
    let total = capacity.round() as u32;
    let military = ((total as f64 * MILITARY_SHARE).round() as u32).min(total);
    let naval = if coastal {
        ((total as f64 * NAVAL_SHARE).round() as u32).min(total - military)
    } else {
        0
    };

    Industry {
        civilian: total - military - naval,
        military,
        naval,
    }
}

/// State category from development and population, 0..=MAX_STATE_CATEGORY
pub fn state_category(development: f64, population: u64) -> u8 {
    let millions = (population as f64 / 1_000_000.0).min(5.0);
    let raw = (development * 6.0 + millions).round();
    raw.clamp(0.0, MAX_STATE_CATEGORY as f64) as u8
}

/// Sum every land region into world totals
pub fn aggregate_world(regions: &[Region]) -> WorldTotals {
    let mut totals = WorldTotals::default();
    for region in regions.iter().filter(|r| !r.sea) {
        totals.population = totals.population.saturating_add(region.population);
        totals.industry.add(&region.industry);
        totals.resources.add(&region.resources);
        totals.land_regions += 1;
        totals.area += clamped_area(region);
    }
    totals
}

/// Recompute every country's statistics from its owned regions
pub fn aggregate_countries(countries: &mut [Country], regions: &[Region]) {
    for country in countries.iter_mut() {
        country.stats = stats_for(regions, &country.regions);
    }
}

/// Statistics of a set of regions; unknown ids are ignored
pub fn stats_for(regions: &[Region], region_ids: &[u32]) -> CountryStats {
    let owned: Vec<&Region> = region_ids
        .iter()
        .filter_map(|&id| regions.get(id as usize))
        .collect();

    let mut stats = CountryStats {
        region_count: owned.len(),
        ..CountryStats::default()
    };
    if owned.is_empty() {
        return stats;
    }

    for region in &owned {
        stats.population = stats.population.saturating_add(region.population);
        stats.industry.add(&region.industry);
        stats.resources.add(&region.resources);
        stats.area += clamped_area(region);
        if region.coastal {
            stats.coastal_regions += 1;
        }
    }

    let n = owned.len() as f64;
    stats.mean_development = owned.iter().map(|r| r.development).sum::<f64>() / n;
    stats.development_variance = owned
        .iter()
        .map(|r| (r.development - stats.mean_development).powi(2))
        .sum::<f64>()
        / n;

    stats
}

fn clamped_area(region: &Region) -> f64 {
    let area = region.area as f64;
    if area.is_finite() && area > 0.0 {
        area
    } else {
        0.0
    }
}

/// Deterministic pseudo-random value in [0, 1) for a region and channel
pub fn region_noise(region_id: u32, channel: u32, seed: u64) -> f64 {
    let mut z = seed
        ^ ((region_id as u64) << 32)
        ^ (channel as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}
