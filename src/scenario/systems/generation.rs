//! Stand-in world and country generation

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{CountryConfig, MapConfig};
use crate::core::error::{Result, ScenarioError};
use crate::scenario::country::Country;
use crate::scenario::region::{Province, Region, Terrain};
use crate::scenario::systems::economy::region_noise;
use crate::scenario::systems::territory::assign_regions;
use crate::scenario::world::Scenario;

/// Cultures handed out to bootstrapped countries
pub const CULTURES: [&str; 4] = ["nordic", "latin", "steppe", "insular"];

/// Noise channels for terrain, kept clear of the economy channels
const ELEVATION_CHANNEL: u32 = 100;
const MOISTURE_CHANNEL: u32 = 101;

/// Odd-r offset hex neighbours, by row parity
const EVEN_ROW: [(i32, i32); 6] = [(-1, 0), (1, 0), (-1, -1), (0, -1), (-1, 1), (0, 1)];
const ODD_ROW: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (1, -1), (0, 1), (1, 1)];

/// Generate the hex-grid region graph
pub fn generate_map(config: &MapConfig, seed: u64, rng: &mut ChaCha8Rng) -> Vec<Region> {
    let mut regions = Vec::with_capacity((config.width * config.height) as usize);

    for id in 0..config.width * config.height {
        let (x, y) = (id % config.width, id / config.width);
        let latitude = latitude_of(y, config.height);
        let terrain = roll_terrain(id, edge_distance(x, y, config), latitude, config, seed, rng);
        let area = rng.gen_range(60.0..140.0);

        let mut region = Region::new(id, terrain, area, hex_neighbors(x, y, config));
        region.latitude = latitude;
        region.provinces = (0..config.provinces_per_region)
            .map(|k| Province {
                id: id * config.provinces_per_region + k,
                owner: None,
            })
            .collect();
        regions.push(region);
    }

    let coastal: Vec<bool> = regions
        .iter()
        .map(|r| !r.sea && r.neighbors.iter().any(|&n| regions[n as usize].sea))
        .collect();
    for (region, coastal) in regions.iter_mut().zip(coastal) {
        region.coastal = coastal;
    }

    let sea = regions.iter().filter(|r| r.sea).count();
    tracing::info!(
        "Generated {} regions ({} land, {} sea)",
        regions.len(),
        regions.len() - sea,
        sea
    );

    regions
}

/// 0.0 on the middle row, 1.0 on the top and bottom rows
fn latitude_of(y: u32, height: u32) -> f32 {
    if height <= 1 {
        return 0.0;
    }
    (y as f32 / (height - 1) as f32 * 2.0 - 1.0).abs()
}

/// Rows or columns between a cell and the nearest map border
fn edge_distance(x: u32, y: u32, config: &MapConfig) -> u32 {
    x.min(config.width - 1 - x)
        .min(y)
        .min(config.height - 1 - y)
}

/// Pick a terrain from hashed elevation and moisture plus one draw from `rng`.
///
/// The two outer rings are sea with probability `water_frequency`.
fn roll_terrain(
    id: u32,
    edge: u32,
    latitude: f32,
    config: &MapConfig,
    seed: u64,
    rng: &mut ChaCha8Rng,
) -> Terrain {
    let roll: f32 = rng.gen();
    if edge <= 1 && roll < config.water_frequency {
        return Terrain::Ocean;
    }

    let elevation = region_noise(id, ELEVATION_CHANNEL, seed) as f32;
    let moisture = region_noise(id, MOISTURE_CHANNEL, seed) as f32;

    match (elevation, moisture) {
        (e, _) if e > 0.75 && roll < config.mountain_frequency => Terrain::Mountain,
        (e, _) if e > 0.55 && roll < config.mountain_frequency * 0.7 => Terrain::Hills,
        (_, m) if m < 0.2 && latitude < 0.3 => Terrain::Desert,
        (e, m) if m > 0.85 && e < 0.3 => Terrain::Marsh,
        (_, m) if m > 0.6 && roll < config.forest_frequency => Terrain::Forest,
        _ if roll > 0.92 => Terrain::River,
        _ => Terrain::Plains,
    }
}

fn hex_neighbors(x: u32, y: u32, config: &MapConfig) -> Vec<u32> {
    let offsets = if y % 2 == 0 { &EVEN_ROW } else { &ODD_ROW };
    offsets
        .iter()
        .filter_map(|&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < config.width && ny < config.height).then_some(ny * config.width + nx)
        })
        .collect()
}

/// Bootstrap the country roster and grow each country's territory.
///
/// Countries are placed one after another on a random unassigned land
/// region. Running out of land ends the roster early; placing no country
/// at all is an error.
pub fn generate_countries(scenario: &mut Scenario, config: &CountryConfig) -> Result<()> {
    let mut used_tags: AHashSet<String> = AHashSet::new();

    for i in 0..config.count {
        let culture = CULTURES[scenario.rng.gen_range(0..CULTURES.len())];
        let name = generate_country_name(culture, &mut scenario.rng);
        let tag = unique_tag(&name, i, &mut used_tags);

        let candidates: Vec<u32> = scenario
            .regions
            .iter()
            .filter(|r| !r.sea && !r.assigned)
            .map(|r| r.id)
            .collect();

        let Some(&start) = candidates.choose(&mut scenario.rng) else {
            if scenario.countries.is_empty() {
                return Err(ScenarioError::NoStartRegion { tag });
            }
            tracing::warn!(
                "No free land left for {}; roster ends at {} countries",
                tag,
                scenario.countries.len()
            );
            break;
        };

        let mut country = Country::new(scenario.next_country_id(), tag, name, start);
        country.culture = culture.to_string();
        country.colour = [
            scenario.rng.gen(),
            scenario.rng.gen(),
            scenario.rng.gen(),
        ];

        let owned = assign_regions(
            config.max_regions,
            &mut scenario.regions,
            start,
            &mut country,
            &mut scenario.rng,
        )?;
        tracing::debug!(
            "{} ({}) starts at region {} with {} regions",
            country.tag,
            country.culture,
            start,
            owned
        );

        scenario.countries.push(country);
    }

    tracing::info!("Placed {} countries", scenario.countries.len());
    Ok(())
}

fn generate_country_name(culture: &str, rng: &mut ChaCha8Rng) -> String {
    let (prefixes, suffixes): (&[&str], &[&str]) = match culture {
        "nordic" => (
            &["Alden", "Bran", "Dorn", "Eld", "Frey", "Grim", "Hal", "Isen", "Kael", "Thor"],
            &["mark", "heim", "dale", "vik", "gard", "holm", "land", "fjord"],
        ),
        "latin" => (
            &["Aur", "Cael", "Val", "Ser", "Lum", "Octav", "Tiber", "Mar", "Corv", "Ver"],
            &["ia", "ana", "essa", "ium", "ona", "ina", "eria", "ento"],
        ),
        "steppe" => (
            &["Kaz", "Tem", "Bor", "Khor", "Zar", "Ulan", "Tar", "Kip", "Bat", "Ord"],
            &["stan", "ak", "ar", "uk", "ai", "gol", "tay", "khan"],
        ),
        _ => (
            &["Aen", "Cel", "Ith", "Lor", "Mel", "Sil", "Thal", "Yen", "Mor", "Bel"],
            &["wen", "dor", "las", "ith", "mor", "ness", "wick", "ay"],
        ),
    };

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let suffix = suffixes[rng.gen_range(0..suffixes.len())];

    format!("{}{}", prefix, suffix)
}

/// Three uppercase letters from the name, altered until unused
fn unique_tag(name: &str, index: u32, used: &mut AHashSet<String>) -> String {
    let base: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase();
    let base = format!("{:X<3}", base);

    let candidates = std::iter::once(base.clone())
        .chain(('A'..='Z').map(|c| format!("{}{}", &base[..2], c)))
        .chain(('A'..='Z').map(|c| format!("{}{}", &base[..1], c)).flat_map(|head| {
            ('A'..='Z').map(move |c| format!("{}{}", head, c))
        }));

    for tag in candidates {
        if used.insert(tag.clone()) {
            return tag;
        }
    }

    let tag = format!("T{:02}", index);
    used.insert(tag.clone());
    tag
}
