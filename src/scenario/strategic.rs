//! Strategic regions - clusters of adjacent regions sharing simulated weather

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::StrategicConfig;
use crate::scenario::region::{Region, Terrain};

/// Days in each month of the weather calendar
pub const DAYS_IN_MONTH: [u8; 12] = [30, 27, 30, 29, 30, 29, 30, 30, 29, 30, 29, 30];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategicRegion {
    pub id: u32,
    pub name: String,
    /// Member regions in discovery order; all land or all sea
    pub regions: Vec<u32>,
    pub sea: bool,
    pub weather: Vec<WeatherMonth>,
}

/// Climate of one month; chances are probabilities per day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherMonth {
    pub month: u8,
    pub days: u8,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub rain_light: f32,
    pub rain_heavy: f32,
    pub mud: f32,
    pub blizzard: f32,
    pub sandstorm: f32,
    pub snow: f32,
    pub no_phenomenon: f32,
}

/// Group adjacent regions of the same kind (land or sea) into strategic
/// regions of at most `max_regions` members, then simulate their weather.
///
/// Grouping is a breadth-first walk seeded in region id order and does not
/// touch the random stream; weather does.
pub fn build_strategic_regions(
    regions: &mut [Region],
    config: &StrategicConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<StrategicRegion> {
    let mut strategic: Vec<StrategicRegion> = Vec::new();

    for seed in 0..regions.len() {
        if regions[seed].strategic_region.is_some() {
            continue;
        }

        let id = strategic.len() as u32;
        let sea = regions[seed].sea;
        let mut members = Vec::new();
        let mut queue = VecDeque::from([seed as u32]);
        regions[seed].strategic_region = Some(id);

        while let Some(current) = queue.pop_front() {
            members.push(current);
            if members.len() + queue.len() >= config.max_regions {
                continue;
            }
            let neighbors = regions[current as usize].neighbors.clone();
            for n in neighbors {
                if members.len() + queue.len() >= config.max_regions {
                    break;
                }
                let Some(next) = regions.get_mut(n as usize) else {
                    continue;
                };
                if next.sea == sea && next.strategic_region.is_none() {
                    next.strategic_region = Some(id);
                    queue.push_back(n);
                }
            }
        }

        let weather = simulate_weather(regions, &members, sea, rng);
        strategic.push(StrategicRegion {
            id,
            name: format!("{}_{}", if sea { "Sea" } else { "Land" }, id),
            regions: members,
            sea,
            weather,
        });
    }

    tracing::info!(
        "Grouped {} regions into {} strategic regions",
        regions.len(),
        strategic.len()
    );

    strategic
}

/// Twelve months of weather from the members' mean latitude and terrain
pub fn simulate_weather(
    regions: &[Region],
    members: &[u32],
    sea: bool,
    rng: &mut ChaCha8Rng,
) -> Vec<WeatherMonth> {
    let count = members.len().max(1) as f32;
    let latitude = members
        .iter()
        .map(|&id| regions[id as usize].latitude)
        .sum::<f32>()
        / count;
    let desert_share = members
        .iter()
        .filter(|&&id| regions[id as usize].terrain == Terrain::Desert)
        .count() as f32
        / count;

    let mean_temperature = 28.0 - 40.0 * latitude;
    let amplitude = 4.0 + 14.0 * latitude;
    let humidity: f32 = if sea { 0.25 } else { 0.15 };

    (0..12u8)
        .map(|month| {
            let phase = (month as f32 - 6.0) / 12.0 * std::f32::consts::TAU;
            let temperature = mean_temperature + amplitude * phase.cos();
            let spread = 4.0 + rng.gen_range(0.0..3.0);

            let rain_light = (humidity + rng.gen_range(0.0..0.1)).min(1.0);
            let rain_heavy = rain_light * 0.3;
            let snow = if temperature < 2.0 {
                ((2.0 - temperature) / 20.0).min(0.5)
            } else {
                0.0
            };
            let blizzard = snow * 0.25;
            let mud = if (0.0..10.0).contains(&temperature) && !sea {
                rain_light * 0.5
            } else {
                0.0
            };
            let sandstorm = if temperature > 20.0 {
                desert_share * 0.2
            } else {
                0.0
            };

            let phenomena = rain_light + rain_heavy + snow + blizzard + mud + sandstorm;
            WeatherMonth {
                month,
                days: DAYS_IN_MONTH[month as usize],
                min_temperature: temperature - spread,
                max_temperature: temperature + spread,
                rain_light,
                rain_heavy,
                mud,
                blizzard,
                sandstorm,
                snow,
                no_phenomenon: (1.0 - phenomena).max(0.0),
            }
        })
        .collect()
}
