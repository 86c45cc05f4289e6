//! Scenario configuration with documented constants
//!
//! Every tunable number of the pipeline lives here. All keys are optional
//! when loading from TOML; missing keys take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScenarioError};

/// Upper bound for every economy multiplier
pub const MAX_ECONOMY_FACTOR: f64 = 1000.0;

/// Top-level configuration for one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Seed of the single random stream shared by every component
    pub seed: u64,
    pub map: MapConfig,
    pub countries: CountryConfig,
    pub economy: EconomyConfig,
    pub tiers: TierConfig,
    pub strength: StrengthWeights,
    pub diplomacy: DiplomacyConfig,
    pub politics: PoliticsConfig,
    pub military: MilitaryConfig,
    pub strategic: StrategicConfig,
}

/// Stand-in world generator settings (hex grid of regions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// Chance that an edge region becomes sea
    pub water_frequency: f32,
    pub mountain_frequency: f32,
    pub forest_frequency: f32,
    /// Provinces generated inside every region
    pub provinces_per_region: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryConfig {
    /// Number of countries to bootstrap
    pub count: u32,
    /// Region-growth cap for territory assignment
    pub max_regions: usize,
}

/// Multipliers applied by economic aggregation
///
/// A factor of 1.0 reproduces the baseline economy. Factors scale linearly:
/// `industry_factor = 2.0` doubles every region's factory count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub world_population_factor: f64,
    pub industry_factor: f64,
    pub resource_factor: f64,
    /// Scales region development before it is clamped to 0..=1
    pub development_factor: f64,
}

/// Sizes of the positional tier bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// The first `major_count` countries by descending score are majors
    pub major_count: usize,
    /// The next `regional_count` countries are regional powers
    pub regional_count: usize,
}

/// Weights of the normalized shares in the strength score
///
/// Defaults favour industry, since factories convert directly into
/// military output, then manpower, then raw resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthWeights {
    pub industry: f64,
    pub population: f64,
    pub resources: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiplomacyConfig {
    /// Minimum owned regions before a country can be flagged for civil war
    pub civil_war_min_regions: usize,
    /// Development variance below which a large country is flagged
    pub civil_war_variance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoliticsConfig {
    /// Popularity weight added to the ideologies a country's posture favours.
    /// Base weights are drawn from 1..=100.
    pub stance_bias: u32,
}

/// Army size and composition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MilitaryConfig {
    /// Inhabitants backing one division
    pub people_per_division: u64,
    /// Cap on a country's total divisions
    pub max_divisions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicConfig {
    /// Maximum regions grouped into one strategic region
    pub max_regions: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            map: MapConfig::default(),
            countries: CountryConfig::default(),
            economy: EconomyConfig::default(),
            tiers: TierConfig::default(),
            strength: StrengthWeights::default(),
            diplomacy: DiplomacyConfig::default(),
            politics: PoliticsConfig::default(),
            military: MilitaryConfig::default(),
            strategic: StrategicConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 16,
            water_frequency: 0.6,
            mountain_frequency: 0.2,
            forest_frequency: 0.3,
            provinces_per_region: 3,
        }
    }
}

impl Default for CountryConfig {
    fn default() -> Self {
        Self {
            count: 20,
            max_regions: 14,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            world_population_factor: 1.0,
            industry_factor: 1.0,
            resource_factor: 1.0,
            development_factor: 1.0,
        }
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            major_count: 7,
            regional_count: 10,
        }
    }
}

impl Default for StrengthWeights {
    fn default() -> Self {
        Self {
            industry: 0.5,
            population: 0.3,
            resources: 0.2,
        }
    }
}

impl Default for DiplomacyConfig {
    fn default() -> Self {
        Self {
            civil_war_min_regions: 10,
            civil_war_variance: 0.01,
        }
    }
}

impl Default for PoliticsConfig {
    fn default() -> Self {
        Self { stance_bias: 60 }
    }
}

impl Default for MilitaryConfig {
    fn default() -> Self {
        Self {
            people_per_division: 500_000,
            max_divisions: 48,
        }
    }
}

impl Default for StrategicConfig {
    fn default() -> Self {
        Self { max_regions: 6 }
    }
}

impl ScenarioConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| ScenarioError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ScenarioError::Config(format!(
                "map must have a positive size, got {}x{}",
                self.map.width, self.map.height
            )));
        }

        for (name, chance) in [
            ("water_frequency", self.map.water_frequency),
            ("mountain_frequency", self.map.mountain_frequency),
            ("forest_frequency", self.map.forest_frequency),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ScenarioError::Config(format!(
                    "map.{} must be within 0..=1, got {}",
                    name, chance
                )));
            }
        }

        if self.countries.max_regions == 0 {
            return Err(ScenarioError::Config(
                "countries.max_regions must be at least 1".into(),
            ));
        }

        for (name, factor) in [
            ("world_population_factor", self.economy.world_population_factor),
            ("industry_factor", self.economy.industry_factor),
            ("resource_factor", self.economy.resource_factor),
            ("development_factor", self.economy.development_factor),
        ] {
            if !factor.is_finite() || !(0.0..=MAX_ECONOMY_FACTOR).contains(&factor) {
                return Err(ScenarioError::Config(format!(
                    "economy.{} must be within 0..={}, got {}",
                    name, MAX_ECONOMY_FACTOR, factor
                )));
            }
        }

        let weights = &self.strength;
        if [weights.industry, weights.population, weights.resources]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ScenarioError::Config(
                "strength weights must be non-negative".into(),
            ));
        }
        if weights.industry + weights.population + weights.resources <= 0.0 {
            return Err(ScenarioError::Config(
                "at least one strength weight must be positive".into(),
            ));
        }

        if self.military.people_per_division == 0 || self.military.max_divisions == 0 {
            return Err(ScenarioError::Config(
                "military.people_per_division and military.max_divisions must be positive".into(),
            ));
        }

        if self.strategic.max_regions == 0 {
            return Err(ScenarioError::Config(
                "strategic.max_regions must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
