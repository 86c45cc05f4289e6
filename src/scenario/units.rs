//! Division templates and the TOML library that holds them.
//!
//! Each `[[template]]` names a division type, the country requirements it
//! needs (the same typed predicates focus chains use) and a weight that sets
//! its share of the army.

use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScenarioError};
use crate::focus::requirement::{step_fulfills_requirements, Requirement};
use crate::scenario::country::Country;

/// Library compiled into the binary
pub const DEFAULT_UNITS: &str = include_str!("../../data/units/templates.toml");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitLibrary {
    #[serde(default, rename = "template")]
    pub templates: Vec<UnitTemplate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitTemplate {
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    /// Relative share of divisions among a country's available templates
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl UnitLibrary {
    /// Parse and validate a library document.
    ///
    /// At least one template must be free of requirements so every country
    /// can field an army.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let library: UnitLibrary = toml::from_str(content)?;

        {
            let mut names = AHashSet::new();
            for template in &library.templates {
                let invalid = |reason: &str| ScenarioError::InvalidUnit {
                    name: template.name.clone(),
                    reason: reason.to_string(),
                };
                if template.name.trim().is_empty() {
                    return Err(invalid("unit template name is empty"));
                }
                if template.weight == 0 {
                    return Err(invalid("weight must be at least 1"));
                }
                if !names.insert(template.name.as_str()) {
                    return Err(invalid("duplicate unit template name"));
                }
            }
        }
        if !library.templates.iter().any(|t| t.requirements.is_empty()) {
            return Err(ScenarioError::Config(
                "unit library needs a template without requirements".into(),
            ));
        }

        tracing::info!("Loaded {} unit templates", library.templates.len());
        Ok(library)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_UNITS)
    }

    /// Templates whose requirements `country` meets, in library order
    pub fn available_for<'a>(&'a self, country: &Country) -> Vec<&'a UnitTemplate> {
        self.templates
            .iter()
            .filter(|t| step_fulfills_requirements(&t.requirements, country))
            .collect()
    }
}
