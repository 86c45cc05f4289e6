//! Focus chain templates and the TOML library that holds them.
//!
//! A library file carries three text tables (`rewards`, `available`,
//! `bypasses`) keyed by short names, and a list of `[[chain]]` tables each
//! holding ordered `[[chain.step]]` tables. Step links are relative offsets
//! into the same chain:
//!
//! - `after`: direct predecessors, always earlier in the chain
//! - `and`: co-requisites completed together with this step
//! - `xor`: mutually exclusive alternatives
//!
//! Everything is checked at load time; a library that loads is safe to
//! instantiate.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScenarioError};
use crate::focus::requirement::{Requirement, TargetRequirement};
use crate::focus::{FocusType, Position};

/// Library compiled into the binary
pub const DEFAULT_LIBRARY: &str = include_str!("../../data/focus/chains.toml");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FocusLibrary {
    #[serde(default)]
    pub rewards: BTreeMap<String, String>,
    #[serde(default)]
    pub available: BTreeMap<String, String>,
    #[serde(default)]
    pub bypasses: BTreeMap<String, String>,
    #[serde(default, rename = "chain")]
    pub chains: Vec<FocusChainTemplate>,

    #[serde(skip)]
    by_name: AHashMap<String, usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FocusChainTemplate {
    pub name: String,
    /// Instantiated once per accepted target country
    #[serde(default)]
    pub target: bool,
    /// Cap on accepted targets for target-directed chains
    #[serde(default = "default_max_instances")]
    pub max_instances: usize,
    /// Row band of the tree; targets are unique per level
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub target_requirements: Vec<TargetRequirement>,
    #[serde(rename = "step")]
    pub steps: Vec<FocusStepTemplate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FocusStepTemplate {
    pub focus_type: FocusType,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub rewards: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub bypasses: Vec<String>,
    #[serde(default)]
    pub after: Vec<i32>,
    #[serde(default, rename = "and")]
    pub and_with: Vec<i32>,
    #[serde(default)]
    pub xor: Vec<i32>,
}

fn default_max_instances() -> usize {
    1
}

impl FocusStepTemplate {
    /// Absolute index of a relative link, if it stays inside the chain
    pub fn link_target(index: usize, offset: i32, len: usize) -> Option<usize> {
        let target = index as i64 + offset as i64;
        if offset != 0 && (0..len as i64).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }
}

impl FocusChainTemplate {
    /// Columns covered by the chain's steps
    pub fn width(&self) -> i32 {
        let min = self.steps.iter().map(|s| s.position.x).min().unwrap_or(0);
        let max = self.steps.iter().map(|s| s.position.x).max().unwrap_or(0);
        max - min + 1
    }

    fn invalid(&self, reason: String) -> ScenarioError {
        ScenarioError::InvalidTemplate {
            chain: self.name.clone(),
            reason,
        }
    }

    fn validate(&self, library: &FocusLibrary) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("chain name is empty".into()));
        }
        if self.steps.is_empty() {
            return Err(self.invalid("chain has no steps".into()));
        }
        if self.max_instances == 0 {
            return Err(self.invalid("max_instances must be at least 1".into()));
        }
        if !self.target && !self.target_requirements.is_empty() {
            return Err(self.invalid(
                "target_requirements given on a chain without a target".into(),
            ));
        }

        let len = self.steps.len();
        for (index, step) in self.steps.iter().enumerate() {
            for (kind, offsets) in [
                ("after", &step.after),
                ("and", &step.and_with),
                ("xor", &step.xor),
            ] {
                for &offset in offsets {
                    if FocusStepTemplate::link_target(index, offset, len).is_none() {
                        return Err(self.invalid(format!(
                            "step {} has {} offset {} outside the chain",
                            index, kind, offset
                        )));
                    }
                    if kind == "after" && offset > 0 {
                        return Err(self.invalid(format!(
                            "step {} follows a later step (offset {})",
                            index, offset
                        )));
                    }
                }
            }

            for (kind, keys, table) in [
                ("reward", &step.rewards, &library.rewards),
                ("available", &step.available, &library.available),
                ("bypass", &step.bypasses, &library.bypasses),
            ] {
                if let Some(key) = keys.iter().find(|k| !table.contains_key(*k)) {
                    return Err(self.invalid(format!(
                        "step {} uses unknown {} key '{}'",
                        index, kind, key
                    )));
                }
            }
        }

        Ok(())
    }
}

impl FocusLibrary {
    /// Parse and validate a library document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut library: FocusLibrary = toml::from_str(content)?;

        for (i, chain) in library.chains.iter().enumerate() {
            chain.validate(&library)?;
            if library.by_name.insert(chain.name.clone(), i).is_some() {
                return Err(chain.invalid("duplicate chain name".into()));
            }
        }

        tracing::info!("Loaded {} focus chains", library.chains.len());
        Ok(library)
    }

    /// Load a library from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The library shipped with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_LIBRARY)
    }

    pub fn get(&self, name: &str) -> Option<&FocusChainTemplate> {
        self.by_name.get(name).map(|&i| &self.chains[i])
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
