//! National focus synthesis
//!
//! Chain templates are loaded once into a [`FocusLibrary`]. The resolver
//! instantiates accepted chains per country as [`ChainInstance`]s, and the
//! tree assembler merges them into a render-ready [`tree::FocusTree`].

pub mod requirement;
pub mod resolver;
pub mod template;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::core::types::{ChainId, CountryId, StepId};

pub use requirement::{Requirement, TargetRequirement};
pub use resolver::{evaluate_country_goals, resolve_chain, FocusCounters, LevelTargets};
pub use template::{FocusChainTemplate, FocusLibrary, FocusStepTemplate};
pub use tree::{build_focus_tree, FocusNode, FocusTree};

/// Rendering template of a focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusType {
    Attack,
    Defense,
    Ally,
    Economy,
    Army,
    Navy,
    Politics,
}

/// Grid position in the focus tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One instantiated focus step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NationalFocus {
    pub step_id: StepId,
    pub chain_id: ChainId,
    /// Index of the step inside its chain template
    pub step_index: usize,
    pub focus_type: FocusType,
    pub chain_name: String,
    pub source_tag: String,
    pub dest_tag: Option<String>,
    pub position: Position,

    /// Direct predecessors
    pub preceding: Vec<StepId>,
    /// Steps that must be completed together with this one when it is a prerequisite
    pub and_foci: Vec<StepId>,
    pub xor_foci: Vec<StepId>,

    pub available: Vec<String>,
    pub bypasses: Vec<String>,
    pub rewards: Vec<String>,
}

/// One accepted chain for one country
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainInstance {
    pub chain_id: ChainId,
    pub template_name: String,
    pub level: usize,
    pub target: Option<CountryId>,
    pub foci: Vec<NationalFocus>,
}

impl ChainInstance {
    pub fn step_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        self.foci.iter().map(|f| f.step_id)
    }
}
