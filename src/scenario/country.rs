//! Country - roster entry with territory, statistics, rank and posture

use serde::{Deserialize, Serialize};

use crate::core::types::{CountryId, Doctrine, Ideology, Resource, Stance, Tier};
use crate::focus::ChainInstance;
use crate::scenario::region::{Industry, ResourceStock};

/// A country of the generated scenario
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub tag: String,
    pub name: String,
    pub adjective: String,
    pub culture: String,
    pub colour: [u8; 3],
    /// Flag asset path handed to the renderer
    pub flag: String,

    // Territory (Region.owner is the mirror of this list)
    pub capital: u32,
    pub regions: Vec<u32>,

    pub stats: CountryStats,

    // Rank
    pub strength_score: f64,
    pub relative_score: f64,
    pub tier: Tier,

    pub posture: Posture,
    pub politics: Politics,
    pub military: Military,

    pub focus_chains: Vec<ChainInstance>,
}

/// Totals recomputed from owned regions
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CountryStats {
    pub population: u64,
    pub industry: Industry,
    pub resources: ResourceStock,
    pub area: f64,
    pub region_count: usize,
    pub coastal_regions: usize,
    pub mean_development: f64,
    pub development_variance: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Posture {
    pub stance: Stance,
    pub relations: Vec<Relation>,
    pub civil_war_risk: bool,
}

/// Government and party popularity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Politics {
    pub ruling_party: Ideology,
    /// Popularity in percent, indexed by `Ideology::index`; sums to 100
    pub parties: [u32; 4],
    pub allow_elections: bool,
}

/// Adopted doctrines and the divisions fielded per unit template
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Military {
    pub doctrines: Vec<Doctrine>,
    pub divisions: Vec<Division>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub template: String,
    pub count: u32,
    /// Province the divisions deploy to, when the capital has provinces
    pub location: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: CountryId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Same culture, adjacent and not stronger: candidate for unification
    Unification,
    /// Points at the country itself
    CivilWar,
    /// Adjacent country of a higher tier
    Rival,
    /// Adjacent country of a lower tier
    ExpansionTarget,
}

impl Default for Posture {
    fn default() -> Self {
        Self {
            stance: Stance::Isolationist,
            relations: Vec::new(),
            civil_war_risk: false,
        }
    }
}

impl Default for Politics {
    fn default() -> Self {
        Self {
            ruling_party: Ideology::Neutrality,
            parties: [0, 0, 0, 100],
            allow_elections: false,
        }
    }
}

impl Politics {
    pub fn popularity(&self, ideology: Ideology) -> u32 {
        self.parties[ideology.index()]
    }
}

impl Military {
    pub fn has_doctrine(&self, doctrine: Doctrine) -> bool {
        self.doctrines.contains(&doctrine)
    }

    pub fn total_divisions(&self) -> u32 {
        self.divisions.iter().map(|d| d.count).sum()
    }
}

impl Posture {
    pub fn has_relation(&self, kind: RelationKind, target: CountryId) -> bool {
        self.relations
            .iter()
            .any(|r| r.kind == kind && r.target == target)
    }

    pub fn targets(&self, kind: RelationKind) -> impl Iterator<Item = CountryId> + '_ {
        self.relations
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.target)
    }

    /// Add a relation unless the same one is already present
    pub fn add_relation(&mut self, kind: RelationKind, target: CountryId) {
        if !self.has_relation(kind, target) {
            self.relations.push(Relation { kind, target });
        }
    }
}

impl Country {
    pub fn new(id: CountryId, tag: String, name: String, capital: u32) -> Self {
        let adjective = format!("{}ian", name.trim_end_matches(|c| "aeiou".contains(c)));
        Self {
            id,
            flag: format!("gfx/flags/{}.tga", tag),
            tag,
            name,
            adjective,
            culture: String::new(),
            colour: [128, 128, 128],
            capital,
            regions: Vec::new(),
            stats: CountryStats::default(),
            strength_score: 0.0,
            relative_score: 0.0,
            tier: Tier::Weak,
            posture: Posture::default(),
            politics: Politics::default(),
            military: Military::default(),
            focus_chains: Vec::new(),
        }
    }

    pub fn owns(&self, region_id: u32) -> bool {
        self.regions.contains(&region_id)
    }

    pub fn resource(&self, resource: Resource) -> u32 {
        self.stats.resources.get(resource)
    }

    /// Total number of instantiated focus steps across all chains
    pub fn focus_count(&self) -> usize {
        self.focus_chains.iter().map(|c| c.foci.len()).sum()
    }
}
