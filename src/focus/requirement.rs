//! Typed requirement predicates for chains, steps and targets

use serde::{Deserialize, Serialize};

use crate::core::types::{Doctrine, Ideology, Resource, Stance, Tier};
use crate::focus::resolver::LevelTargets;
use crate::scenario::country::{Country, RelationKind};
use crate::scenario::region::Region;
use crate::scenario::world::are_adjacent;

/// Condition on the country that would own the focus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    MinTier { tier: Tier },
    MaxTier { tier: Tier },
    Stance { stance: Stance },
    OwnsResource { resource: Resource, amount: u32 },
    MinRegions { count: usize },
    HasCoast,
    CivilWarRisk,
    /// Strength relative to the strongest country, 0.0 to 1.0
    MinStrength { relative: f64 },
    RulingParty { ideology: Ideology },
    Doctrine { doctrine: Doctrine },
}

/// Condition on the country a chain is directed at
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetRequirement {
    Neighbour,
    NotNeighbour,
    MinTier { tier: Tier },
    MaxTier { tier: Tier },
    /// Target has a lower strength score than the source
    Weaker,
    Stronger,
    SameCulture,
    /// Source holds a relation of this kind towards the target
    Relation { relation: RelationKind },
}

impl Requirement {
    pub fn is_met(&self, country: &Country) -> bool {
        match self {
            Requirement::MinTier { tier } => country.tier.at_least(tier),
            Requirement::MaxTier { tier } => tier.at_least(&country.tier),
            Requirement::Stance { stance } => country.posture.stance == *stance,
            Requirement::OwnsResource { resource, amount } => country.resource(*resource) >= *amount,
            Requirement::MinRegions { count } => country.stats.region_count >= *count,
            Requirement::HasCoast => country.stats.coastal_regions > 0,
            Requirement::CivilWarRisk => country.posture.civil_war_risk,
            Requirement::MinStrength { relative } => country.relative_score >= *relative,
            Requirement::RulingParty { ideology } => country.politics.ruling_party == *ideology,
            Requirement::Doctrine { doctrine } => country.military.has_doctrine(*doctrine),
        }
    }
}

impl TargetRequirement {
    pub fn is_met(&self, source: &Country, target: &Country, regions: &[Region]) -> bool {
        match self {
            TargetRequirement::Neighbour => are_adjacent(regions, source.id, target.id),
            TargetRequirement::NotNeighbour => !are_adjacent(regions, source.id, target.id),
            TargetRequirement::MinTier { tier } => target.tier.at_least(tier),
            TargetRequirement::MaxTier { tier } => tier.at_least(&target.tier),
            TargetRequirement::Weaker => target.strength_score < source.strength_score,
            TargetRequirement::Stronger => target.strength_score > source.strength_score,
            TargetRequirement::SameCulture => target.culture == source.culture,
            TargetRequirement::Relation { relation } => {
                source.posture.has_relation(*relation, target.id)
            }
        }
    }
}

/// True if `source` meets every requirement; an empty list always passes
pub fn step_fulfills_requirements(requirements: &[Requirement], source: &Country) -> bool {
    requirements.iter().all(|r| r.is_met(source))
}

/// True if `target` is a valid target for `source` at `level`.
///
/// The source itself and targets already taken on the same level are
/// rejected before any requirement is checked.
pub fn target_fulfills_requirements(
    requirements: &[TargetRequirement],
    source: &Country,
    target: &Country,
    regions: &[Region],
    level_targets: &LevelTargets,
    level: usize,
) -> bool {
    if target.id == source.id {
        return false;
    }
    if level_targets
        .get(&level)
        .is_some_and(|taken| taken.contains(&target.id))
    {
        return false;
    }
    requirements
        .iter()
        .all(|r| r.is_met(source, target, regions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CountryId;
    use crate::scenario::region::Terrain;

    fn country(id: u32, tier: Tier, culture: &str) -> Country {
        let mut country = Country::new(CountryId(id), format!("T{:02}", id), "Name".into(), id);
        country.tier = tier;
        country.culture = culture.to_string();
        country.regions = vec![id];
        country.stats.region_count = 1;
        country
    }

    /// Regions 0-1-2 in a line, region i owned by country i
    fn regions() -> Vec<Region> {
        let mut regions = vec![
            Region::new(0, Terrain::Plains, 10.0, vec![1]),
            Region::new(1, Terrain::Plains, 10.0, vec![0, 2]),
            Region::new(2, Terrain::Plains, 10.0, vec![1]),
        ];
        for region in &mut regions {
            region.set_owner(CountryId(region.id));
        }
        regions
    }

    #[test]
    fn test_source_requirements() {
        let mut source = country(0, Tier::Regional, "latin");
        source.stats.resources.set(Resource::Steel, 40);
        source.stats.coastal_regions = 1;
        source.relative_score = 0.5;

        assert!(step_fulfills_requirements(&[], &source));
        assert!(step_fulfills_requirements(
            &[
                Requirement::MinTier { tier: Tier::Weak },
                Requirement::MaxTier { tier: Tier::Regional },
                Requirement::OwnsResource {
                    resource: Resource::Steel,
                    amount: 40
                },
                Requirement::HasCoast,
                Requirement::MinStrength { relative: 0.5 },
            ],
            &source
        ));
        assert!(!step_fulfills_requirements(
            &[Requirement::MinTier { tier: Tier::Major }],
            &source
        ));
        assert!(!step_fulfills_requirements(&[Requirement::CivilWarRisk], &source));
        assert!(!step_fulfills_requirements(
            &[Requirement::MinRegions { count: 2 }],
            &source
        ));
        assert!(!step_fulfills_requirements(
            &[Requirement::Stance {
                stance: Stance::Expansionist
            }],
            &source
        ));
    }

    #[test]
    fn test_politics_and_doctrine_requirements() {
        let mut source = country(0, Tier::Weak, "latin");
        source.politics.ruling_party = Ideology::Democratic;
        source.military.doctrines = vec![Doctrine::Infantry, Doctrine::Defensive];

        assert!(step_fulfills_requirements(
            &[
                Requirement::RulingParty {
                    ideology: Ideology::Democratic
                },
                Requirement::Doctrine {
                    doctrine: Doctrine::Defensive
                },
            ],
            &source
        ));
        assert!(!step_fulfills_requirements(
            &[Requirement::Doctrine {
                doctrine: Doctrine::Armored
            }],
            &source
        ));
        assert!(!step_fulfills_requirements(
            &[Requirement::RulingParty {
                ideology: Ideology::Fascism
            }],
            &source
        ));
    }

    #[test]
    fn test_target_adjacency() {
        let regions = regions();
        let a = country(0, Tier::Major, "latin");
        let b = country(1, Tier::Weak, "latin");
        let c = country(2, Tier::Weak, "nordic");
        let none = LevelTargets::new();

        let neighbour = [TargetRequirement::Neighbour];
        assert!(target_fulfills_requirements(&neighbour, &a, &b, &regions, &none, 0));
        assert!(!target_fulfills_requirements(&neighbour, &a, &c, &regions, &none, 0));
        assert!(target_fulfills_requirements(
            &[TargetRequirement::NotNeighbour],
            &a,
            &c,
            &regions,
            &none,
            0
        ));
        assert!(!target_fulfills_requirements(
            &[TargetRequirement::SameCulture],
            &a,
            &c,
            &regions,
            &none,
            0
        ));
    }

    #[test]
    fn test_source_is_never_its_own_target() {
        let regions = regions();
        let a = country(0, Tier::Major, "latin");
        assert!(!target_fulfills_requirements(&[], &a, &a, &regions, &LevelTargets::new(), 0));
    }

    #[test]
    fn test_level_targets_are_unique_per_level() {
        let regions = regions();
        let a = country(0, Tier::Major, "latin");
        let b = country(1, Tier::Weak, "latin");
        let mut taken = LevelTargets::new();
        taken.entry(1).or_default().insert(b.id);

        assert!(!target_fulfills_requirements(&[], &a, &b, &regions, &taken, 1));
        assert!(target_fulfills_requirements(&[], &a, &b, &regions, &taken, 0));
    }

    #[test]
    fn test_relation_and_strength_requirements() {
        let regions = regions();
        let mut a = country(0, Tier::Major, "latin");
        let mut b = country(1, Tier::Weak, "latin");
        a.strength_score = 0.4;
        b.strength_score = 0.1;
        a.posture.add_relation(RelationKind::ExpansionTarget, b.id);
        let none = LevelTargets::new();

        let reqs = [
            TargetRequirement::Relation {
                relation: RelationKind::ExpansionTarget,
            },
            TargetRequirement::Weaker,
            TargetRequirement::MaxTier { tier: Tier::Regional },
        ];
        assert!(target_fulfills_requirements(&reqs, &a, &b, &regions, &none, 0));
        assert!(!target_fulfills_requirements(&reqs, &b, &a, &regions, &none, 0));
        assert!(target_fulfills_requirements(
            &[TargetRequirement::Stronger, TargetRequirement::MinTier { tier: Tier::Major }],
            &b,
            &a,
            &regions,
            &none,
            0
        ));
    }

    #[test]
    fn test_requirements_deserialize_from_tagged_tables() {
        #[derive(Deserialize)]
        struct Doc {
            requirements: Vec<Requirement>,
            targets: Vec<TargetRequirement>,
        }
        let doc: Doc = toml::from_str(
            r#"
            requirements = [
                { kind = "owns_resource", resource = "oil", amount = 10 },
                { kind = "has_coast" },
            ]
            targets = [{ kind = "relation", relation = "expansion_target" }]
            "#,
        )
        .unwrap();

        assert_eq!(
            doc.requirements[0],
            Requirement::OwnsResource {
                resource: Resource::Oil,
                amount: 10
            }
        );
        assert_eq!(doc.requirements[1], Requirement::HasCoast);
        assert_eq!(
            doc.targets[0],
            TargetRequirement::Relation {
                relation: RelationKind::ExpansionTarget
            }
        );
    }
}
