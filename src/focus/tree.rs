//! Focus tree assembly - prerequisite clauses and exclusive sets per focus

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{ChainId, StepId};
use crate::focus::{ChainInstance, NationalFocus};
use crate::scenario::country::Country;

/// All foci of one country, ready for rendering
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusTree {
    pub tag: String,
    /// Chains in chain-id order, steps in step-id order
    pub nodes: Vec<FocusNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusNode {
    pub focus: NationalFocus,
    /// One entry per `prerequisite` clause; ids inside a clause are sorted
    pub prerequisites: Vec<Vec<StepId>>,
    pub mutually_exclusive: Vec<StepId>,
}

impl FocusTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, step: StepId) -> Option<&FocusNode> {
        self.nodes.iter().find(|n| n.focus.step_id == step)
    }

    /// Render name of a focus, `{TAG}{chain}.{step}`
    pub fn focus_key(&self, step: StepId) -> Option<String> {
        self.node(step)
            .map(|n| focus_key(&self.tag, n.focus.chain_id, step))
    }
}

pub fn focus_key(tag: &str, chain: ChainId, step: StepId) -> String {
    format!("{}{}.{}", tag, chain, step)
}

/// Merge a country's chain instances into one tree.
///
/// Pure; building twice from the same country gives equal trees.
pub fn build_focus_tree(country: &Country) -> FocusTree {
    let mut chains: Vec<&ChainInstance> = country.focus_chains.iter().collect();
    chains.sort_by_key(|c| c.chain_id);

    let mut nodes = Vec::with_capacity(country.focus_count());
    for chain in chains {
        let by_id: AHashMap<StepId, &NationalFocus> =
            chain.foci.iter().map(|f| (f.step_id, f)).collect();

        let mut foci: Vec<&NationalFocus> = chain.foci.iter().collect();
        foci.sort_by_key(|f| f.step_id);

        for focus in foci {
            let valid = |id: &StepId| *id != focus.step_id && by_id.contains_key(id);

            nodes.push(FocusNode {
                prerequisites: prerequisite_clauses(focus, &by_id, &valid),
                mutually_exclusive: focus
                    .xor_foci
                    .iter()
                    .copied()
                    .filter(|id| valid(id))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect(),
                focus: focus.clone(),
            });
        }
    }

    tracing::debug!("{} focus tree has {} nodes", country.tag, nodes.len());
    FocusTree {
        tag: country.tag.clone(),
        nodes,
    }
}

/// Predecessors with co-requisites each form an AND group. Several groups
/// become separate clauses; otherwise every predecessor and co-requisite
/// seen goes into one flat clause.
///
/// With two or more groups, a predecessor without co-requisites appears in
/// no clause at all.
fn prerequisite_clauses(
    focus: &NationalFocus,
    by_id: &AHashMap<StepId, &NationalFocus>,
    valid: &dyn Fn(&StepId) -> bool,
) -> Vec<Vec<StepId>> {
    let mut seen: BTreeSet<StepId> = BTreeSet::new();
    let mut groups: Vec<Vec<StepId>> = Vec::new();

    for &pred in focus.preceding.iter().filter(|id| valid(*id)) {
        let mut group = Vec::new();
        let co_requisites: Vec<StepId> = by_id
            .get(&pred)
            .map(|p| p.and_foci.iter().copied().filter(|id| valid(id)).collect())
            .unwrap_or_default();

        if !co_requisites.is_empty() {
            for id in co_requisites {
                if seen.insert(id) {
                    group.push(id);
                }
            }
            if seen.insert(pred) {
                group.push(pred);
            }
        }
        seen.insert(pred);

        group.sort();
        if !group.is_empty() {
            groups.push(group);
        }
    }

    if groups.len() > 1 {
        groups
    } else if seen.is_empty() {
        Vec::new()
    } else {
        vec![seen.into_iter().collect()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CountryId;
    use crate::focus::{FocusType, Position};

    fn focus(chain: u32, step: u32) -> NationalFocus {
        NationalFocus {
            step_id: StepId(step),
            chain_id: ChainId(chain),
            step_index: 0,
            focus_type: FocusType::Politics,
            chain_name: "test".into(),
            source_tag: "AAA".into(),
            dest_tag: None,
            position: Position::default(),
            preceding: Vec::new(),
            and_foci: Vec::new(),
            xor_foci: Vec::new(),
            available: Vec::new(),
            bypasses: Vec::new(),
            rewards: Vec::new(),
        }
    }

    fn country_with(chains: Vec<ChainInstance>) -> Country {
        let mut country = Country::new(CountryId(0), "AAA".into(), "Aland".into(), 0);
        country.focus_chains = chains;
        country
    }

    fn chain(id: u32, foci: Vec<NationalFocus>) -> ChainInstance {
        ChainInstance {
            chain_id: ChainId(id),
            template_name: "test".into(),
            level: 0,
            target: None,
            foci,
        }
    }

    #[test]
    fn test_plain_predecessors_form_one_clause() {
        let root = focus(0, 0);
        let left = focus(0, 1);
        let mut join = focus(0, 2);
        join.preceding = vec![StepId(1), StepId(0)];

        let tree = build_focus_tree(&country_with(vec![chain(0, vec![root, left, join])]));

        assert!(tree.nodes[0].prerequisites.is_empty());
        assert_eq!(tree.nodes[2].prerequisites, vec![vec![StepId(0), StepId(1)]]);
    }

    #[test]
    fn test_co_requisites_form_separate_and_groups() {
        // 1 needs 0 alongside, 3 needs 2 alongside; 4 follows 1 and 3
        let mut s1 = focus(0, 1);
        s1.and_foci = vec![StepId(0)];
        let mut s3 = focus(0, 3);
        s3.and_foci = vec![StepId(2)];
        let mut s4 = focus(0, 4);
        s4.preceding = vec![StepId(1), StepId(3)];

        let tree = build_focus_tree(&country_with(vec![chain(
            0,
            vec![focus(0, 0), s1, focus(0, 2), s3, s4],
        )]));

        let node = tree.node(StepId(4)).unwrap();
        assert_eq!(
            node.prerequisites,
            vec![vec![StepId(0), StepId(1)], vec![StepId(2), StepId(3)]]
        );
    }

    #[test]
    fn test_plain_predecessor_dropped_beside_several_groups() {
        let mut s1 = focus(0, 1);
        s1.and_foci = vec![StepId(0)];
        let mut s3 = focus(0, 3);
        s3.and_foci = vec![StepId(2)];
        let mut s5 = focus(0, 5);
        s5.preceding = vec![StepId(1), StepId(4), StepId(3)];

        let tree = build_focus_tree(&country_with(vec![chain(
            0,
            vec![focus(0, 0), s1, focus(0, 2), s3, focus(0, 4), s5],
        )]));

        let clauses = &tree.node(StepId(5)).unwrap().prerequisites;
        assert_eq!(
            clauses,
            &vec![vec![StepId(0), StepId(1)], vec![StepId(2), StepId(3)]]
        );
        assert!(clauses.iter().flatten().all(|&id| id != StepId(4)));
    }

    #[test]
    fn test_single_and_group_falls_back_to_flat_clause() {
        let mut s1 = focus(0, 1);
        s1.and_foci = vec![StepId(0)];
        let mut s3 = focus(0, 3);
        s3.preceding = vec![StepId(2), StepId(1)];

        let tree = build_focus_tree(&country_with(vec![chain(
            0,
            vec![focus(0, 0), s1, focus(0, 2), s3],
        )]));

        assert_eq!(
            tree.node(StepId(3)).unwrap().prerequisites,
            vec![vec![StepId(0), StepId(1), StepId(2)]]
        );
    }

    #[test]
    fn test_dangling_and_self_references_dropped() {
        let mut s0 = focus(0, 0);
        s0.preceding = vec![StepId(0), StepId(42)];
        s0.xor_foci = vec![StepId(1), StepId(0), StepId(1), StepId(7)];

        let tree = build_focus_tree(&country_with(vec![
            chain(0, vec![s0, focus(0, 1)]),
            chain(1, vec![focus(1, 7)]),
        ]));

        let node = tree.node(StepId(0)).unwrap();
        assert!(node.prerequisites.is_empty());
        assert_eq!(node.mutually_exclusive, vec![StepId(1)]);
    }

    #[test]
    fn test_node_order_and_keys() {
        let tree = build_focus_tree(&country_with(vec![
            chain(1, vec![focus(1, 3), focus(1, 2)]),
            chain(0, vec![focus(0, 1), focus(0, 0)]),
        ]));

        let order: Vec<u32> = tree.nodes.iter().map(|n| n.focus.step_id.0).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(tree.focus_key(StepId(3)).as_deref(), Some("AAA1.3"));
        assert_eq!(tree.focus_key(StepId(9)), None);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let mut s2 = focus(0, 2);
        s2.preceding = vec![StepId(0), StepId(1)];
        s2.xor_foci = vec![StepId(1)];
        let country = country_with(vec![chain(0, vec![focus(0, 0), focus(0, 1), s2])]);

        assert_eq!(build_focus_tree(&country), build_focus_tree(&country));
    }
}
