//! Territory assignment integration tests

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use scenario_gen::core::types::CountryId;
use scenario_gen::scenario::systems::assign_regions;
use scenario_gen::scenario::{Country, Region, Terrain};

/// 10 regions: land 0..8 in a chain, sea 8 and 9 hanging off the ends
fn example_world() -> Vec<Region> {
    let mut regions: Vec<Region> = (0..8u32)
        .map(|i| {
            let mut neighbors = Vec::new();
            if i > 0 {
                neighbors.push(i - 1);
            }
            if i < 7 {
                neighbors.push(i + 1);
            }
            Region::new(i, Terrain::Plains, 50.0, neighbors)
        })
        .collect();
    regions[0].neighbors.push(8);
    regions[7].neighbors.push(9);
    regions.push(Region::new(8, Terrain::Ocean, 50.0, vec![0]));
    regions.push(Region::new(9, Terrain::Ocean, 50.0, vec![7]));
    regions
}

fn country(id: u32, start: u32) -> Country {
    Country::new(CountryId(id), format!("C{:02}", id), format!("Country{}", id), start)
}

#[test]
fn test_example_world_claims_first_four_regions() {
    for seed in [1, 42, 777] {
        let mut regions = example_world();
        let mut a = country(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let owned = assign_regions(4, &mut regions, 0, &mut a, &mut rng).unwrap();

        assert_eq!(owned, 4);
        let mut sorted = a.regions.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        assert!(regions[8].owner.is_none());
        assert!(regions[9].owner.is_none());
    }
}

#[test]
fn test_example_world_is_reproducible() {
    let run = || {
        let mut regions = example_world();
        let mut a = country(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assign_regions(4, &mut regions, 0, &mut a, &mut rng).unwrap();
        a.regions
    };
    assert_eq!(run(), run());
}

#[test]
fn test_start_surrounded_by_sea_owns_one_region() {
    let mut regions = vec![
        Region::new(0, Terrain::Plains, 50.0, vec![1, 2]),
        Region::new(1, Terrain::Ocean, 50.0, vec![0]),
        Region::new(2, Terrain::Ocean, 50.0, vec![0]),
    ];
    let mut a = country(0, 0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    assert_eq!(assign_regions(10, &mut regions, 0, &mut a, &mut rng).unwrap(), 1);
    assert_eq!(a.regions, vec![0]);
}

#[test]
fn test_neighbouring_countries_share_the_line() {
    let mut regions = example_world();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut a = country(0, 0);
    let mut b = country(1, 7);

    assign_regions(4, &mut regions, 0, &mut a, &mut rng).unwrap();
    assign_regions(6, &mut regions, 7, &mut b, &mut rng).unwrap();

    assert_eq!(a.regions.len(), 4);
    assert_eq!(b.regions.len(), 4);
    for r in &b.regions {
        assert!(!a.owns(*r));
    }
}

/// Random undirected graph over `flags.len()` regions; true flags are sea
fn random_world(flags: &[bool], edges: &[(usize, usize)]) -> Vec<Region> {
    let mut regions: Vec<Region> = flags
        .iter()
        .enumerate()
        .map(|(i, &sea)| {
            let terrain = if sea { Terrain::Ocean } else { Terrain::Plains };
            Region::new(i as u32, terrain, 10.0, Vec::new())
        })
        .collect();
    for &(a, b) in edges {
        if a != b && !regions[a].neighbors.contains(&(b as u32)) {
            regions[a].neighbors.push(b as u32);
            regions[b].neighbors.push(a as u32);
        }
    }
    regions
}

fn world_strategy() -> impl Strategy<Value = (Vec<bool>, Vec<(usize, usize)>)> {
    (2usize..30).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::bool::weighted(0.2), n),
            prop::collection::vec((0..n, 0..n), 0..n * 3),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_growth_is_bounded_and_exclusive(
        (flags, edges) in world_strategy(),
        max_regions in 1usize..8,
        countries in 1u32..5,
        seed in any::<u64>(),
    ) {
        let mut regions = random_world(&flags, &edges);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut roster = Vec::new();

        for id in 0..countries {
            let Some(start) = regions.iter().find(|r| !r.sea && !r.assigned).map(|r| r.id) else {
                break;
            };
            let mut c = country(id, start);
            let owned = assign_regions(max_regions, &mut regions, start, &mut c, &mut rng).unwrap();
            prop_assert!(owned >= 1);
            prop_assert!(owned <= max_regions);
            prop_assert_eq!(owned, c.regions.len());
            roster.push(c);
        }

        for region in &regions {
            let holders = roster.iter().filter(|c| c.owns(region.id)).count();
            prop_assert!(holders <= 1);
            if region.sea {
                prop_assert_eq!(holders, 0);
                prop_assert!(region.owner.is_none());
            }
            if let Some(owner) = region.owner {
                prop_assert!(roster[owner.index()].owns(region.id));
            }
        }
    }
}
