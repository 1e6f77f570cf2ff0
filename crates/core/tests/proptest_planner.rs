//! Property-based checks of the planner's bound and determinism invariants
//! (spec.md §8, invariants 2 and 3).

use graphsplit_core::{FileRef, SlicePlan, SlicePlanner};
use proptest::prelude::*;

fn files_from_sizes(sizes: &[u64]) -> Vec<Result<FileRef, graphsplit_core::Error>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            Ok(FileRef {
                path: format!("/tmp/f{i}").into(),
                name: format!("f{i}"),
                size,
                range: None,
            })
        })
        .collect()
}

fn plan(sizes: &[u64], slice_size: u64) -> Vec<SlicePlan> {
    SlicePlanner::new(files_from_sizes(sizes).into_iter(), slice_size)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

proptest! {
    /// Every slice but the last stays at or under the configured size;
    /// every slice (including the last) never exceeds it.
    #[test]
    fn every_slice_is_bounded_by_slice_size(
        sizes in prop::collection::vec(1u64..5000, 0..12),
        slice_size in 1u64..4000,
    ) {
        let slices = plan(&sizes, slice_size);
        for slice in &slices {
            prop_assert!(slice.total_len() <= slice_size);
        }
    }

    /// Running the planner twice over identical input produces identical
    /// slice boundaries (same entry count and same contributed length per
    /// slice).
    #[test]
    fn planning_is_deterministic(
        sizes in prop::collection::vec(1u64..5000, 0..12),
        slice_size in 1u64..4000,
    ) {
        let a = plan(&sizes, slice_size);
        let b = plan(&sizes, slice_size);
        prop_assert_eq!(a.len(), b.len());
        for (sa, sb) in a.iter().zip(b.iter()) {
            prop_assert_eq!(sa.total_len(), sb.total_len());
            prop_assert_eq!(sa.entries.len(), sb.entries.len());
        }
    }

    /// The concatenation of every slice's contributed bytes reproduces the
    /// same total as the sum of input file sizes (spec.md §8 invariant 1,
    /// restricted to lengths since this test has no real file bytes).
    #[test]
    fn total_contributed_length_matches_input(
        sizes in prop::collection::vec(1u64..5000, 0..12),
        slice_size in 1u64..4000,
    ) {
        let slices = plan(&sizes, slice_size);
        let total: u64 = slices.iter().map(SlicePlan::total_len).sum();
        prop_assert_eq!(total, sizes.iter().sum::<u64>());
    }
}
