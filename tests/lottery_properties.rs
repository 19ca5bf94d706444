// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Generator and tracing invariants checked over random inputs.
//!
//! 1. Both strategies always yield a derangement that is a bijection
//! 2. The shown ladder traces to exactly the revealed mapping
//! 3. Any rung list traces to a permutation; reversing it traces to the inverse
//! 4. Realizing an assignment reproduces it
//! 5. Seeded draws are reproducible

use amida::lottery::{self, generate_derangement, realize_ladder, trace, trace_all, GenerationError};
use amida::model::{is_derangement, Assignment, Ladder, Roster, Rung};
use amida::session::Round;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

type DrawStrategy = amida::lottery::Strategy;

fn draw_strategy() -> impl Strategy<Value = DrawStrategy> {
    prop_oneof![Just(DrawStrategy::Direct), Just(DrawStrategy::Ladder)]
}

fn permutation(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    (0..=max_len).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
}

fn rung_list() -> impl Strategy<Value = (usize, Vec<Rung>)> {
    (2usize..9).prop_flat_map(|columns| {
        let rungs = prop::collection::vec(
            (0..columns - 1, 0usize..32).prop_map(|(column, row)| Rung::new(column, row)),
            0..40,
        );
        (Just(columns), rungs)
    })
}

fn is_permutation(targets: &[usize]) -> bool {
    Assignment::from_targets(targets.to_vec()).is_ok()
}

// ── Worked examples ─────────────────────────────────────────────────────

#[rstest]
#[case(3, &[(0, 0)], &[1, 0, 2])]
#[case(3, &[(0, 0), (1, 1)], &[2, 0, 1])]
#[case(4, &[], &[0, 1, 2, 3])]
#[case(2, &[(0, 0)], &[1, 0])]
fn traces_known_ladders(
    #[case] columns: usize,
    #[case] rungs: &[(usize, usize)],
    #[case] expected: &[usize],
) {
    let rungs = rungs.iter().map(|&(column, row)| Rung::new(column, row)).collect::<Vec<_>>();
    let ladder = Ladder::new(columns, rungs).expect("ladder");
    assert_eq!(trace_all(ladder.rungs(), columns), expected);
}

#[test]
fn single_rung_on_three_lanes_is_not_a_derangement() {
    let targets = trace_all(&[Rung::new(0, 0)], 3);
    assert!(!is_derangement(&targets), "lane 2 keeps its own name");
}

#[test]
fn pair_always_swaps() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        assert_eq!(generate_derangement(&["A", "B"], &mut rng), Ok(vec!["B", "A"]));
    }
}

#[rstest]
#[case(DrawStrategy::Direct, 0)]
#[case(DrawStrategy::Direct, 1)]
#[case(DrawStrategy::Ladder, 0)]
#[case(DrawStrategy::Ladder, 1)]
fn too_few_participants_fail_for_every_strategy(#[case] strategy: DrawStrategy, #[case] n: usize) {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        lottery::draw(strategy, n, &mut rng).map(|draw| draw.attempts),
        Err(GenerationError::InsufficientParticipants { count: n })
    );
}

#[test]
fn seeded_rounds_are_reproducible() {
    let roster = Roster::from_names(["Ann", "Ben", "Cat", "Dan", "Eve"]);
    let draw = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        Round::draw(roster.participants().to_vec(), DrawStrategy::Ladder, &mut rng).expect("round")
    };
    let first = draw(99);
    let second = draw(99);
    assert_eq!(first.ladder(), second.ladder());
    assert_eq!(first.assignment(), second.assignment());
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn draws_are_derangements(strategy in draw_strategy(), n in 2usize..48, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let draw = lottery::draw(strategy, n, &mut rng).expect("draw");

        let targets = draw.assignment.targets();
        prop_assert_eq!(targets.len(), n);
        prop_assert!(is_permutation(targets));
        prop_assert!(targets.iter().enumerate().all(|(i, &t)| i != t));
        prop_assert!(draw.attempts >= 1);
    }

    #[test]
    fn shown_ladder_traces_to_revealed_mapping(
        strategy in draw_strategy(),
        n in 2usize..16,
        seed in any::<u64>(),
    ) {
        let names = (0..n).map(|i| format!("p{i}")).collect::<Vec<_>>();
        let roster = Roster::from_names(&names);
        let mut rng = StdRng::seed_from_u64(seed);
        let round = Round::draw(roster.participants().to_vec(), strategy, &mut rng)
            .expect("round");

        for reveal in round.reveals() {
            let lane = trace(reveal.column, round.ladder().rungs(), n).expect("lane");
            prop_assert_eq!(&round.participants()[lane], &reveal.outcome);
            prop_assert_ne!(&reveal.participant, &reveal.outcome);
        }
    }

    #[test]
    fn any_rung_list_traces_to_a_permutation((columns, rungs) in rung_list()) {
        let forward = trace_all(&rungs, columns);
        prop_assert!(is_permutation(&forward));

        let reversed = rungs.iter().rev().copied().collect::<Vec<_>>();
        let backward = trace_all(&reversed, columns);
        for (start, &end) in forward.iter().enumerate() {
            prop_assert_eq!(backward[end], start);
        }
    }

    #[test]
    fn realized_ladder_reproduces_assignment(targets in permutation(12)) {
        let assignment = Assignment::from_targets(targets.clone()).expect("permutation");
        let ladder = realize_ladder(&assignment);

        prop_assert_eq!(ladder.columns(), targets.len());
        prop_assert_eq!(trace_all(ladder.rungs(), ladder.columns()), targets);
        prop_assert!(Ladder::new(ladder.columns(), ladder.rungs().to_vec()).is_ok());
    }

    #[test]
    fn derangement_keeps_every_item(len in 2usize..20, seed in any::<u64>()) {
        let items = (0..len).map(|i| i * 7).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut shuffled = generate_derangement(&items, &mut rng).expect("derangement");

        prop_assert!(items.iter().zip(&shuffled).all(|(a, b)| a != b));
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, items);
    }
}
