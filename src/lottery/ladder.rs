// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ladder generation and realization.

use rand::Rng;

use super::trace::trace_all;
use super::{ensure_enough, GenerationError, MAX_ATTEMPTS, MIN_PARTICIPANTS};
use crate::model::{is_derangement, Assignment, Ladder, Rung};

/// How tall a random ladder is.
///
/// Rows alternate between two interleaved lattices: even rows offer a rung slot at every even
/// lane, odd rows at every odd lane, so rungs on one row never share a lane. Every slot is filled
/// with probability one half. A token thus moves in about half of the rows, and the rung count
/// varies, so both permutation parities occur.
///
/// With `max(10, 2 * columns)` rows a token leaves its start column often enough that about one
/// ladder in fifteen is a derangement even at 64 lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderShape {
    rows: usize,
}

impl LadderShape {
    pub const MIN_ROWS: usize = 10;

    pub fn for_columns(columns: usize) -> Self {
        Self { rows: columns.saturating_mul(2).max(Self::MIN_ROWS) }
    }

    pub fn with_rows(rows: usize) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of rung slots on a `columns`-wide ladder of this shape.
    pub fn slots(&self, columns: usize) -> usize {
        let even_rows = (self.rows + 1) / 2;
        let odd_rows = self.rows / 2;
        even_rows * (columns / 2) + odd_rows * (columns.saturating_sub(1) / 2)
    }
}

const SLOT_FILL_PROBABILITY: f64 = 0.5;

/// Lays down one random ladder, top row first.
pub fn random_ladder<R: Rng + ?Sized>(columns: usize, shape: LadderShape, rng: &mut R) -> Ladder {
    if columns < MIN_PARTICIPANTS {
        return Ladder::from_generated(columns, Vec::new());
    }

    let mut rungs = Vec::with_capacity(shape.slots(columns) / 2 + 1);
    for row in 0..shape.rows {
        for column in (row % 2..columns - 1).step_by(2) {
            if rng.random_bool(SLOT_FILL_PROBABILITY) {
                rungs.push(Rung::new(column, row));
            }
        }
    }

    Ladder::from_generated(columns, rungs)
}

/// Generates random ladders until one traces to a derangement of `columns` lanes.
pub fn generate_derangement_ladder<R: Rng + ?Sized>(
    columns: usize,
    rng: &mut R,
) -> Result<(Ladder, Assignment), GenerationError> {
    let shape = LadderShape::for_columns(columns);
    generate_derangement_ladder_bounded(columns, shape, rng, MAX_ATTEMPTS)
        .map(|(ladder, assignment, _)| (ladder, assignment))
}

pub(crate) fn generate_derangement_ladder_bounded<R: Rng + ?Sized>(
    columns: usize,
    shape: LadderShape,
    rng: &mut R,
    max_attempts: usize,
) -> Result<(Ladder, Assignment, usize), GenerationError> {
    ensure_enough(columns)?;

    for attempt in 1..=max_attempts {
        let ladder = random_ladder(columns, shape, rng);
        let targets = trace_all(ladder.rungs(), columns);
        if is_derangement(&targets) {
            tracing::debug!(
                columns,
                rungs = ladder.rungs().len(),
                attempt,
                "derangement ladder accepted"
            );
            return Ok((ladder, Assignment::from_permutation(targets), attempt));
        }
    }

    tracing::warn!(columns, max_attempts, "ladder retry bound exhausted");
    Err(GenerationError::GenerationExhausted { attempts: max_attempts })
}

/// Builds a ladder whose traced mapping is exactly `assignment`.
///
/// Lanes are bubble-sorted by target; every adjacent swap becomes a rung. Rungs are then packed
/// into the earliest row that is free on both of their lanes, which keeps rungs that share a lane
/// in swap order.
pub fn realize_ladder(assignment: &Assignment) -> Ladder {
    let columns = assignment.len();
    let targets = assignment.targets();

    // lanes[c] = start column whose token currently sits on lane c
    let mut lanes = (0..columns).collect::<Vec<_>>();
    let mut swaps = Vec::new();
    loop {
        let mut swapped = false;
        for column in 0..columns.saturating_sub(1) {
            if targets[lanes[column]] > targets[lanes[column + 1]] {
                lanes.swap(column, column + 1);
                swaps.push(column);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    let mut next_free_row = vec![0usize; columns];
    let rungs = swaps
        .into_iter()
        .map(|column| {
            let row = next_free_row[column].max(next_free_row[column + 1]);
            next_free_row[column] = row + 1;
            next_free_row[column + 1] = row + 1;
            Rung::new(column, row)
        })
        .collect();

    Ladder::from_generated(columns, rungs)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::{
        generate_derangement_ladder, generate_derangement_ladder_bounded, random_ladder,
        realize_ladder, LadderShape,
    };
    use crate::lottery::{trace_all, GenerationError};
    use crate::model::{Assignment, Ladder, Rung};

    #[test]
    fn shape_scales_with_columns() {
        assert_eq!(LadderShape::for_columns(2).rows(), 10);
        assert_eq!(LadderShape::for_columns(5).rows(), 10);
        assert_eq!(LadderShape::for_columns(9).rows(), 18);
        // 5 even rows with 2 slots, 5 odd rows with 1
        assert_eq!(LadderShape::for_columns(4).slots(4), 15);
        assert_eq!(LadderShape::for_columns(2).slots(2), 5);
    }

    #[test]
    fn random_ladder_alternates_lattices() {
        let mut rng = StdRng::seed_from_u64(9);
        let shape = LadderShape::for_columns(6);
        let mut parities = BTreeSet::new();
        for _ in 0..100 {
            let ladder = random_ladder(6, shape, &mut rng);
            assert!(ladder.rungs().len() <= shape.slots(6));
            assert!(Ladder::new(6, ladder.rungs().to_vec()).is_ok(), "same-row rungs overlap");
            for rung in ladder.rungs() {
                assert_eq!(rung.column() % 2, rung.row() % 2);
                assert!(rung.row() < 12 && rung.right() < 6);
            }
            parities.insert(ladder.rungs().len() % 2);
        }
        assert_eq!(parities, BTreeSet::from([0, 1]));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(16)]
    fn generated_ladders_trace_to_derangements(#[case] columns: usize) {
        let mut rng = StdRng::seed_from_u64(columns as u64);
        for _ in 0..50 {
            let (ladder, assignment) =
                generate_derangement_ladder(columns, &mut rng).expect("ladder");
            assert!(assignment.is_derangement());
            assert_eq!(trace_all(ladder.rungs(), columns), assignment.targets());
        }
    }

    #[test]
    fn two_lanes_need_an_odd_rung_count() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let (ladder, assignment) = generate_derangement_ladder(2, &mut rng).expect("ladder");
            assert_eq!(ladder.rungs().len() % 2, 1);
            assert_eq!(assignment.targets(), &[1, 0]);
        }
    }

    #[traced_test]
    #[test]
    fn rungless_ladders_exhaust_the_retry_bound() {
        let mut rng = StdRng::seed_from_u64(0);
        let shape = LadderShape::with_rows(0);
        let result = generate_derangement_ladder_bounded(4, shape, &mut rng, 10);
        assert_eq!(result, Err(GenerationError::GenerationExhausted { attempts: 10 }));
        assert!(logs_contain("ladder retry bound exhausted"));
    }

    #[test]
    fn realize_three_cycle() {
        let assignment = Assignment::from_targets(vec![2, 0, 1]).expect("assignment");
        let ladder = realize_ladder(&assignment);
        assert_eq!(ladder.rungs(), &[Rung::new(0, 0), Rung::new(1, 1)]);
        assert_eq!(trace_all(ladder.rungs(), 3), vec![2, 0, 1]);
    }

    #[test]
    fn realize_identity_is_empty() {
        let assignment = Assignment::from_targets(vec![0, 1, 2, 3]).expect("assignment");
        assert!(realize_ladder(&assignment).rungs().is_empty());
    }

    #[test]
    fn realize_packs_disjoint_swaps_onto_one_row() {
        let assignment = Assignment::from_targets(vec![1, 0, 3, 2]).expect("assignment");
        let ladder = realize_ladder(&assignment);
        assert_eq!(ladder.rungs(), &[Rung::new(0, 0), Rung::new(2, 0)]);
        assert_eq!(ladder.rows(), 1);
    }

    #[test]
    fn realize_round_trips_random_permutations() {
        let mut rng = StdRng::seed_from_u64(77);
        for columns in 0..12 {
            for _ in 0..20 {
                let mut targets = (0..columns).collect::<Vec<_>>();
                targets.shuffle(&mut rng);
                let assignment = Assignment::from_targets(targets.clone()).expect("assignment");
                let ladder = realize_ladder(&assignment);
                assert_eq!(trace_all(ladder.rungs(), columns), targets);
            }
        }
    }
}
