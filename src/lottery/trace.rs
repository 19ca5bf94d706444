// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Path tracing: sliding a token down the ladder.

use crate::model::Rung;

/// Applies one rung to a token sitting on `column`.
///
/// A rung only moves a token that is on one of its two lanes, swapping it to the other.
pub fn step(column: usize, rung: &Rung) -> usize {
    if column == rung.left() {
        rung.right()
    } else if column == rung.right() {
        rung.left()
    } else {
        column
    }
}

/// Final column reached from `start` after walking `rungs` in order.
///
/// Returns `None` when `start` is not a lane of a `columns`-wide ladder. Rungs reaching past the
/// last lane are skipped, so the result always lies in `0..columns`.
pub fn trace(start: usize, rungs: &[Rung], columns: usize) -> Option<usize> {
    if start >= columns {
        return None;
    }
    Some(inside(rungs, columns).fold(start, |column, rung| step(column, rung)))
}

/// Traces every start column at once. The result is always a permutation of `0..columns`.
pub fn trace_all(rungs: &[Rung], columns: usize) -> Vec<usize> {
    // starts[lane] = start column of the token currently on `lane`
    let mut starts = (0..columns).collect::<Vec<_>>();
    for rung in inside(rungs, columns) {
        starts.swap(rung.left(), rung.right());
    }

    let mut targets = vec![0; columns];
    for (lane, start) in starts.into_iter().enumerate() {
        targets[start] = lane;
    }
    targets
}

fn inside(rungs: &[Rung], columns: usize) -> impl Iterator<Item = &Rung> {
    rungs.iter().filter(move |rung| rung.right() < columns)
}

#[cfg(test)]
mod tests {
    use super::{step, trace, trace_all};
    use crate::model::Rung;

    fn rungs(columns: &[usize]) -> Vec<Rung> {
        columns.iter().enumerate().map(|(row, &column)| Rung::new(column, row)).collect()
    }

    #[test]
    fn step_swaps_only_touching_tokens() {
        let rung = Rung::new(1, 0);
        assert_eq!(step(1, &rung), 2);
        assert_eq!(step(2, &rung), 1);
        assert_eq!(step(0, &rung), 0);
        assert_eq!(step(3, &rung), 3);
    }

    #[test]
    fn empty_ladder_is_identity() {
        for start in 0..4 {
            assert_eq!(trace(start, &[], 4), Some(start));
        }
    }

    #[test]
    fn single_rung_leaves_third_lane_fixed() {
        let ladder = rungs(&[0]);
        assert_eq!(trace_all(&ladder, 3), vec![1, 0, 2]);
    }

    #[test]
    fn two_rungs_compose_in_order() {
        // 0 -> 1 -> 2, 1 -> 0, 2 -> 2 -> 1
        let ladder = rungs(&[0, 1]);
        assert_eq!(trace(0, &ladder, 3), Some(2));
        assert_eq!(trace(1, &ladder, 3), Some(0));
        assert_eq!(trace(2, &ladder, 3), Some(1));

        // Reversed order is a different permutation.
        let reversed = rungs(&[1, 0]);
        assert_eq!(trace_all(&reversed, 3), vec![1, 2, 0]);
    }

    #[test]
    fn same_rung_twice_cancels() {
        let ladder = rungs(&[2, 2]);
        assert_eq!(trace_all(&ladder, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn start_outside_the_ladder_has_no_trace() {
        assert_eq!(trace(5, &[], 3), None);
        assert_eq!(trace(3, &rungs(&[0, 1]), 3), None);
    }

    #[test]
    fn rungs_past_the_last_lane_are_skipped() {
        // Rung 2 would join lanes 2 and 3 of a three-lane ladder.
        let ladder = rungs(&[0, 2]);
        assert_eq!(trace(1, &ladder, 3), Some(0));
        assert_eq!(trace(2, &ladder, 3), Some(2));
        assert_eq!(trace_all(&ladder, 3), vec![1, 0, 2]);
    }

    #[test]
    fn trace_all_agrees_with_single_traces() {
        let ladder = rungs(&[1, 0, 2, 1, 0, 2, 2, 1]);
        let targets = trace_all(&ladder, 4);
        for (start, &target) in targets.iter().enumerate() {
            assert_eq!(trace(start, &ladder, 4), Some(target));
        }
    }
}
