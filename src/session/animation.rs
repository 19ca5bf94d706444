// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::lottery::step;
use crate::model::Ladder;

use super::round::Reveal;

/// A token sliding down the ladder one row per tick.
///
/// The token replays [`step`] over the ladder's canonical rung order, so where it stops is the
/// traced target of its start column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    epoch: u64,
    start: usize,
    column: usize,
    rows_done: usize,
}

/// Result of delivering one animation frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame belongs to an animation that was reset or replaced; nothing changed.
    Stale,
    Advanced { column: usize, rows_done: usize },
    Finished(Reveal),
}

impl Animation {
    pub(crate) fn new(epoch: u64, start: usize) -> Self {
        Self { epoch, start, column: start, rows_done: 0 }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Lane the token is on right now.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Ladder rows the token has passed.
    pub fn rows_done(&self) -> usize {
        self.rows_done
    }

    pub fn is_finished(&self, ladder: &Ladder) -> bool {
        self.rows_done >= ladder.rows()
    }

    /// Moves the token past the next row. Returns `true` once it has reached the bottom.
    pub(crate) fn advance(&mut self, ladder: &Ladder) -> bool {
        if self.is_finished(ladder) {
            return true;
        }

        let range = ladder.row_range(self.rows_done);
        for rung in &ladder.rungs()[range] {
            self.column = step(self.column, rung);
        }
        self.rows_done += 1;
        self.is_finished(ladder)
    }
}
