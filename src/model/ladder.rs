// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;

/// A horizontal rung joining lane `column` and lane `column + 1` at vertical slot `row`.
///
/// Rungs only ever join adjacent lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rung {
    column: usize,
    row: usize,
}

impl Rung {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Left lane.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn left(&self) -> usize {
        self.column
    }

    pub fn right(&self) -> usize {
        self.column + 1
    }

    pub fn touches(&self, lane: usize) -> bool {
        lane == self.left() || lane == self.right()
    }
}

/// An immutable ladder: lane count plus rungs in canonical top-to-bottom order.
///
/// Canonical order is a stable sort by row, so rungs on the same row keep the order in which they
/// were handed to [`Ladder::new`]. Tracing and the animated reveal both walk this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    columns: usize,
    rungs: Vec<Rung>,
}

impl Ladder {
    pub fn new(columns: usize, mut rungs: Vec<Rung>) -> Result<Self, LadderError> {
        for rung in &rungs {
            if rung.right() >= columns {
                return Err(LadderError::RungOutOfRange { rung: *rung, columns });
            }
        }

        rungs.sort_by_key(Rung::row);

        // Last rung seen per lane; same-row rungs must be lane-disjoint so they commute.
        let mut last_on_lane = vec![None::<Rung>; columns];
        for rung in &rungs {
            for lane in [rung.left(), rung.right()] {
                if let Some(previous) = last_on_lane[lane] {
                    if previous.row() == rung.row() {
                        return Err(LadderError::OverlappingRungs {
                            first: previous,
                            second: *rung,
                        });
                    }
                }
                last_on_lane[lane] = Some(*rung);
            }
        }

        Ok(Self { columns, rungs })
    }

    /// Builds a ladder from rungs a generator placed itself; validity is asserted in debug builds.
    pub(crate) fn from_generated(columns: usize, mut rungs: Vec<Rung>) -> Self {
        debug_assert!(Self::new(columns, rungs.clone()).is_ok(), "generated ladder is invalid");
        rungs.sort_by_key(Rung::row);
        Self { columns, rungs }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    /// Number of row slots, i.e. one past the lowest rung's row.
    pub fn rows(&self) -> usize {
        self.rungs.last().map(|rung| rung.row() + 1).unwrap_or(0)
    }

    /// Index range into [`Ladder::rungs`] covering every rung on `row`.
    pub fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        let start = self.rungs.partition_point(|rung| rung.row() < row);
        let end = self.rungs.partition_point(|rung| rung.row() <= row);
        start..end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    RungOutOfRange { rung: Rung, columns: usize },
    OverlappingRungs { first: Rung, second: Rung },
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RungOutOfRange { rung, columns } => write!(
                f,
                "rung {}-{} on row {} does not fit a ladder with {columns} lanes",
                rung.left(),
                rung.right(),
                rung.row()
            ),
            Self::OverlappingRungs { first, second } => write!(
                f,
                "rungs {}-{} and {}-{} share a lane on row {}",
                first.left(),
                first.right(),
                second.left(),
                second.right(),
                first.row()
            ),
        }
    }
}

impl std::error::Error for LadderError {}
