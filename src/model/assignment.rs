// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Column-to-column mapping produced by a draw.
///
/// `target(i)` is the column participant `i` lands on; their outcome is the participant listed at
/// that column. Construction guarantees a bijection over `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    targets: Vec<usize>,
}

impl Assignment {
    pub fn from_targets(targets: Vec<usize>) -> Result<Self, AssignmentError> {
        let len = targets.len();
        let mut seen = vec![false; len];
        for (column, &target) in targets.iter().enumerate() {
            if target >= len {
                return Err(AssignmentError::TargetOutOfRange { column, target, len });
            }
            if std::mem::replace(&mut seen[target], true) {
                return Err(AssignmentError::DuplicateTarget { target });
            }
        }
        Ok(Self { targets })
    }

    /// Wraps a traced or shuffled permutation. Bijectivity holds by construction there and is
    /// only asserted in debug builds.
    pub(crate) fn from_permutation(targets: Vec<usize>) -> Self {
        debug_assert!(
            Self::from_targets(targets.clone()).is_ok(),
            "not a permutation: {targets:?}"
        );
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn target(&self, column: usize) -> Option<usize> {
        self.targets.get(column).copied()
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Inverse lookup: which start column ends on `target`.
    pub fn source_of(&self, target: usize) -> Option<usize> {
        self.targets.iter().position(|&t| t == target)
    }

    pub fn is_derangement(&self) -> bool {
        is_derangement(&self.targets)
    }

    pub fn fixed_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.targets.iter().enumerate().filter(|(i, t)| i == *t).map(|(i, _)| i)
    }
}

/// True when no position maps to itself. Does not check bijectivity.
pub fn is_derangement(targets: &[usize]) -> bool {
    targets.iter().enumerate().all(|(i, &t)| i != t)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    TargetOutOfRange { column: usize, target: usize, len: usize },
    DuplicateTarget { target: usize },
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetOutOfRange { column, target, len } => {
                write!(f, "column {column} maps to {target}, outside 0..{len}")
            }
            Self::DuplicateTarget { target } => {
                write!(f, "column {target} is the target of more than one start")
            }
        }
    }
}

impl std::error::Error for AssignmentError {}
