// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drawing a derangement.
//!
//! Two generators produce the same guarantee (nobody lands on their own column):
//! - [`Strategy::Direct`] shuffles until the permutation is a derangement, then builds a ladder
//!   that realizes it.
//! - [`Strategy::Ladder`] generates random ladders until tracing one yields a derangement.
//!
//! Both are rejection samplers bounded by [`MAX_ATTEMPTS`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::model::{Assignment, Ladder};

pub mod derangement;
pub mod ladder;
pub mod trace;

pub use derangement::{derangement_indices, generate_derangement};
pub use ladder::{generate_derangement_ladder, random_ladder, realize_ladder, LadderShape};
pub use trace::{step, trace, trace_all};

/// Retry bound shared by both generators.
pub const MAX_ATTEMPTS: usize = 1000;

/// No derangement exists below this size.
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Direct,
    #[default]
    Ladder,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Ladder => "ladder",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "shuffle" => Ok(Self::Direct),
            "ladder" | "trace" => Ok(Self::Ladder),
            _ => Err(ParseStrategyError { raw: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError {
    raw: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy '{}' (expected 'direct' or 'ladder')", self.raw)
    }
}

impl std::error::Error for ParseStrategyError {}

/// An accepted draw: the ladder to show and the mapping it traces to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub ladder: Ladder,
    pub assignment: Assignment,
    /// Attempts the rejection sampler needed, including the accepted one.
    pub attempts: usize,
}

/// Retry bound and ladder shape for [`draw_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawLimits {
    pub max_attempts: usize,
    /// Replaces [`LadderShape::for_columns`] for the ladder strategy.
    pub shape: Option<LadderShape>,
}

impl Default for DrawLimits {
    fn default() -> Self {
        Self { max_attempts: MAX_ATTEMPTS, shape: None }
    }
}

/// Draws a derangement of `columns` lanes with the given strategy.
pub fn draw<R: Rng + ?Sized>(
    strategy: Strategy,
    columns: usize,
    rng: &mut R,
) -> Result<Draw, GenerationError> {
    draw_with(strategy, columns, DrawLimits::default(), rng)
}

pub fn draw_with<R: Rng + ?Sized>(
    strategy: Strategy,
    columns: usize,
    limits: DrawLimits,
    rng: &mut R,
) -> Result<Draw, GenerationError> {
    match strategy {
        Strategy::Direct => {
            let (targets, attempts) =
                derangement::derangement_indices_bounded(columns, rng, limits.max_attempts)?;
            let assignment = Assignment::from_permutation(targets);
            let ladder = realize_ladder(&assignment);
            Ok(Draw { ladder, assignment, attempts })
        }
        Strategy::Ladder => {
            let shape = limits.shape.unwrap_or_else(|| LadderShape::for_columns(columns));
            let (ladder, assignment, attempts) = ladder::generate_derangement_ladder_bounded(
                columns,
                shape,
                rng,
                limits.max_attempts,
            )?;
            Ok(Draw { ladder, assignment, attempts })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    /// Fewer than [`MIN_PARTICIPANTS`]; no derangement exists.
    InsufficientParticipants { count: usize },
    /// The retry bound ran out; drawing again with fresh randomness may succeed.
    GenerationExhausted { attempts: usize },
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::GenerationExhausted { .. })
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientParticipants { count } => write!(
                f,
                "at least {MIN_PARTICIPANTS} participants are needed (have {count})"
            ),
            Self::GenerationExhausted { attempts } => write!(
                f,
                "no valid assignment found after {attempts} attempts; please try again"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

fn ensure_enough(count: usize) -> Result<(), GenerationError> {
    if count < MIN_PARTICIPANTS {
        return Err(GenerationError::InsufficientParticipants { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::{
        draw, draw_with, DrawLimits, GenerationError, LadderShape, Strategy, MAX_ATTEMPTS,
    };
    use crate::lottery::trace_all;

    #[rstest]
    #[case(Strategy::Direct)]
    #[case(Strategy::Ladder)]
    fn draw_ladder_traces_to_assignment(#[case] strategy: Strategy) {
        let mut rng = StdRng::seed_from_u64(7);
        for columns in 2..9 {
            let drawn = draw(strategy, columns, &mut rng).expect("draw");
            assert!(drawn.assignment.is_derangement());
            assert_eq!(trace_all(drawn.ladder.rungs(), columns), drawn.assignment.targets());
            assert!((1..=MAX_ATTEMPTS).contains(&drawn.attempts));
        }
    }

    #[rstest]
    #[case(Strategy::Direct, 0)]
    #[case(Strategy::Direct, 1)]
    #[case(Strategy::Ladder, 0)]
    #[case(Strategy::Ladder, 1)]
    fn draw_rejects_tiny_rosters(#[case] strategy: Strategy, #[case] columns: usize) {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw(strategy, columns, &mut rng),
            Err(GenerationError::InsufficientParticipants { count: columns })
        );
    }

    #[rstest]
    #[case(32)]
    #[case(64)]
    #[case(100)]
    fn wide_ladders_draw_well_within_the_retry_bound(#[case] columns: usize) {
        let mut rng = StdRng::seed_from_u64(columns as u64);
        for _ in 0..5 {
            let drawn = draw(Strategy::Ladder, columns, &mut rng).expect("draw");
            assert!(drawn.assignment.is_derangement());
            assert!(drawn.attempts < MAX_ATTEMPTS / 2, "{} attempts", drawn.attempts);
            assert!(drawn.ladder.rows() <= 2 * columns);
        }
    }

    #[test]
    fn limits_override_shape_and_bound() {
        let mut rng = StdRng::seed_from_u64(4);
        let limits = DrawLimits { max_attempts: 7, shape: Some(LadderShape::with_rows(0)) };
        assert_eq!(
            draw_with(Strategy::Ladder, 4, limits, &mut rng),
            Err(GenerationError::GenerationExhausted { attempts: 7 })
        );
        assert_eq!(DrawLimits::default().max_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Direct".parse::<Strategy>(), Ok(Strategy::Direct));
        assert_eq!(" ladder ".parse::<Strategy>(), Ok(Strategy::Ladder));
        assert!("zigzag".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Ladder);
    }

    #[test]
    fn only_exhaustion_is_retryable() {
        assert!(GenerationError::GenerationExhausted { attempts: 3 }.is_retryable());
        assert!(!GenerationError::InsufficientParticipants { count: 1 }.is_retryable());
    }
}
