// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lottery session controller.
//!
//! All mutable state of a game (roster, current round, running animation) lives in [`Session`]
//! and changes only through explicit commands. Front-ends drive it; they never hold lottery state
//! of their own.
//!
//! Every animation is tagged with an epoch. [`Session::reset`] and each new animation bump the
//! epoch, so frames scheduled for an older animation come back as [`TickOutcome::Stale`] and
//! cannot touch the current state.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;

use crate::lottery::{DrawLimits, GenerationError, Strategy};
use crate::model::{AddOutcome, Participant, Roster};

pub mod animation;
pub mod round;

pub use animation::{Animation, TickOutcome};
pub use round::{Reveal, Round};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No participants yet.
    Idle,
    /// Roster is being edited.
    Collecting,
    /// A round is drawn; nobody has been revealed.
    LadderReady,
    /// A token is descending.
    Animating,
    /// At least one result is shown.
    Revealed,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    roster: Roster,
    strategy: Strategy,
    round: Option<Round>,
    animation: Option<Animation>,
    revealed: BTreeSet<usize>,
    last_revealed: Option<usize>,
    epoch: u64,
    limits: DrawLimits,
}

impl Session {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, ..Self::default() }
    }

    pub fn with_roster(strategy: Strategy, roster: Roster) -> Self {
        Self { roster, ..Self::new(strategy) }
    }

    pub fn phase(&self) -> Phase {
        match (&self.round, &self.animation) {
            (None, _) if self.roster.is_empty() => Phase::Idle,
            (None, _) => Phase::Collecting,
            (Some(_), Some(_)) => Phase::Animating,
            (Some(_), None) if self.revealed.is_empty() => Phase::LadderReady,
            (Some(_), None) => Phase::Revealed,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Takes effect from the next [`Session::start`].
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn draw_limits(&self) -> DrawLimits {
        self.limits
    }

    /// Takes effect at the next [`Session::start`].
    pub fn set_draw_limits(&mut self, limits: DrawLimits) {
        self.limits = limits;
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Columns whose results have been revealed in this round.
    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn is_revealed(&self, column: usize) -> bool {
        self.revealed.contains(&column)
    }

    /// The result most recently revealed by an animation.
    pub fn last_reveal(&self) -> Option<Reveal> {
        let column = self.last_revealed?;
        self.round.as_ref()?.reveal(column)
    }

    pub fn add_participant(&mut self, raw: &str) -> Result<AddOutcome, SessionError> {
        self.ensure_editable()?;
        let outcome = self.roster.add(raw);
        tracing::debug!(?outcome, "add participant");
        Ok(outcome)
    }

    pub fn remove_participant(&mut self, index: usize) -> Result<Participant, SessionError> {
        self.ensure_editable()?;
        let count = self.roster.len();
        let removed =
            self.roster.remove(index).ok_or(SessionError::UnknownParticipant { index, count })?;
        tracing::debug!(index, name = %removed, "remove participant");
        Ok(removed)
    }

    /// Freezes the roster and draws a round.
    ///
    /// On failure nothing changes: the roster stays editable and no partial round is kept.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Round, SessionError> {
        self.ensure_editable()?;

        let participants = self.roster.participants().to_vec();
        let round = match Round::draw_with(participants, self.strategy, self.limits, rng) {
            Ok(round) => round,
            Err(err) => {
                tracing::info!(error = %err, "round not started");
                return Err(err.into());
            }
        };

        tracing::info!(
            participants = round.len(),
            strategy = %round.strategy(),
            attempts = round.attempts(),
            rungs = round.ladder().rungs().len(),
            "round started"
        );
        self.revealed.clear();
        self.last_revealed = None;
        self.bump_epoch();
        Ok(self.round.insert(round))
    }

    /// Starts the token for `column` at the top of the ladder and returns the animation's epoch.
    pub fn select_participant(&mut self, column: usize) -> Result<u64, SessionError> {
        let Some(round) = self.round.as_ref() else {
            return Err(SessionError::NoRound);
        };
        if self.animation.is_some() {
            return Err(SessionError::AnimationInProgress);
        }
        if column >= round.len() {
            return Err(SessionError::UnknownParticipant { index: column, count: round.len() });
        }

        let epoch = self.bump_epoch();
        self.animation = Some(Animation::new(epoch, column));
        tracing::debug!(column, epoch, "animation started");
        Ok(epoch)
    }

    /// Delivers one animation frame scheduled under `epoch`.
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        let (Some(round), Some(animation)) = (self.round.as_ref(), self.animation.as_mut()) else {
            return TickOutcome::Stale;
        };
        if animation.epoch() != epoch {
            tracing::trace!(epoch, current = animation.epoch(), "stale frame dropped");
            return TickOutcome::Stale;
        }

        if !animation.advance(round.ladder()) {
            return TickOutcome::Advanced {
                column: animation.column(),
                rows_done: animation.rows_done(),
            };
        }

        let start = animation.start();
        debug_assert_eq!(
            Some(animation.column()),
            round.assignment().target(start),
            "animation diverged from the traced assignment"
        );
        let Some(reveal) = round.reveal(start) else {
            self.animation = None;
            return TickOutcome::Stale;
        };

        self.animation = None;
        self.revealed.insert(start);
        self.last_revealed = Some(start);
        tracing::debug!(column = start, outcome = %reveal.outcome, "animation finished");
        TickOutcome::Finished(reveal)
    }

    /// Reveals every result at once.
    pub fn reveal_all(&mut self) -> Result<Vec<Reveal>, SessionError> {
        let Some(round) = self.round.as_ref() else {
            return Err(SessionError::NoRound);
        };
        if self.animation.is_some() {
            return Err(SessionError::AnimationInProgress);
        }

        let reveals = round.reveals().collect::<Vec<_>>();
        self.revealed.extend(reveals.iter().map(|reveal| reveal.column));
        Ok(reveals)
    }

    /// Discards the round and any running animation. The roster is kept for the next round.
    pub fn reset(&mut self) {
        let had_round = self.round.take().is_some();
        self.animation = None;
        self.revealed.clear();
        self.last_revealed = None;
        let epoch = self.bump_epoch();
        tracing::debug!(had_round, epoch, "session reset");
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.round.is_some() {
            return Err(SessionError::RoundInProgress);
        }
        Ok(())
    }

    fn bump_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The roster is frozen while a round exists.
    RoundInProgress,
    NoRound,
    AnimationInProgress,
    UnknownParticipant { index: usize, count: usize },
    Generation(GenerationError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundInProgress => f.write_str("a round is in progress; reset to edit the roster"),
            Self::NoRound => f.write_str("no round has been started"),
            Self::AnimationInProgress => f.write_str("an animation is still running"),
            Self::UnknownParticipant { index, count } => {
                write!(f, "no participant at position {index} (roster has {count})")
            }
            Self::Generation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GenerationError> for SessionError {
    fn from(value: GenerationError) -> Self {
        Self::Generation(value)
    }
}
