// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rand::Rng;

use crate::lottery::{self, Draw, DrawLimits, GenerationError, Strategy};
use crate::model::{Assignment, Ladder, Participant};

/// One lottery round: a frozen roster snapshot plus the accepted draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    participants: Vec<Participant>,
    strategy: Strategy,
    ladder: Ladder,
    assignment: Assignment,
    attempts: usize,
}

/// A participant paired with the participant they drew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub column: usize,
    pub participant: Participant,
    pub outcome: Participant,
}

impl Round {
    pub fn draw<R: Rng + ?Sized>(
        participants: Vec<Participant>,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        Self::draw_with(participants, strategy, DrawLimits::default(), rng)
    }

    pub fn draw_with<R: Rng + ?Sized>(
        participants: Vec<Participant>,
        strategy: Strategy,
        limits: DrawLimits,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let Draw { ladder, assignment, attempts } =
            lottery::draw_with(strategy, participants.len(), limits, rng)?;
        Ok(Self { participants, strategy, ladder, assignment, attempts })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn outcome_of(&self, column: usize) -> Option<&Participant> {
        let target = self.assignment.target(column)?;
        self.participants.get(target)
    }

    pub fn reveal(&self, column: usize) -> Option<Reveal> {
        let participant = self.participants.get(column)?.clone();
        let outcome = self.outcome_of(column)?.clone();
        Some(Reveal { column, participant, outcome })
    }

    /// Every result, in roster order.
    pub fn reveals(&self) -> impl Iterator<Item = Reveal> + '_ {
        (0..self.participants.len()).filter_map(|column| self.reveal(column))
    }
}
