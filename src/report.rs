// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Machine-readable summary of a round, printed by `amida --json`.

use serde::Serialize;

use crate::lottery::Strategy;
use crate::model::{Participant, Rung};
use crate::session::Round;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub attempts: usize,
    pub participants: Vec<Participant>,
    pub rungs: Vec<Rung>,
    /// `mapping[i]` is the lane participant `i` ends on.
    pub mapping: Vec<usize>,
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub participant: Participant,
    pub outcome: Participant,
}

impl RoundReport {
    pub fn from_round(round: &Round, seed: Option<u64>) -> Self {
        Self {
            strategy: round.strategy(),
            seed,
            attempts: round.attempts(),
            participants: round.participants().to_vec(),
            rungs: round.ladder().rungs().to_vec(),
            mapping: round.assignment().targets().to_vec(),
            results: round
                .reveals()
                .map(|reveal| ResultEntry {
                    participant: reveal.participant,
                    outcome: reveal.outcome,
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
