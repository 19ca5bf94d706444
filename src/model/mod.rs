// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A roster of participants is drawn into a ladder of rungs whose traced mapping is the
//! assignment.

pub mod assignment;
pub mod ladder;
pub mod participant;
pub mod roster;

pub use assignment::{is_derangement, Assignment, AssignmentError};
pub use ladder::{Ladder, LadderError, Rung};
pub use participant::{Participant, ParticipantError};
pub use roster::{AddOutcome, Roster};
