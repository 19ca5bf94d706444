// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::participant::Participant;

/// What happened when a name was offered to the roster.
///
/// Blank input and duplicates are not errors; they are reported so a UI can explain the no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added { index: usize },
    Duplicate { index: usize },
    Blank,
}

/// Ordered, duplicate-free participant list. Position defines the ladder column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from raw names, applying the same rules as [`Roster::add`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.as_ref());
        }
        roster
    }

    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let Ok(participant) = Participant::new(raw) else {
            return AddOutcome::Blank;
        };

        if let Some(index) = self.position(participant.as_str()) {
            return AddOutcome::Duplicate { index };
        }

        self.participants.push(participant);
        AddOutcome::Added { index: self.participants.len() - 1 }
    }

    pub fn remove(&mut self, index: usize) -> Option<Participant> {
        if index >= self.participants.len() {
            return None;
        }
        Some(self.participants.remove(index))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.as_str() == name)
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }
}
