// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use smol_str::SmolStr;

/// A participant name as it appears on the ladder.
///
/// Names are trimmed on construction and must not be blank. Equality is exact (case-sensitive),
/// which is what the roster uses to detect duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Participant {
    name: SmolStr,
}

impl Participant {
    pub fn new(raw: &str) -> Result<Self, ParticipantError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ParticipantError::Blank);
        }
        Ok(Self { name: SmolStr::new(name) })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Participant {
    type Err = ParticipantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantError {
    Blank,
}

impl fmt::Display for ParticipantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("participant name must not be blank"),
        }
    }
}

impl std::error::Error for ParticipantError {}
