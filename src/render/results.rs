// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::session::Round;

/// Shown once every participant's result is visible.
pub const CONFIRMATION: &str = "✓ Everyone drew someone other than themselves!";

/// `name → outcome` lines for the revealed columns, in roster order.
pub fn render_results(round: &Round, revealed: &BTreeSet<usize>) -> String {
    let mut out = String::new();
    for reveal in round.reveals().filter(|reveal| revealed.contains(&reveal.column)) {
        let _ = writeln!(out, "{} → {}", reveal.participant, reveal.outcome);
    }

    if !round.is_empty() && (0..round.len()).all(|column| revealed.contains(&column)) {
        out.push_str(CONFIRMATION);
    } else if out.ends_with('\n') {
        out.pop();
    }
    out
}
