// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Width in terminal cells, counting one cell per `char`.
pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to `max_len` cells, marking the cut with `…`.
pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if text_len(text) <= max_len => text.to_owned(),
        1 => "…".to_owned(),
        _ => text.chars().take(max_len - 1).chain(std::iter::once('…')).collect(),
    }
}

/// Left edge that centres `len` cells on column `center`.
pub(crate) fn centered_start(center: usize, len: usize) -> usize {
    center.saturating_sub(len.saturating_sub(1) / 2)
}
