// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unicode ladder renderer.
//!
//! Layout, top to bottom: participant labels, the ladder body, then the outcome labels. Lanes are
//! evenly spaced; ladder row `r` is drawn on body line `1 + 2r`, so the token can rest on the
//! blank lane segment between two rows.

use std::collections::BTreeSet;
use std::fmt;

use crate::lottery::step;
use crate::model::{Assignment, Ladder, Participant};
use crate::session::Round;

use super::text::{centered_start, text_len, truncate_with_ellipsis};
use super::{Canvas, CanvasError, LineSpan, TOKEN};

/// Labels longer than this are cut with an ellipsis.
pub const MAX_LABEL_WIDTH: usize = 10;
const MIN_LANE_SPACING: usize = 4;
const CONCEALED_LABEL: &str = "?";

/// A token that started on lane `start` and has passed `rows_done` ladder rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPosition {
    pub start: usize,
    pub rows_done: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadderRenderOptions {
    pub token: Option<TokenPosition>,
    /// Bottom lanes whose label is drawn as `?`.
    pub concealed: BTreeSet<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderRender {
    pub text: String,
    /// Column of each lane in the rendered text.
    pub lane_x: Vec<usize>,
    pub bottom_label_y: usize,
    /// Cells the token has travelled through, top to bottom.
    pub path: Vec<LineSpan>,
    /// `(x, y)` of the token glyph.
    pub token: Option<(usize, usize)>,
}

pub fn render_round_unicode(
    round: &Round,
    options: &LadderRenderOptions,
) -> Result<LadderRender, LadderRenderError> {
    render_ladder_unicode(round.participants(), round.ladder(), options)
}

pub fn render_ladder_unicode(
    participants: &[Participant],
    ladder: &Ladder,
    options: &LadderRenderOptions,
) -> Result<LadderRender, LadderRenderError> {
    let columns = ladder.columns();
    if participants.len() != columns {
        return Err(LadderRenderError::ColumnMismatch { participants: participants.len(), columns });
    }
    if let Some(token) = options.token {
        if token.start >= columns {
            return Err(LadderRenderError::TokenOutOfRange { start: token.start, columns });
        }
    }

    let label_width = participants
        .iter()
        .map(|p| text_len(p.as_str()))
        .max()
        .unwrap_or(1)
        .clamp(1, MAX_LABEL_WIDTH);
    let spacing = (label_width + 2).max(MIN_LANE_SPACING);
    let lane_x = (0..columns).map(|lane| lane * spacing + spacing / 2).collect::<Vec<_>>();

    let rows = ladder.rows();
    let body_top = 1;
    let body_bottom = body_top + 2 * rows;
    let bottom_label_y = body_bottom + 1;
    let mut canvas = Canvas::new(columns * spacing, bottom_label_y + 1)?;

    for (lane, participant) in participants.iter().enumerate() {
        let x = lane_x[lane];
        let top = truncate_with_ellipsis(participant.as_str(), label_width);
        canvas.write_str(centered_start(x, text_len(&top)), 0, &top)?;

        let bottom = if options.concealed.contains(&lane) {
            CONCEALED_LABEL.to_owned()
        } else {
            top
        };
        canvas.write_str(centered_start(x, text_len(&bottom)), bottom_label_y, &bottom)?;

        canvas.draw_vline(x, body_top, body_bottom)?;
    }

    for rung in ladder.rungs() {
        let y = rung_line(body_top, rung.row());
        canvas.draw_hline(lane_x[rung.left()], lane_x[rung.right()], y)?;
    }

    let mut path = Vec::new();
    let mut token = None;
    if let Some(position) = options.token {
        let rows_done = position.rows_done.min(rows);
        let token_y = body_top + 2 * rows_done;
        let mut lane = position.start;

        for y in body_top..=token_y {
            let crossing = (y > body_top && (y - body_top) % 2 == 1)
                .then(|| (y - body_top - 1) / 2)
                .and_then(|row| {
                    ladder.rungs()[ladder.row_range(row)].iter().find(|rung| rung.touches(lane))
                });
            match crossing {
                Some(rung) => {
                    path.push((y, lane_x[rung.left()], lane_x[rung.right()]));
                    lane = step(lane, rung);
                }
                None => path.push((y, lane_x[lane], lane_x[lane])),
            }
        }

        canvas.set(lane_x[lane], token_y, TOKEN)?;
        token = Some((lane_x[lane], token_y));
    }

    Ok(LadderRender { text: canvas.to_trimmed_string(), lane_x, bottom_label_y, path, token })
}

/// Bottom lanes still hidden when only the columns in `revealed` have been shown.
pub fn concealed_lanes(assignment: &Assignment, revealed: &BTreeSet<usize>) -> BTreeSet<usize> {
    (0..assignment.len())
        .filter(|column| !revealed.contains(column))
        .filter_map(|column| assignment.target(column))
        .collect()
}

fn rung_line(body_top: usize, row: usize) -> usize {
    body_top + 1 + 2 * row
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderRenderError {
    ColumnMismatch { participants: usize, columns: usize },
    TokenOutOfRange { start: usize, columns: usize },
    Canvas(CanvasError),
}

impl fmt::Display for LadderRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnMismatch { participants, columns } => {
                write!(f, "{participants} labels for a ladder with {columns} lanes")
            }
            Self::TokenOutOfRange { start, columns } => {
                write!(f, "token lane {start} is outside a ladder with {columns} lanes")
            }
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for LadderRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CanvasError> for LadderRenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}
