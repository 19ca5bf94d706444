// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering for ladders and results.
//!
//! Renderers draw onto a [`Canvas`] and return plain Unicode text plus cell coordinates that the
//! TUI uses for highlighting. They read a round; they never change it.

use std::fmt;

pub mod ladder;
pub mod results;
mod text;

pub use ladder::{
    concealed_lanes, render_ladder_unicode, render_round_unicode, LadderRender,
    LadderRenderError, LadderRenderOptions, TokenPosition,
};
pub use results::{render_results, CONFIRMATION};

/// A run of highlighted cells on one rendered line: `(y, x0, x1)`, inclusive.
pub type LineSpan = (usize, usize, usize);

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const TOKEN: char = '●';

/// Which neighbours a box-drawing cell connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges(u8);

impl Edges {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(1 << 1);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn glyph(self) -> char {
        const L: u8 = Edges::LEFT.0;
        const R: u8 = Edges::RIGHT.0;
        const U: u8 = Edges::UP.0;
        const D: u8 = Edges::DOWN.0;

        match self.0 {
            0 => ' ',
            x if x == L | R || x == L || x == R => BOX_HORIZONTAL,
            x if x == U | D || x == U || x == D => BOX_VERTICAL,
            x if x == R | D => '┌',
            x if x == L | D => '┐',
            x if x == R | U => '└',
            x if x == L | U => '┘',
            x if x == U | D | R => '├',
            x if x == U | D | L => '┤',
            x if x == L | R | D => '┬',
            x if x == L | R | U => '┴',
            _ => '┼',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Char(char),
    Box(Edges),
}

/// Bounds-checked character grid.
///
/// Box-drawing strokes accumulate edges per cell, so a rung ending on a lane renders as `├` or
/// `┤` instead of overwriting the lane. Plain characters replace whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![Cell::Char(' '); len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(match self.cells[idx] {
            Cell::Char(ch) => ch,
            Cell::Box(edges) => edges.glyph(),
        })
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = Cell::Char(ch);
        Ok(())
    }

    /// Adds box-drawing edges to the cell at `(x, y)`.
    pub fn connect(&mut self, x: usize, y: usize, edges: Edges) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = match self.cells[idx] {
            Cell::Box(existing) => Cell::Box(existing.union(edges)),
            Cell::Char(_) => Cell::Box(edges),
        };
        Ok(())
    }

    /// Writes `text` starting at `(x, y)`, clipped at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        self.check(x.min(self.width.saturating_sub(1)), y)?;
        for (offset, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(offset).filter(|cx| *cx < self.width) else {
                break;
            };
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Draws a vertical stroke over `y0..=y1`. Nothing is drawn if any cell is out of bounds.
    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        self.check(x, top)?;
        self.check(x, bottom)?;

        for y in top..=bottom {
            let mut edges = Edges::NONE;
            if y > top {
                edges = edges.union(Edges::UP);
            }
            if y < bottom {
                edges = edges.union(Edges::DOWN);
            }
            self.connect(x, y, if edges.is_empty() { Edges::UP } else { edges })?;
        }
        Ok(())
    }

    /// Draws a horizontal stroke over `x0..=x1`. Nothing is drawn if any cell is out of bounds.
    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (left, right) = (x0.min(x1), x0.max(x1));
        self.check(left, y)?;
        self.check(right, y)?;

        for x in left..=right {
            let mut edges = Edges::NONE;
            if x > left {
                edges = edges.union(Edges::LEFT);
            }
            if x < right {
                edges = edges.union(Edges::RIGHT);
            }
            self.connect(x, y, if edges.is_empty() { Edges::LEFT } else { edges })?;
        }
        Ok(())
    }

    /// Rendered text with trailing blanks and trailing empty lines removed.
    pub fn to_trimmed_string(&self) -> String {
        let rendered = self.to_string();
        let mut lines = rendered.lines().map(|line| line.trim_end()).collect::<Vec<_>>();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn check(&self, x: usize, y: usize) -> Result<(), CanvasError> {
        self.index_of(x, y).map(|_| ())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                let ch = match self.cells[y * self.width + x] {
                    Cell::Char(ch) => ch,
                    Cell::Box(edges) => edges.glyph(),
                };
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}
