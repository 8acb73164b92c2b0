/*
game.rs

Copyright 2025 Hervé Quatremain

This file is part of Nabla.

Nabla is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Nabla is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Nabla. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Manage the status of a game in progress.
//!
//! The player colors the cells of the level, and wins when every cell is colored and no two
//! adjacent cells share the same color.

use log::{debug, info};
use std::fmt;

use crate::color_input::{ColorInput, ColorOperation};
use crate::generator::diagram::Point;
use crate::level::{Color, Level};
use crate::locator;

/// Two adjacent cells with the same color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub a: usize,
    pub b: usize,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.a, self.b)
    }
}

/// Result of [`Game::evaluate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether every cell has a color.
    pub all_colored: bool,

    /// Whether every cell is colored and no two adjacent cells share the same color.
    pub win: bool,

    /// Last pair of adjacent cells with the same color, when all the cells are colored.
    pub conflict: Option<Conflict>,
}

/// Type of player gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GestureKind {
    /// Short click or tap: select the next color.
    Tap,

    /// Long press: remove the color.
    Press,
}

/// Player gesture, in level coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: GestureKind,
    pub point: Point,
}

/// What [`Game::process_input`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The gesture was outside all the cells, or the level is already solved.
    Missed,

    /// The cell got its next color.
    Colored { cell: usize, evaluation: Evaluation },

    /// The cell lost its color.
    Cleared { cell: usize },
}

/// Manage the status of the game in progress.
#[derive(Debug, Default)]
pub struct Game {
    /// Level being played. The cell colors are the game state.
    level: Level,

    /// Undo and redo lists.
    color_input: ColorInput,

    /// Whether the level is solved.
    solved: bool,
}

impl Game {
    /// Create a [`Game`] object for the given level.
    ///
    /// Colors that the level might already have are kept.
    pub fn new(level: Level) -> Self {
        let mut game: Game = Self {
            level,
            color_input: ColorInput::new(),
            solved: false,
        };
        game.refresh_solved();
        game
    }

    /// Replace the level and start a new game.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.reset();
    }

    /// Restart the game: remove all the colors but keep the level.
    pub fn reset(&mut self) {
        self.level.clear_colors();
        self.color_input.clear();
        self.solved = false;
    }

    /// Return the level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Give the cell its next color. An uncolored cell gets the first color.
    ///
    /// Nothing happens if the cell does not exist.
    pub fn select(&mut self, cell_id: usize) {
        let Some(before) = self.level.get(cell_id).map(|c| c.color) else {
            return;
        };
        let after: Color = before.map_or(Color::default(), Color::next);
        self.apply(cell_id, before, Some(after));
    }

    /// Remove the color of the cell.
    ///
    /// Nothing happens if the cell does not exist.
    pub fn clear(&mut self, cell_id: usize) {
        let Some(before) = self.level.get(cell_id).map(|c| c.color) else {
            return;
        };
        self.apply(cell_id, before, None);
    }

    /// Change the color of the cell and record the operation for undo.
    fn apply(&mut self, cell_id: usize, before: Option<Color>, after: Option<Color>) {
        debug!("Cell {cell_id}: {before:?} -> {after:?}");
        self.level.set_color(cell_id, after);
        self.color_input.record(cell_id, before, after);
        self.refresh_solved();
    }

    /// Verify the coloring.
    pub fn evaluate(&self) -> Evaluation {
        let cells = self.level.cells();
        let all_colored: bool = cells.iter().all(|c| c.color.is_some());
        if !all_colored {
            return Evaluation {
                all_colored,
                win: false,
                conflict: None,
            };
        }

        let mut conflict: Option<Conflict> = None;
        for cell in cells {
            for &n in &cell.neighbours {
                if self.level.color(n) == cell.color {
                    conflict = Some(Conflict { a: cell.id, b: n });
                }
            }
        }
        Evaluation {
            all_colored,
            win: conflict.is_none(),
            conflict,
        }
    }

    /// Whether the level is successfully solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    fn refresh_solved(&mut self) {
        let e: Evaluation = self.evaluate();
        let solved: bool = e.all_colored && e.win;
        if solved && !self.solved {
            info!("Level solved");
        }
        self.solved = solved;
    }

    /// Process a player gesture.
    ///
    /// Gestures are ignored once the level is solved.
    pub fn process_input(&mut self, event: &InputEvent) -> InputOutcome {
        if self.solved {
            return InputOutcome::Missed;
        }
        let Some(cell) = locator::locate(&event.point, self.level.cells()) else {
            return InputOutcome::Missed;
        };
        match event.kind {
            GestureKind::Tap => {
                self.select(cell);
                let evaluation: Evaluation = self.evaluate();
                if let Some(c) = evaluation.conflict {
                    debug!("Conflict: {c}");
                }
                InputOutcome::Colored { cell, evaluation }
            }
            GestureKind::Press => {
                self.clear(cell);
                InputOutcome::Cleared { cell }
            }
        }
    }

    /// Undo the last color change.
    pub fn undo(&mut self) {
        if let Some(op) = self.color_input.undo() {
            self.restore(&op, op.before);
        }
    }

    /// Redo the last undone color change.
    pub fn redo(&mut self) {
        if let Some(op) = self.color_input.redo() {
            self.restore(&op, op.after);
        }
    }

    fn restore(&mut self, op: &ColorOperation, color: Option<Color>) {
        self.level.set_color(op.cell_id, color);
        self.refresh_solved();
    }

    /// Return the length of the undo list.
    pub fn undo_len(&self) -> usize {
        self.color_input.undo_len()
    }

    /// Return the length of the redo list.
    pub fn redo_len(&self) -> usize {
        self.color_input.redo_len()
    }
}
