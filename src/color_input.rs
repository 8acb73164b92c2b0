/*
color_input.rs

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

//! Manage the undo and redo lists of the player's color changes.
//!
//! The module only records the operations. Applying them to the level is the job of
//! [`crate::game::Game`].

use crate::level::Color;

/// Color change performed by the player.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorOperation {
    /// Cell ID.
    pub cell_id: usize,

    /// Color of the cell before the operation.
    pub before: Option<Color>,

    /// Color of the cell after the operation.
    pub after: Option<Color>,
}

/// Manage the undo and redo lists.
#[derive(Debug, Clone, Default)]
pub struct ColorInput {
    /// List of undo operations.
    undo_op: Vec<ColorOperation>,

    /// List of redo operations.
    redo_op: Vec<ColorOperation>,
}

impl ColorInput {
    /// Create a [`ColorInput`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.undo_op.clear();
        self.redo_op.clear();
    }

    /// Add the operation to the undo list.
    ///
    /// Operations that do not change the color are not recorded.
    /// A new operation clears the redo list.
    pub fn record(&mut self, cell_id: usize, before: Option<Color>, after: Option<Color>) {
        if before == after {
            return;
        }
        self.undo_op.push(ColorOperation {
            cell_id,
            before,
            after,
        });
        self.redo_op.clear();
    }

    /// Move the last operation to the redo list and return it.
    /// The caller restores [`ColorOperation::before`].
    pub fn undo(&mut self) -> Option<ColorOperation> {
        let op: ColorOperation = self.undo_op.pop()?;
        self.redo_op.push(op);
        Some(op)
    }

    /// Move the last undone operation back to the undo list and return it.
    /// The caller applies [`ColorOperation::after`].
    pub fn redo(&mut self) -> Option<ColorOperation> {
        let op: ColorOperation = self.redo_op.pop()?;
        self.undo_op.push(op);
        Some(op)
    }

    /// Return the length of the undo list.
    pub fn undo_len(&self) -> usize {
        self.undo_op.len()
    }

    /// Return the length of the redo list.
    pub fn redo_len(&self) -> usize {
        self.redo_op.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo() {
        let mut input = ColorInput::new();
        input.record(3, None, Some(Color::Red));
        input.record(3, Some(Color::Red), Some(Color::Yellow));
        assert_eq!(input.undo_len(), 2);

        let op = input.undo().unwrap();
        assert_eq!(op.before, Some(Color::Red));
        assert_eq!((input.undo_len(), input.redo_len()), (1, 1));

        let op = input.redo().unwrap();
        assert_eq!(op.after, Some(Color::Yellow));
        assert_eq!((input.undo_len(), input.redo_len()), (2, 0));
        assert!(input.redo().is_none());
    }

    #[test]
    fn new_operation_clears_redo() {
        let mut input = ColorInput::new();
        input.record(0, None, Some(Color::Red));
        input.undo();
        assert_eq!(input.redo_len(), 1);
        input.record(1, None, Some(Color::Red));
        assert_eq!(input.redo_len(), 0);
    }

    #[test]
    fn no_change_is_not_recorded() {
        let mut input = ColorInput::new();
        input.record(0, None, None);
        assert_eq!(input.undo_len(), 0);
        assert!(input.undo().is_none());
    }
}
