/*
lib.rs

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

//! Core of the Nabla four-color map puzzle.
//!
//! [`generator`] builds random [`level::Level`] objects: a map of cells split from a Voronoi
//! diagram.
//! [`game::Game`] manages the player's coloring of these cells, and [`locator`] finds the cell
//! under a pointer position.

pub mod cli_options;
pub mod color_input;
pub mod config;
pub mod game;
pub mod generator;
pub mod level;
pub mod locator;
