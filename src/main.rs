/*
main.rs

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

use log::debug;
use std::process::ExitCode;

use nabla::cli_options;
use nabla::config::{PKGNAME, VERSION};

fn main() -> ExitCode {
    let ret: u8 = cli_options::parse();
    debug!("{PKGNAME} {VERSION} exiting with code {ret}");
    ExitCode::from(ret)
}
