// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/error.rs - Error types for ATA club score files.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use thiserror::Error;

/// Reasons a score file could not be loaded.
///
/// Individual fields never fail to decode; only the line structure of the
/// file can be wrong, and any such problem rejects the whole file.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unable to read score file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected file format: header line is {have} bytes, need {need}")]
    TruncatedHeader { have: usize, need: usize },

    #[error("unexpected file format: line {line} ends with {found:02x?} instead of CRLF")]
    BadTerminator { line: usize, found: [u8; 2] },
}

pub type Result<T> = std::result::Result<T, FormatError>;
