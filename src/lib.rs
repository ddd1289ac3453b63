// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Reader and parser library for ATA club score files.
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

/*!
 * # `atadata` Crate
 *
 * A library for reading the fixed-width score files that trapshooting clubs
 * submit to the ATA. A file holds a club header with up to 24 events,
 * followed by one line per shooter with that shooter's score in every event
 * slot.
 *
 * The crate is organized as a pipeline:
 *
 * 1. [field]: Decodes fixed-width byte windows into text and numbers.
 * 2. [parser]: Builds events, scores, shooters, and the header from lines.
 * 3. [reader]: Reads a whole file into a [reader::Dataset].
 * 4. [interpreter]: Ranks events and collects per-shooter results.
 *
 * ## Usage Example
 *
 * ```no_run
 * use atadata::reader::load;
 * use atadata::interpreter::ShooterHistory;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Load the file
 *     let dataset = load("ATADATA.DAT")?;
 *
 *     println!("Club Number: {}", dataset.club_number());
 *     println!(
 *         "{} events and {} shooters loaded.",
 *         dataset.events().len(),
 *         dataset.shooters().len()
 *     );
 *
 *     // Print everything the first shooter shot
 *     if let Some(history) = ShooterHistory::for_shooter(&dataset, 0) {
 *         println!("{}", history.shooter.name);
 *         for entry in &history.entries {
 *             println!("  {}   {}/{}", entry.event, entry.score.hit, entry.score.shot_at);
 *         }
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

pub mod error;
pub mod field;
pub mod interpreter;
pub mod parser;
pub mod reader;

pub use error::{FormatError, Result};
pub use reader::{Dataset, load};
