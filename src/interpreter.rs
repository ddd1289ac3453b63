// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/interpreter.rs - Result queries for ATA club score files.
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
 * # `interpreter` Module
 *
 * This module answers the two questions people ask of a score file: who
 * won a given event, and what did a given shooter shoot. Only the events
 * listed in the header are considered, and a score with nothing shot at is
 * treated as "did not enter".
 *
 * ## Usage Example
 *
 * ```no_run
 * use atadata::reader::load;
 * use atadata::interpreter::EventStandings;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let dataset = load("ATADATA.DAT")?;
 *
 *     if let Some(standings) = EventStandings::for_event(&dataset, 0) {
 *         println!("{}", standings.event);
 *         for placing in &standings.placings {
 *             println!("{:3} {}", placing.score.hit, placing.shooter.name);
 *         }
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

use crate::parser::{Event, Score, Shooter};
use crate::reader::Dataset;

/// A shooter's result in one event.
#[derive(Debug, Clone)]
pub struct Placing<'a> {
    pub shooter: &'a Shooter,
    pub score: Score,
}

/// Everyone who shot an event, best score first.
#[derive(Debug, Clone)]
pub struct EventStandings<'a> {
    pub event: &'a Event,
    /// Ordered by targets hit, highest first. Ties stay in file order.
    pub placings: Vec<Placing<'a>>,
}

impl<'a> EventStandings<'a> {
    /// Ranks the shooters of the event at `index` in the header's event list.
    ///
    /// # Returns
    ///
    /// `None` if `index` is not one of the header's events.
    pub fn for_event(dataset: &'a Dataset, index: usize) -> Option<Self> {
        let event = dataset.events().get(index)?;

        let mut placings: Vec<Placing<'a>> = dataset
            .shooters()
            .iter()
            .filter_map(|shooter| {
                let score = *shooter.score(index)?;
                score.competed().then_some(Placing { shooter, score })
            })
            .collect();

        // sort_by is stable, which keeps tied shooters in file order
        placings.sort_by(|a, b| b.score.hit.cmp(&a.score.hit));

        Some(Self { event, placings })
    }

    pub fn len(&self) -> usize {
        self.placings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placings.is_empty()
    }
}

/// One event a shooter took part in.
#[derive(Debug, Clone)]
pub struct HistoryEntry<'a> {
    pub event: &'a Event,
    pub score: Score,
}

/// A shooter and the events they shot, in header order.
#[derive(Debug, Clone)]
pub struct ShooterHistory<'a> {
    pub shooter: &'a Shooter,
    pub entries: Vec<HistoryEntry<'a>>,
}

impl<'a> ShooterHistory<'a> {
    /// Collects the results of the shooter at `index` in file order.
    ///
    /// Score slots past the last header event are never reported.
    pub fn for_shooter(dataset: &'a Dataset, index: usize) -> Option<Self> {
        let shooter = dataset.shooters().get(index)?;

        let entries = dataset
            .events()
            .iter()
            .zip(shooter.scores.iter())
            .filter(|(_, score)| score.competed())
            .map(|(event, score)| HistoryEntry {
                event,
                score: *score,
            })
            .collect();

        Some(Self { shooter, entries })
    }
}
