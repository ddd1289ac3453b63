// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/parser.rs - Record parsers for ATA club score files.
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
 * # `parser` Module
 *
 * This module builds typed records from the fixed-offset windows of a score
 * file line. The header line describes the club and up to 24 events; every
 * following line describes one shooter and carries 24 score slots that line
 * up with the header's event slots.
 *
 * ## Usage Example
 *
 * ```
 * use atadata::parser::{Event, EventKind};
 *
 * let event = Event::from_bytes(b"05112024H 025");
 * assert_eq!(event.kind, EventKind::Handicap);
 * assert_eq!(event.targets, 25);
 * assert_eq!(event.display_date(), "05/11/2024");
 * ```
 */

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::field::{FixedText, decode_decimal, decode_u16, window};

/// Number of event slots in the header and score slots per shooter.
pub const EVENT_SLOTS: usize = 24;

pub const CLUB_NUMBER_LEN: usize = 6;

pub const EVENT_DATE_LEN: usize = 8;
/// date(8) + type(1) + separator(1) + targets(3)
pub const EVENT_RECORD_LEN: usize = 13;

/// hit(3) + shot_at(3) + yardage(4)
pub const SCORE_RECORD_LEN: usize = 10;

pub const ATA_NUMBER_LEN: usize = 7;
pub const NAME_LEN: usize = 18;
pub const ADDRESS_LEN: usize = 25;
pub const CITY_LEN: usize = 18;
pub const STATE_LEN: usize = 2;
pub const POSTAL_CODE_LEN: usize = 5;
pub const CLASSIFICATION_LEN: usize = 1;

const ATA_NUMBER_OFFSET: usize = 0;
const NAME_OFFSET: usize = ATA_NUMBER_OFFSET + ATA_NUMBER_LEN;
const ADDRESS_OFFSET: usize = NAME_OFFSET + NAME_LEN;
const CITY_OFFSET: usize = ADDRESS_OFFSET + ADDRESS_LEN;
const STATE_OFFSET: usize = CITY_OFFSET + CITY_LEN;
const POSTAL_CODE_OFFSET: usize = STATE_OFFSET + STATE_LEN;
const CLASSIFICATION_OFFSET: usize = POSTAL_CODE_OFFSET + POSTAL_CODE_LEN;
/// Offset of the first score window in a shooter line.
pub const SCORES_OFFSET: usize = CLASSIFICATION_OFFSET + CLASSIFICATION_LEN;

/// Header line length, excluding the CRLF terminator.
pub const HEADER_PAYLOAD_LEN: usize = CLUB_NUMBER_LEN + EVENT_SLOTS * EVENT_RECORD_LEN;

/// Shooter line length, excluding the CRLF terminator.
pub const SHOOTER_PAYLOAD_LEN: usize = SCORES_OFFSET + EVENT_SLOTS * SCORE_RECORD_LEN;

/// The discipline of an event slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    Singles,
    Doubles,
    Handicap,
    /// The slot does not hold an event.
    #[default]
    None,
}

impl EventKind {
    /// Maps a type tag byte (`S`, `D` or `H`) to its kind.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            b'S' => EventKind::Singles,
            b'D' => EventKind::Doubles,
            b'H' => EventKind::Handicap,
            _ => EventKind::None,
        }
    }

    pub fn is_event(&self) -> bool {
        *self != EventKind::None
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Singles => write!(f, "Singles"),
            EventKind::Doubles => write!(f, "Doubles"),
            EventKind::Handicap => write!(f, "Handicap"),
            EventKind::None => Ok(()),
        }
    }
}

/// One event slot from the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Event {
    /// The event date as written in the file, usually `MMDDYYYY`.
    pub date: FixedText<EVENT_DATE_LEN>,
    pub kind: EventKind,
    /// Number of targets thrown. Always 0 when `kind` is [EventKind::None].
    pub targets: u16,
}

impl Event {
    /// Parses a 13-byte event window.
    pub fn from_bytes(raw: &[u8]) -> Self {
        let date = FixedText::from_window(window(raw, 0, EVENT_DATE_LEN));
        let kind = window(raw, EVENT_DATE_LEN, 1)
            .first()
            .map_or(EventKind::None, |&tag| EventKind::from_tag(tag));

        // Byte 9 is a separator and carries nothing.
        let targets = if kind.is_event() {
            decode_u16(window(raw, EVENT_DATE_LEN + 2, 3))
        } else {
            0
        };

        Self {
            date,
            kind,
            targets,
        }
    }

    /// The date laid out as `MM/DD/YYYY`, without checking that it is real.
    pub fn display_date(&self) -> String {
        let d = self.date.as_bytes();
        let part = |range: std::ops::Range<usize>| String::from_utf8_lossy(&d[range]).to_string();
        format!("{}/{}/{}", part(0..2), part(2..4), part(4..8))
    }

    /// The date as a calendar date, if it is a valid `MMDDYYYY` date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let text = std::str::from_utf8(self.date.as_bytes()).ok()?;
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDate::parse_from_str(text, "%m%d%Y").ok()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} {}", self.display_date(), self.targets, self.kind)
    }
}

/// The club header line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// The club identifier. Not necessarily numeric.
    pub club_number: FixedText<CLUB_NUMBER_LEN>,
    /// The events of the shoot, in slot order.
    ///
    /// This is the run of slots before the first empty one. Score slot `i`
    /// of every shooter belongs to `events[i]`.
    pub events: Vec<Event>,
}

impl Header {
    /// Parses the header line payload (without its terminator).
    pub fn from_bytes(line: &[u8]) -> Self {
        let club_number = FixedText::from_window(window(line, 0, CLUB_NUMBER_LEN));

        let slots = (0..EVENT_SLOTS).map(|index| {
            let start = CLUB_NUMBER_LEN + index * EVENT_RECORD_LEN;
            Event::from_bytes(window(line, start, EVENT_RECORD_LEN))
        });

        let mut events = Vec::with_capacity(EVENT_SLOTS);
        let mut gap_at = None;
        for (index, event) in slots.enumerate() {
            match gap_at {
                None if event.kind.is_event() => events.push(event),
                None => gap_at = Some(index),
                Some(gap) if event.kind.is_event() => {
                    warn!(
                        slot = index,
                        gap,
                        kind = %event.kind,
                        "ignoring event after an empty slot"
                    );
                }
                Some(_) => (),
            }
        }

        Self {
            club_number,
            events,
        }
    }

    /// Looks up an event by its position in [Header::events].
    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }
}

/// One shooter's result in one event slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    /// Targets broken.
    pub hit: u16,
    /// Targets attempted. 0 means the shooter did not enter the event.
    pub shot_at: u16,
    /// Handicap yardage, 0 when not recorded.
    pub yardage: Decimal,
}

impl Score {
    /// Parses a 10-byte score window.
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            hit: decode_u16(window(raw, 0, 3)),
            shot_at: decode_u16(window(raw, 3, 3)),
            yardage: decode_decimal(window(raw, 6, 4)),
        }
    }

    /// Whether the shooter took part in this event.
    pub fn competed(&self) -> bool {
        self.shot_at != 0
    }

    pub fn has_yardage(&self) -> bool {
        self.yardage > Decimal::ZERO
    }
}

/// A competitor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shooter {
    pub ata_number: FixedText<ATA_NUMBER_LEN>,
    pub name: FixedText<NAME_LEN>,
    pub address: FixedText<ADDRESS_LEN>,
    pub city: FixedText<CITY_LEN>,
    pub state: FixedText<STATE_LEN>,
    pub postal_code: FixedText<POSTAL_CODE_LEN>,
    pub classification: FixedText<CLASSIFICATION_LEN>,
    /// One score per raw event slot, whether or not the header uses it.
    pub scores: [Score; EVENT_SLOTS],
}

impl Shooter {
    /// Parses a shooter line payload (without its terminator).
    pub fn from_bytes(line: &[u8]) -> Self {
        let scores = std::array::from_fn(|index| {
            let start = SCORES_OFFSET + index * SCORE_RECORD_LEN;
            Score::from_bytes(window(line, start, SCORE_RECORD_LEN))
        });

        Self {
            ata_number: FixedText::from_window(window(line, ATA_NUMBER_OFFSET, ATA_NUMBER_LEN)),
            name: FixedText::from_window(window(line, NAME_OFFSET, NAME_LEN)),
            address: FixedText::from_window(window(line, ADDRESS_OFFSET, ADDRESS_LEN)),
            city: FixedText::from_window(window(line, CITY_OFFSET, CITY_LEN)),
            state: FixedText::from_window(window(line, STATE_OFFSET, STATE_LEN)),
            postal_code: FixedText::from_window(window(line, POSTAL_CODE_OFFSET, POSTAL_CODE_LEN)),
            classification: FixedText::from_window(window(
                line,
                CLASSIFICATION_OFFSET,
                CLASSIFICATION_LEN,
            )),
            scores,
        }
    }

    /// The score in raw slot `index`.
    pub fn score(&self, index: usize) -> Option<&Score> {
        self.scores.get(index)
    }
}
