// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/reader.rs - File reader for ATA club score files.
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
 * # `reader` Module
 *
 * This module reads a whole score file into a [Dataset]. The file is a
 * 320-byte header line followed by any number of 318-byte shooter lines,
 * each ending in CRLF. Files compressed with gzip, including concatenated
 * multi-member streams, are detected and decompressed on the fly.
 *
 * ## Usage Example
 *
 * ```no_run
 * use atadata::reader::load;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let dataset = load("ATADATA.DAT")?;
 *
 *     println!("Club Number: {}", dataset.club_number());
 *     for shooter in dataset.shooters() {
 *         println!("{}", shooter.name);
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

use std::fs::File;
use std::io::BufReader;
use std::io::prelude::*;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, trace, warn};

use crate::error::{FormatError, Result};
use crate::field::FixedText;
use crate::parser::{
    CLUB_NUMBER_LEN, Event, HEADER_PAYLOAD_LEN, Header, SHOOTER_PAYLOAD_LEN, Shooter,
};

pub const LINE_TERMINATOR: [u8; 2] = *b"\r\n";

pub const HEADER_LINE_LEN: usize = HEADER_PAYLOAD_LEN + LINE_TERMINATOR.len();
pub const SHOOTER_LINE_LEN: usize = SHOOTER_PAYLOAD_LEN + LINE_TERMINATOR.len();

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

enum ReaderState {
    ReadingHeader,
    ReadingShooters(Header),
}

/// A fully loaded score file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// The club header.
    pub header: Header,
    /// Every shooter, in file order.
    pub shooters: Vec<Shooter>,
}

impl Dataset {
    /// Reads a score file from any byte source.
    ///
    /// The header line must be complete and every line must end in CRLF,
    /// otherwise the whole read fails. A short final shooter line is
    /// dropped.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut line = Vec::with_capacity(HEADER_LINE_LEN);
        let mut line_number = 0;
        let mut shooters = Vec::new();
        let mut state = ReaderState::ReadingHeader;

        loop {
            state = match state {
                ReaderState::ReadingHeader => {
                    let have = read_line(&mut reader, &mut line, HEADER_LINE_LEN)?;
                    line_number += 1;
                    if have < HEADER_LINE_LEN {
                        return Err(FormatError::TruncatedHeader {
                            have,
                            need: HEADER_LINE_LEN,
                        });
                    }

                    let header = Header::from_bytes(strip_terminator(&line, line_number)?);
                    debug!(
                        club_number = %header.club_number,
                        events = header.events.len(),
                        "read header"
                    );
                    ReaderState::ReadingShooters(header)
                }
                ReaderState::ReadingShooters(header) => {
                    let have = read_line(&mut reader, &mut line, SHOOTER_LINE_LEN)?;
                    if have == 0 {
                        debug!(shooters = shooters.len(), "reached end of score file");
                        return Ok(Self { header, shooters });
                    }

                    line_number += 1;
                    if have < SHOOTER_LINE_LEN {
                        warn!(
                            line = line_number,
                            have,
                            need = SHOOTER_LINE_LEN,
                            "discarding partial trailing line"
                        );
                        return Ok(Self { header, shooters });
                    }

                    let shooter = Shooter::from_bytes(strip_terminator(&line, line_number)?);
                    trace!(line = line_number, ata_number = %shooter.ata_number, "read shooter");
                    shooters.push(shooter);
                    ReaderState::ReadingShooters(header)
                }
            };
        }
    }

    /// Opens and reads a score file, which may be gzip-compressed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        if reader.fill_buf()?.starts_with(&GZIP_MAGIC) {
            debug!(path = %path.display(), "reading gzip-compressed score file");
            Self::from_reader(MultiGzDecoder::new(reader))
        } else {
            debug!(path = %path.display(), "reading score file");
            Self::from_reader(reader)
        }
    }

    pub fn club_number(&self) -> &FixedText<CLUB_NUMBER_LEN> {
        &self.header.club_number
    }

    /// The events of the shoot. Only score slots below `events().len()` are
    /// meaningful.
    pub fn events(&self) -> &[Event] {
        &self.header.events
    }

    pub fn shooters(&self) -> &[Shooter] {
        &self.shooters
    }
}

/// Loads the score file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    Dataset::from_path(path)
}

/// Reads up to `len` bytes into `buf`, returning how many were read. Fewer
/// than `len` only happens at the end of the input.
fn read_line<R: Read>(reader: &mut R, buf: &mut Vec<u8>, len: usize) -> Result<usize> {
    buf.clear();
    let have = reader.by_ref().take(len as u64).read_to_end(buf)?;
    Ok(have)
}

/// Checks the CRLF at the end of a full line and returns the payload.
fn strip_terminator(line: &[u8], line_number: usize) -> Result<&[u8]> {
    let (payload, terminator) = line.split_at(line.len() - LINE_TERMINATOR.len());
    if terminator != LINE_TERMINATOR {
        return Err(FormatError::BadTerminator {
            line: line_number,
            found: [terminator[0], terminator[1]],
        });
    }
    Ok(payload)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use crate::parser::EventKind;
    use crate::parser::tests::{header_payload, shooter_payload};

    pub(crate) fn crlf(mut payload: Vec<u8>) -> Vec<u8> {
        payload.extend_from_slice(&LINE_TERMINATOR);
        payload
    }

    /// A one-event Handicap shoot for club 001234 with a single shooter.
    pub(crate) fn sample_file() -> Vec<u8> {
        let mut file = crlf(header_payload("001234", &["05112024H 025"]));
        file.extend(crlf(shooter_payload("1234567DOE, JANE", &["01802527.0"])));
        file
    }

    #[test]
    fn test_line_lengths() {
        assert_eq!(HEADER_LINE_LEN, 320);
        assert_eq!(SHOOTER_LINE_LEN, 318);
    }

    #[test]
    fn test_single_handicap_event() {
        let dataset = Dataset::from_reader(sample_file().as_slice()).unwrap();

        assert_eq!(dataset.club_number(), &"001234");
        assert_eq!(dataset.events().len(), 1);
        assert_eq!(dataset.events()[0].kind, EventKind::Handicap);
        assert_eq!(dataset.events()[0].targets, 25);

        assert_eq!(dataset.shooters().len(), 1);
        let scores = &dataset.shooters()[0].scores;
        assert_eq!(scores[0].hit, 18);
        assert_eq!(scores[0].shot_at, 25);
        assert!(scores[1..].iter().all(|s| s.shot_at == 0));
    }

    #[test]
    fn test_header_only() {
        let file = crlf(header_payload("001234", &["05112024S 100"]));
        let dataset = Dataset::from_reader(file.as_slice()).unwrap();
        assert_eq!(dataset.events().len(), 1);
        assert!(dataset.shooters().is_empty());
    }

    #[test]
    fn test_shooters_keep_file_order() {
        let mut file = crlf(header_payload("001234", &["05112024S 100"]));
        for name in ["1000001ALPHA", "1000002BRAVO", "1000003CHARLIE"] {
            file.extend(crlf(shooter_payload(name, &["090100    "])));
        }
        let dataset = Dataset::from_reader(file.as_slice()).unwrap();
        let names: Vec<String> = dataset.shooters().iter().map(|s| s.name.trimmed()).collect();
        assert_eq!(names, ["ALPHA", "BRAVO", "CHARLIE"]);
    }

    #[test]
    fn test_empty_input() {
        let err = Dataset::from_reader(&b""[..]).unwrap_err();
        assert!(matches!(err, FormatError::TruncatedHeader { have: 0, .. }));
    }

    #[test]
    fn test_short_header() {
        let file = header_payload("001234", &[]);
        let err = Dataset::from_reader(&file[..100]).unwrap_err();
        assert!(matches!(err, FormatError::TruncatedHeader { have: 100, need: 320 }));
    }

    #[test]
    fn test_bad_header_terminator() {
        let mut file = header_payload("001234", &["05112024H 025"]);
        file.extend_from_slice(b"\n\n");
        let err = Dataset::from_reader(file.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            FormatError::BadTerminator {
                line: 1,
                found: [b'\n', b'\n']
            }
        ));
        assert!(err.to_string().starts_with("unexpected file format"));
    }

    #[test]
    fn test_bad_shooter_terminator() {
        let mut file = sample_file();
        let mut bad = shooter_payload("7654321SMITH, JOHN", &[]);
        bad.extend_from_slice(b"\r ");
        file.extend(bad);
        let err = Dataset::from_reader(file.as_slice()).unwrap_err();
        assert!(matches!(err, FormatError::BadTerminator { line: 3, .. }));
    }

    #[test]
    fn test_truncated_trailing_line_is_dropped() {
        let mut file = sample_file();
        let partial = crlf(shooter_payload("7654321SMITH, JOHN", &[]));
        file.extend_from_slice(&partial[..SHOOTER_LINE_LEN - 1]);

        let dataset = Dataset::from_reader(file.as_slice()).unwrap();
        assert_eq!(dataset.shooters().len(), 1);
        assert_eq!(dataset.shooters()[0].ata_number, "1234567");
    }
}
