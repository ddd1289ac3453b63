// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  tests/load_files.rs - On-disk loading tests for ATA club score files.
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

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use atadata::FormatError;
use atadata::interpreter::EventStandings;
use atadata::parser::{
    EVENT_RECORD_LEN, EVENT_SLOTS, EventKind, HEADER_PAYLOAD_LEN, SCORE_RECORD_LEN,
    SCORES_OFFSET, SHOOTER_PAYLOAD_LEN,
};
use atadata::reader::{LINE_TERMINATOR, load};

fn header_line(club: &str, events: &[&str]) -> Vec<u8> {
    let mut line = club.as_bytes().to_vec();
    for event in events {
        assert_eq!(event.len(), EVENT_RECORD_LEN);
        line.extend_from_slice(event.as_bytes());
    }
    line.resize(HEADER_PAYLOAD_LEN, b' ');
    line.extend_from_slice(&LINE_TERMINATOR);
    line
}

fn shooter_line(identity: &str, scores: &[&str]) -> Vec<u8> {
    let mut line = format!("{:<width$}", identity, width = SCORES_OFFSET).into_bytes();
    assert_eq!(line.len(), SCORES_OFFSET);
    for index in 0..EVENT_SLOTS {
        let score = scores.get(index).copied().unwrap_or("000000    ");
        assert_eq!(score.len(), SCORE_RECORD_LEN);
        line.extend_from_slice(score.as_bytes());
    }
    assert_eq!(line.len(), SHOOTER_PAYLOAD_LEN);
    line.extend_from_slice(&LINE_TERMINATOR);
    line
}

/// Club 001234, one 25-target Handicap event, one shooter with 18/25.
fn club_file() -> Vec<u8> {
    let mut file = header_line("001234", &["05112024H 025"]);
    let identity = concat!(
        "9876543",
        "SMITH, JOHN       ",
        "1 ELM ST                 ",
        "AMES              ",
        "IA",
        "50010",
        "A",
    );
    file.extend(shooter_line(identity, &["01802527.0"]));
    file
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(bytes).expect("failed to write temp file");
    file.flush().expect("failed to flush temp file");
    file
}

#[test]
fn load_plain_file() {
    let file = write_temp(&club_file());
    let dataset = load(file.path()).expect("failed to load score file");

    assert_eq!(dataset.club_number(), &"001234");
    assert_eq!(dataset.events().len(), 1);
    assert_eq!(dataset.events()[0].kind, EventKind::Handicap);
    assert_eq!(dataset.events()[0].targets, 25);

    assert_eq!(dataset.shooters().len(), 1);
    let shooter = &dataset.shooters()[0];
    assert_eq!(shooter.ata_number, "9876543");
    assert_eq!(shooter.city.trimmed(), "AMES");
    assert_eq!(shooter.state, "IA");
    assert_eq!(shooter.postal_code, "50010");
    assert_eq!(shooter.classification, "A");
    assert_eq!(shooter.scores[0].hit, 18);
    assert_eq!(shooter.scores[0].shot_at, 25);
    assert_eq!(shooter.scores[0].yardage, Decimal::new(27, 0));
    assert!(shooter.scores[1..].iter().all(|s| s.shot_at == 0));

    let standings = EventStandings::for_event(&dataset, 0).expect("event 0 missing");
    assert_eq!(standings.len(), 1);
}

#[test]
fn load_gzip_file() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&club_file()).expect("failed to compress");
    let compressed = encoder.finish().expect("failed to finish gzip stream");

    let file = write_temp(&compressed);
    let dataset = load(file.path()).expect("failed to load gzip score file");
    assert_eq!(dataset.club_number(), &"001234");
    assert_eq!(dataset.shooters().len(), 1);
}

#[test]
fn load_multi_member_gzip_file() {
    let mut bytes = club_file();
    bytes.extend(shooter_line("1111111JONES, AMY", &["02302522.0"]));
    let (first, second) = bytes.split_at(bytes.len() / 2);

    let mut compressed = Vec::new();
    for part in [first, second] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(part).expect("failed to compress");
        compressed.extend(encoder.finish().expect("failed to finish gzip stream"));
    }

    let file = write_temp(&compressed);
    let dataset = load(file.path()).expect("failed to load multi-member gzip score file");
    assert_eq!(dataset.shooters().len(), 2);
    assert_eq!(dataset.shooters()[1].name.trimmed(), "JONES, AMY");
    assert_eq!(dataset.shooters()[1].scores[0].hit, 23);
}

#[test]
fn load_rejects_lf_only_lines() {
    let mut bytes = club_file();
    bytes[HEADER_PAYLOAD_LEN] = b'\n';
    bytes[HEADER_PAYLOAD_LEN + 1] = b'\n';

    let file = write_temp(&bytes);
    let err = load(file.path()).unwrap_err();
    assert!(matches!(err, FormatError::BadTerminator { line: 1, .. }));
}

#[test]
fn load_drops_partial_last_line() {
    let mut bytes = club_file();
    bytes.extend_from_slice(&shooter_line("1111111PARTIAL", &[])[..200]);

    let file = write_temp(&bytes);
    let dataset = load(file.path()).expect("failed to load score file");
    assert_eq!(dataset.shooters().len(), 1);
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let err = load(dir.path().join("missing.dat")).unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
}
