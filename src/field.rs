// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/field.rs - Fixed-width field decoding for ATA club score files.
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
 * # `field` Module
 *
 * Every value in a score file lives in a fixed byte window of an ASCII line.
 * The functions here turn such a window into a typed value. None of them can
 * fail: numbers that don't look like numbers decode to zero, and text is
 * copied byte for byte.
 *
 * ## Usage Example
 *
 * ```
 * use atadata::field::{decode_u16, window, FixedText};
 *
 * let line = b"001234S 025";
 * let club: FixedText<6> = FixedText::from_window(window(line, 0, 6));
 * assert_eq!(club, "001234");
 * assert_eq!(decode_u16(window(line, 8, 3)), 25);
 * ```
 */

use std::borrow::Cow;
use std::fmt;

use rust_decimal::Decimal;

/// Returns the `width`-byte window of `bytes` starting at `offset`.
///
/// The window is clamped to the end of `bytes`, so it may be shorter than
/// `width` (or empty) when the input is short.
pub fn window(bytes: &[u8], offset: usize, width: usize) -> &[u8] {
    let start = offset.min(bytes.len());
    let end = offset.saturating_add(width).min(bytes.len());
    &bytes[start..end]
}

/// A fixed-capacity text field copied verbatim from its byte window.
///
/// No trimming is done. If the source window is shorter than `N`, the
/// remaining bytes are zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedText<N> {
    pub fn from_window(window: &[u8]) -> Self {
        let mut bytes = [0u8; N];
        let len = window.len().min(N);
        bytes[..len].copy_from_slice(&window[..len]);
        Self { bytes }
    }

    /// The raw field bytes, including any padding.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The bytes before the first NUL, if any.
    pub fn content(&self) -> &[u8] {
        let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(N);
        &self.bytes[..end]
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.content())
    }

    /// The text with surrounding whitespace removed.
    pub fn trimmed(&self) -> String {
        self.to_string_lossy().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.content().iter().all(|b| b.is_ascii_whitespace())
    }
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self { bytes: [0u8; N] }
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl<const N: usize> PartialEq<&str> for FixedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.content() == other.as_bytes()
    }
}

/// Skips leading whitespace and an optional `+`, returning the rest.
///
/// A leading `-` makes the field unreadable as an unsigned value, so it
/// returns an empty slice.
fn unsigned_tail(window: &[u8]) -> &[u8] {
    let start = window
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(window.len());
    let rest = &window[start..];
    match rest.first() {
        Some(b'+') => &rest[1..],
        Some(b'-') => &[],
        _ => rest,
    }
}

fn leading_digits(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    &bytes[..end]
}

/// Decodes a count field.
///
/// Parsing stops at the first non-digit; no digits at all yields 0. Values
/// too large for a `u16` saturate.
pub fn decode_u16(window: &[u8]) -> u16 {
    leading_digits(unsigned_tail(window))
        .iter()
        .fold(0u16, |acc, &d| {
            acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
        })
}

/// Largest scale `Decimal::new` accepts.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Decodes a decimal field such as a yardage (`"27.0"`, `"  20"`, `".5"`).
///
/// Same leniency as [decode_u16]: the longest `digits[.digits]` prefix is
/// used and anything unreadable is zero. Digits beyond what a `Decimal` can
/// hold are dropped.
pub fn decode_decimal(window: &[u8]) -> Decimal {
    let tail = unsigned_tail(window);
    let whole = leading_digits(tail);
    let fraction = match tail.get(whole.len()) {
        Some(b'.') => leading_digits(&tail[whole.len() + 1..]),
        _ => &[],
    };

    let mut mantissa: i64 = 0;
    let mut scale: u32 = 0;
    for &d in whole {
        match mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(i64::from(d - b'0')))
        {
            Some(m) => mantissa = m,
            None => return Decimal::new(mantissa, 0),
        }
    }
    for &d in fraction.iter().take(MAX_DECIMAL_SCALE as usize) {
        match mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(i64::from(d - b'0')))
        {
            Some(m) => {
                mantissa = m;
                scale += 1;
            }
            None => break,
        }
    }

    Decimal::new(mantissa, scale)
}
