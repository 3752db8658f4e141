// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric Compaction: decodes a segment of codewords into a decimal digit
//! string via a base-900-to-decimal big integer conversion, 15 codewords
//! (a "chunk") at a time.
//!
//! Each chunk is accumulated into a 45-digit BCD buffer: `n_bcd[0]` is the
//! least significant decimal digit. Per ISO/IEC 15438, the encoder always
//! prepends a `1` digit ahead of the real payload before base-900 encoding
//! it, so decoding finds that marker digit -- the most significant nonzero
//! BCD digit -- and prints only what comes after it.

use log::{trace, warn};

use crate::sink::OutputSink;

const BCD_DIGITS: usize = 45;

/// Decodes a Numeric Compaction segment, writing ASCII digit bytes to
/// `sink`.
pub fn convert_num(segment: &[u16], sink: &mut dyn OutputSink) {
    trace!("numeric: {} codewords", segment.len());

    sink.begin_segment("NC");

    for chunk in segment.chunks(15) {
        let mut n_bcd = [0u8; BCD_DIGITS];

        for (i, &cw) in chunk.iter().enumerate() {
            let mut n = cw;
            let cw_bcd = [
                (n % 10) as u8,
                {
                    n /= 10;
                    (n % 10) as u8
                },
                {
                    n /= 10;
                    (n % 10) as u8
                },
            ];

            if i > 0 {
                multiply_by_900(&mut n_bcd);
            }
            add_in_place(&mut n_bcd, &cw_bcd);
        }

        write_chunk(&n_bcd, sink);
    }

    sink.end_segment();
}

/// Multiplies the BCD accumulator by 900 (= 9, then shift two decimal
/// places for the *100).
fn multiply_by_900(n_bcd: &mut [u8; BCD_DIGITS]) {
    let mut carry = 0u8;
    for digit in n_bcd.iter_mut() {
        let res = *digit * 9 + carry;
        *digit = res % 10;
        carry = res / 10;
    }

    for j in (2..BCD_DIGITS).rev() {
        n_bcd[j] = n_bcd[j - 2];
    }
    n_bcd[0] = 0;
    n_bcd[1] = 0;
}

/// Adds a 3-digit little-endian BCD value into the accumulator, in place.
fn add_in_place(n_bcd: &mut [u8; BCD_DIGITS], cw_bcd: &[u8; 3]) {
    let mut carry = 0u8;
    for j in 0..3 {
        let res = n_bcd[j] + cw_bcd[j] + carry;
        n_bcd[j] = res % 10;
        carry = res / 10;
    }
    for j in 3..BCD_DIGITS {
        let res = n_bcd[j] + carry;
        n_bcd[j] = res % 10;
        carry = res / 10;
    }
}

/// Emits the decimal digits of `n_bcd`, dropping everything above (and
/// including) the implicit leading `1` marker digit.
fn write_chunk(n_bcd: &[u8; BCD_DIGITS], sink: &mut dyn OutputSink) {
    let mut started = false;
    let mut digits = Vec::new();

    for j in (0..BCD_DIGITS).rev() {
        let digit = n_bcd[j];
        if started {
            digits.push(b'0' + digit);
        } else if digit == 1 {
            started = true;
        } else if digit != 0 {
            warn!("numeric: malformed chunk, no leading 1 marker digit found");
            return;
        }
    }

    sink.write_bytes(&digits);
}
