// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Byte Compaction: decodes a segment of codewords into raw bytes, five
//! codewords at a time, by treating them as a base-900 big integer and
//! re-expressing it in base 256.

use log::trace;

use crate::sink::OutputSink;

/// Decodes a Byte Compaction segment, writing bytes to `sink`.
///
/// `latch_cw` distinguishes the two latches that select this mode: 901
/// groups codewords five at a time for as long as more than five remain
/// (a trailing partial group is emitted one byte per codeword), while 924
/// groups greedily even when exactly five codewords remain, reflecting the
/// reference decoder's `(mode == 901) ? (len > 5) : (len >= 5)` split.
pub fn convert_byte(segment: &[u16], latch_cw: u16, sink: &mut dyn OutputSink) {
    trace!("byteconv: {} codewords (latch = {})", segment.len(), latch_cw);

    sink.begin_segment("BC");

    let mut cw = segment;
    while if latch_cw == 901 { cw.len() > 5 } else { cw.len() >= 5 } {
        let mut codeval: u64 = 0;
        for &c in &cw[0..5] {
            codeval = codeval * 900 + c as u64;
        }

        let mut bytes = [0u8; 6];
        for j in 0..6 {
            bytes[5 - j] = (codeval % 256) as u8;
            codeval >>= 8;
        }
        sink.write_bytes(&bytes);

        cw = &cw[5..];
    }

    if !cw.is_empty() {
        let bytes: Vec<u8> = cw.iter().map(|&c| c as u8).collect();
        sink.write_bytes(&bytes);
    }

    sink.end_segment();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(segment: &[u16], latch_cw: u16) -> Vec<u8> {
        let mut out = Vec::new();
        convert_byte(segment, latch_cw, &mut out);
        out
    }

    #[test]
    fn decodes_a_full_group_of_five_into_six_bytes() {
        // base-900 value for the ASCII bytes "ABCDEF". Latch 924 groups
        // even when exactly 5 codewords remain (`len >= 5`), unlike 901.
        let mut codeval: u64 = 0;
        for &b in b"ABCDEF" {
            codeval = codeval * 256 + b as u64;
        }
        let mut cw = [0u16; 5];
        for i in (0..5).rev() {
            cw[i] = (codeval % 900) as u16;
            codeval /= 900;
        }

        assert_eq!(decode(&cw, 924), b"ABCDEF");
    }

    #[test]
    fn mode_901_emits_exact_multiple_of_five_one_byte_per_codeword() {
        // Exactly 5 codewords: under mode 901 the `len > 5` loop never
        // fires, so all five fall through to the one-byte-per-codeword tail.
        let cw = [b'H' as u16, b'E' as u16, b'L' as u16, b'L' as u16, b'O' as u16];
        assert_eq!(decode(&cw, 901), b"HELLO");
    }

    #[test]
    fn mode_924_groups_an_exact_multiple_of_five() {
        // The same five codewords under mode 924 ('len >= 5') are instead
        // grouped into one base-900 group. Use 900*0 + ... a small group
        // that is simple to re-derive: all zero codewords map to six
        // null bytes.
        let cw = [0u16; 5];
        assert_eq!(decode(&cw, 924), vec![0u8; 6]);
    }

    #[test]
    fn trailing_partial_group_is_one_byte_per_codeword() {
        let cw = [65u16, 66u16];
        assert_eq!(decode(&cw, 901), b"AB");
    }
}
