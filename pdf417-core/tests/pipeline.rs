// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline-level integration tests, driving the decoder from the codeword
//! stream onward.
//!
//! Synthesizing a full rasterized bitmap exercising a real multi-row symbol
//! is out of reach without an encoder (and this crate's own Hamming
//! codebook is itself generated rather than transcribed from the ISO
//! standard); these tests instead build a codeword array directly, the way
//! a conformance suite for `decode_codewords`/`eras_dec_rs` would, covering
//! the parser, the three converters, and Reed-Solomon correction together.

use pdf417_core::config::DiagnosticFlags;
use pdf417_core::parser::decode_codewords;
use pdf417_core::rs;

fn decode(codewords: &[u16]) -> String {
    let mut out = Vec::new();
    decode_codewords(codewords, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn a_plain_text_symbol_round_trips() {
    // codewords[0] = declared length (2: itself + one data codeword).
    // 'H' = 7, 'I' = 8 -> 7*30+8 = 218.
    let codewords = [2u16, 218];
    assert_eq!(decode(&codewords), "HI");
}

#[test]
fn a_mixed_mode_symbol_decodes_each_segment_through_its_own_converter() {
    // Text segment "HI", latch to byte compaction for one raw byte 'A',
    // latch back to text for "OK".
    let h_i = 7 * 30 + 8; // "HI"
    let o_k = 14 * 30 + 10; // "OK"
    // declared length counts codewords[0] itself plus the 5 payload entries.
    let codewords = [6u16, h_i, 901, b'A' as u16, 900, o_k];
    assert_eq!(decode(&codewords), "HIAOK");
}

/// `[5, 7, 11, 152, 709]` is a genuine codeword over GF(929) under
/// generator 3: with 5 total codewords and 2 check codewords, both of its
/// syndromes (the message evaluated at alpha^1 and alpha^2) are zero by
/// construction, so it is a valid block for the decoder's Reed-Solomon
/// stage to operate on.
const VALID_CODEWORD: [i32; 5] = [5, 7, 11, 152, 709];

#[test]
fn reed_solomon_corrects_a_single_substituted_codeword_before_parsing() {
    let mut data = VALID_CODEWORD;
    data[1] = 200; // a genuine substitution error, no erasure declared

    let result = rs::correct(&mut data, &[], 5, 2, DiagnosticFlags::empty()).unwrap();
    assert_eq!(result.corrected, 1);
    assert_eq!(data, VALID_CODEWORD);
}

#[test]
fn reed_solomon_recovers_a_declared_erasure_before_parsing() {
    let mut data = VALID_CODEWORD;
    data[2] = 0; // erased, not just damaged

    let result = rs::correct(&mut data, &[2], 5, 2, DiagnosticFlags::empty()).unwrap();
    assert_eq!(result.corrected, 1);
    assert_eq!(data, VALID_CODEWORD);
}

#[test]
fn numeric_segment_decodes_alongside_a_text_segment() {
    // Latch to numeric, one codeword whose BCD digits are marker-then-5
    // (15 -> ones digit 5, tens digit 1), latch back to text for "OK".
    let marker_and_five = 15;
    let o_k = 14 * 30 + 10;
    // declared length counts codewords[0] itself plus the 4 payload entries.
    let codewords = [5u16, 902, marker_and_five, 900, o_k];
    assert_eq!(decode(&codewords), "5OK");
}
