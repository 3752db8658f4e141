// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text Compaction: decodes a segment of codewords, each packing two 0-29
//! sub-values, into characters via four alternating alphabets (upper,
//! lower, mixed, punctuation) with latch and shift control codes.

use log::warn;

use crate::sink::OutputSink;

const TXT_UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ    ";
const TXT_LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz    ";
const TXT_MIXED: &[u8] = b"0123456789&\r\t,:#-.$/+%*=^     ";
const TXT_PUNCT: &[u8] = b";<>@[\\]_`~!\r\t,:\n-.$/\"|*()?{}' ";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Alphabet {
    Upper,
    Lower,
    Mixed,
    Punct,
}

fn lookup(alphabet: Alphabet, index: i32) -> u8 {
    let table = match alphabet {
        Alphabet::Upper => TXT_UPPER,
        Alphabet::Lower => TXT_LOWER,
        Alphabet::Mixed => TXT_MIXED,
        Alphabet::Punct => TXT_PUNCT,
    };
    match table.get(index as usize) {
        Some(&byte) => byte,
        None => {
            warn!("text: sub-symbol {} out of range for current alphabet", index);
            b'?'
        }
    }
}

/// Decodes a Text Compaction segment, writing characters to `sink` as they
/// are produced.
///
/// Each latch (to upper/lower/mixed/punctuation) changes the alphabet for
/// every following sub-symbol; each shift changes the alphabet for exactly
/// the next sub-symbol only, preserving the reference decoder's detail that
/// a shift still consumes a sub-symbol even when the resulting mode is a
/// no-op relative to the latch already in effect.
pub fn convert_text(segment: &[u16], sink: &mut dyn OutputSink) {
    let mut mode = Alphabet::Upper;
    let mut shift = Alphabet::Upper;

    sink.begin_segment("TC");

    for &cw in segment {
        let subsyms = [(cw / 30) as i32, (cw % 30) as i32];

        for sub in subsyms {
            let mut enc = mode;
            if mode != shift {
                enc = shift;
                shift = mode;
            }

            let cout = match enc {
                Alphabet::Upper => match sub {
                    27 => {
                        mode = Alphabet::Lower;
                        shift = Alphabet::Lower;
                        continue;
                    }
                    28 => {
                        mode = Alphabet::Mixed;
                        shift = Alphabet::Mixed;
                        continue;
                    }
                    29 => {
                        shift = Alphabet::Punct;
                        continue;
                    }
                    _ => lookup(Alphabet::Upper, sub),
                },
                Alphabet::Lower => match sub {
                    27 => {
                        shift = Alphabet::Upper;
                        continue;
                    }
                    28 => {
                        mode = Alphabet::Mixed;
                        shift = Alphabet::Mixed;
                        continue;
                    }
                    29 => {
                        shift = Alphabet::Punct;
                        continue;
                    }
                    _ => lookup(Alphabet::Lower, sub),
                },
                Alphabet::Mixed => match sub {
                    25 => {
                        mode = Alphabet::Punct;
                        shift = Alphabet::Punct;
                        continue;
                    }
                    27 => {
                        mode = Alphabet::Lower;
                        shift = Alphabet::Lower;
                        continue;
                    }
                    28 => {
                        mode = Alphabet::Upper;
                        shift = Alphabet::Upper;
                        continue;
                    }
                    29 => {
                        shift = Alphabet::Punct;
                        continue;
                    }
                    _ => lookup(Alphabet::Mixed, sub),
                },
                Alphabet::Punct => match sub {
                    29 => {
                        mode = Alphabet::Upper;
                        shift = Alphabet::Upper;
                        continue;
                    }
                    _ => lookup(Alphabet::Punct, sub),
                },
            };

            sink.write_byte(cout);
        }
    }

    sink.end_segment();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(segment: &[u16]) -> String {
        let mut out = Vec::new();
        convert_text(segment, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn decodes_plain_uppercase() {
        // 'H' = 7, 'I' = 8 -> one codeword 7*30+8 = 218
        assert_eq!(decode(&[218]), "HI");
    }

    #[test]
    fn lower_latch_persists_across_codewords() {
        // Lower latch (27), then 'a' (0).
        let lower_latch_and_a = 27 * 30 + 0;
        // 'b' (1), 'c' (2), still in lowercase since the latch persists.
        let b_and_c = 1 * 30 + 2;
        assert_eq!(decode(&[lower_latch_and_a, b_and_c]), "abc");
    }

    #[test]
    fn punct_shift_applies_once_then_reverts() {
        // Upper mode: shift to punctuation (29), then sub-symbol 0 (';' in
        // punctuation). The shift then reverts, so the next codeword's
        // sub-symbols are read back in upper mode.
        let shift_punct_then_semicolon = 29 * 30 + 0;
        let two_as = 0 * 30 + 0;
        assert_eq!(decode(&[shift_punct_then_semicolon, two_as]), ";AA");
    }
}
