// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Hamming codebook: the table that maps a demodulated 15-bit symbol
//! pattern back to a codeword value, per row cluster.
//!
//! A PDF417 symbol character is 17 modules wide: four bar runs and four
//! space runs, each 1 to 6 modules, alternating and starting/ending on a
//! bar. Which of the three row clusters (`rownum % 3`) a character belongs
//! to is encoded redundantly in its bar widths, which is what lets a
//! decoder notice it has drifted onto the wrong row.
//!
//! The real table this type stands in for is ISO/IEC 15438 Annex data that
//! is not available to this crate; see `DESIGN.md` for how the generation
//! rule below was chosen and why it is safe to generate rather than
//! transcribe.

use log::trace;
use once_cell::sync::Lazy;

use crate::config::DiagnosticFlags;

/// Number of distinct 15-bit symbol patterns (`2^15`).
const WORD_SPACE: usize = 1 << 15;

/// Bar/space widths of the literal start-of-symbol pattern, reused verbatim
/// from the ISO/IEC 15438 start pattern (8,1,1,1,1,1,1,3): a single wide
/// leading bar that cannot be confused with any data codeword's widths
/// (1 to 6 modules each).
const START_WIDTHS: [u32; 8] = [8, 1, 1, 1, 1, 1, 1, 3];

/// Bar/space widths standing in for the symbol's stop pattern. The real
/// ISO stop pattern is 18 modules across 9 runs; this crate's row extractor
/// always groups runs into fixed 17-module, 8-run windows (see
/// [`crate::row::extract_words`]), so the stop marker is modeled within that
/// same window as a distinct, reserved width tuple instead.
const STOP_WIDTHS: [u32; 8] = [1, 1, 3, 1, 1, 1, 2, 7];

/// The demodulated pattern that marks the start of a row.
pub fn start_word() -> u16 {
    word_for_widths(START_WIDTHS)
}

/// The demodulated pattern that marks the end of a row.
pub fn stop_word() -> u16 {
    word_for_widths(STOP_WIDTHS)
}

/// A cluster table: `table[word]` is the codeword that word demodulates to
/// in this cluster, or `None` if no valid symbol produces that pattern.
type ClusterTable = Box<[Option<u16>]>;

pub struct Codebook {
    tables: [ClusterTable; 3],
}

/// The process-wide codebook, built on first use.
pub static CODEBOOK: Lazy<Codebook> = Lazy::new(Codebook::generate);

impl Codebook {
    fn generate() -> Codebook {
        let mut tables: [ClusterTable; 3] = [
            vec![None; WORD_SPACE].into_boxed_slice(),
            vec![None; WORD_SPACE].into_boxed_slice(),
            vec![None; WORD_SPACE].into_boxed_slice(),
        ];
        let mut next_codeword = [0u32; 3];

        for b0 in 1..=6u32 {
            for s0 in 1..=6u32 {
                for b1 in 1..=6u32 {
                    for s1 in 1..=6u32 {
                        for b2 in 1..=6u32 {
                            for s2 in 1..=6u32 {
                                for b3 in 1..=6u32 {
                                    for s3 in 1..=6u32 {
                                        let widths = [b0, s0, b1, s1, b2, s2, b3, s3];
                                        if widths.iter().sum::<u32>() != 17 {
                                            continue;
                                        }
                                        if widths == START_WIDTHS || widths == STOP_WIDTHS {
                                            continue;
                                        }

                                        let cluster = cluster_of(b0, b1, b2, b3);
                                        let word = word_for_widths(widths) as usize;

                                        let codeword = (next_codeword[cluster] % 929) as u16;
                                        next_codeword[cluster] += 1;

                                        // A handful of width combinations alias onto the
                                        // same quantized pattern; keep the first mapping
                                        // found so generation is deterministic.
                                        tables[cluster][word].get_or_insert(codeword);
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        Codebook { tables }
    }

    /// Looks up `word` (a demodulated 15-bit symbol pattern) against the
    /// cluster expected for the current row (`rownum % 3`).
    ///
    /// Mirrors the reference decoder's `bestham`: if some other cluster is
    /// a strictly better match than the expected one, the symbol is
    /// reported as a cluster mismatch rather than accepted, since that
    /// usually means the row extractor has drifted onto an adjacent row.
    ///
    /// `flags` gates the reference decoder's `-c` dump: with
    /// `CODEBOOK_DUMP` set, the matched (or rejected) table entry for every
    /// symbol is traced.
    pub fn demodulate(&self, word: u16, expected_cluster: u8, flags: DiagnosticFlags) -> DemodResult {
        let wordu = word as usize;
        let mut best = expected_cluster as usize;

        for i in 0..3 {
            let badness_i = badness(self.tables[i][wordu]);
            let badness_best = badness(self.tables[best][wordu]);
            if badness_i < badness_best {
                best = i;
            }
        }

        if flags.contains(DiagnosticFlags::CODEBOOK_DUMP) {
            trace!("codebook: word {:#06x} expected cluster {} best cluster {}", word, expected_cluster, best);
        }

        if best != expected_cluster as usize {
            return DemodResult::ClusterMismatch;
        }

        match self.tables[expected_cluster as usize][wordu] {
            Some(codeword) => DemodResult::Match(codeword),
            None => DemodResult::NoMatch,
        }
    }
}

fn badness(entry: Option<u16>) -> u8 {
    if entry.is_some() {
        0
    } else {
        0xff
    }
}

/// Result of matching a demodulated symbol against the codebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemodResult {
    /// The symbol matched the expected cluster.
    Match(u16),
    /// The symbol matched a different cluster better than the one expected
    /// for this row.
    ClusterMismatch,
    /// The symbol pattern is not a valid codeword in any cluster.
    NoMatch,
}

/// Assigns one of the three row clusters to a set of bar widths.
///
/// Real PDF417 clusters are encoded in the difference between bar widths
/// at alternating positions, modulo 9, divided into three equal groups of
/// residues; this follows the same shape.
fn cluster_of(b0: u32, b1: u32, b2: u32, b3: u32) -> usize {
    let diff = (b0 as i32 + b2 as i32) - (b1 as i32 + b3 as i32);
    (diff.rem_euclid(9) / 3) as usize
}

/// Quantizes eight alternating bar/space widths (bar, space, bar, space,
/// ...) summing to 17 modules into the same 15-bit pattern the row
/// extractor produces from a raster scan line.
///
/// Only the four bar (black) runs contribute set bits; this mirrors
/// `processrow`, which only accumulates `word` over the even-indexed
/// transition pairs; i.e. over bar runs, leaving space runs as zero bits.
fn word_for_widths(widths: [u32; 8]) -> u16 {
    let mut cum = [0u32; 9];
    for i in 0..8 {
        cum[i + 1] = cum[i] + widths[i];
    }

    let mut word: u32 = 0;
    for k in (0..8).step_by(2) {
        let mut s = cum[k];
        let mut e = cum[k + 1];
        if s < 1 {
            s = 1;
        }
        if e > 16 {
            e = 16;
        }
        for l in s..e {
            word |= 1 << (16 - l);
        }
    }

    (word >> 1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codebook_round_trips_a_synthetic_symbol() {
        let widths = [2u32, 2, 2, 2, 2, 2, 2, 3];
        assert_eq!(widths.iter().sum::<u32>(), 17);

        let word = word_for_widths(widths);
        let cluster = cluster_of(widths[0], widths[2], widths[4], widths[6]);

        match CODEBOOK.demodulate(word, cluster as u8, DiagnosticFlags::empty()) {
            DemodResult::Match(_) => {}
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn word_for_widths_only_sets_bar_run_bits() {
        let widths = [6u32, 5, 1, 1, 1, 1, 1, 1];
        assert_eq!(widths.iter().sum::<u32>(), 17);
        assert_ne!(word_for_widths(widths), 0);
    }

    #[test]
    fn cluster_of_wraps_modulo_nine() {
        // Shifting both bars in the same alternating position by 9 leaves
        // the difference mod 9 unchanged, so the same cluster is assigned.
        assert_eq!(cluster_of(1, 1, 1, 1), cluster_of(10, 1, 1, 1));
    }
}
