// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extracts raw 15-bit symbol patterns from a single accumulated scan line.
//!
//! A scan line here is a per-column tally of how many of the pixel rows
//! folded into it were black (`cumbits`), together with the pixel-row count
//! `num` those tallies are out of. This is one level below demodulation:
//! [`extract_words`] only finds run transitions and quantizes them into the
//! same 15-bit module pattern the codebook is keyed on; matching that
//! pattern against a row cluster happens in [`crate::codebook`].

use log::trace;

use crate::config::DiagnosticFlags;

/// Finds symbol-character boundaries in an accumulated scan line and
/// quantizes each one into a 15-bit module pattern.
///
/// Returns one pattern per complete group of 8 bar/space runs found.
/// Returns an empty vector if the line has too few transitions to contain
/// even one codeword, mirroring the reference decoder's `processrow`
/// returning `0` (no output, row not counted).
pub fn extract_words(cols: usize, num: usize, cumbits: &[f64], flags: DiagnosticFlags) -> Vec<u16> {
    let thresh = 0.5 * num as f64;

    let mut firstblack = 0usize;
    while firstblack < cols && cumbits[firstblack] < thresh {
        firstblack += 1;
    }
    if firstblack + 1 >= cols {
        return Vec::new();
    }

    let mut cumchange: Vec<i64> = Vec::with_capacity(cols);
    cumchange.push(0);

    for j in (firstblack + 1)..cols {
        let cur_below = cumbits[j] < thresh;
        let prev_below = cumbits[j - 1] < thresh;
        if cur_below != prev_below {
            let pos = (j - firstblack) as i64;
            let last = *cumchange.last().unwrap();
            if cumchange.len() > 1 && (pos - last) * 15 < cumchange[1] {
                // Spurious change: too narrow relative to the first run to
                // be a real module boundary.
                cumchange.pop();
            } else {
                cumchange.push(pos);
            }
        }
    }

    if flags.contains(DiagnosticFlags::ROW_TRANSITIONS) {
        trace!("row: {} transitions after filtering", cumchange.len());
    }

    if cumchange.len() < 8 {
        return Vec::new();
    }

    let nchange = cumchange.len();
    let mut words = Vec::new();
    let mut j = 0usize;

    while j + 8 < nchange {
        let scale = (cumchange[j + 8] - cumchange[j]) as f64;
        let mut word: u32 = 0;

        let mut k = 0usize;
        while k < 8 {
            let s_f = 17.0 * (cumchange[j + k] - cumchange[j]) as f64 / scale + 0.5;
            let e_f = 17.0 * (cumchange[j + k + 1] - cumchange[j]) as f64 / scale + 0.5;

            let mut s = s_f as i64;
            let mut e = e_f as i64;
            // We know the pattern always starts with a bar, ends with a space.
            if s < 1 {
                s = 1;
            }
            if e > 16 {
                e = 16;
            }
            for l in s..e {
                word |= 1 << (16 - l);
            }
            k += 2;
        }

        word >>= 1;
        words.push(word as u16);
        j += 8;
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an accumulated scan line for a sequence of symbol characters
    /// from exact module widths, at `px_per_module` pixels per module,
    /// preceded and followed by a quiet white zone.
    fn synth_line(symbols: &[[usize; 8]], px_per_module: usize, quiet_zone: usize) -> (usize, Vec<f64>) {
        let total_modules: usize = symbols.iter().flatten().sum();
        let cols = quiet_zone + total_modules * px_per_module + quiet_zone;
        let mut cumbits = vec![0.0f64; cols];

        let mut col = quiet_zone;
        for widths in symbols {
            let mut black = true;
            for &w in widths {
                for _ in 0..(w * px_per_module) {
                    cumbits[col] = if black { 2.0 } else { 0.0 };
                    col += 1;
                }
                black = !black;
            }
        }

        (cols, cumbits)
    }

    #[test]
    fn extracts_one_word_per_complete_symbol_boundary() {
        // The window used to quantize a symbol's modules needs the next
        // symbol's leading transition as its scale anchor, so a trailing
        // character with no successor never contributes a word -- two
        // symbols in, exactly one word out.
        let widths = [2usize, 2, 2, 2, 2, 2, 2, 3];
        assert_eq!(widths.iter().sum::<usize>(), 17);

        let (cols, cumbits) = synth_line(&[widths, widths], 3, 6);
        let words = extract_words(cols, 2, &cumbits, DiagnosticFlags::empty());

        assert_eq!(words.len(), 1);
        assert_ne!(words[0], 0);
    }

    #[test]
    fn empty_line_yields_no_words() {
        let cumbits = vec![0.0f64; 64];
        assert!(extract_words(64, 2, &cumbits, DiagnosticFlags::empty()).is_empty());
    }
}
