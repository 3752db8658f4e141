// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bitmap abstraction the decoder reads from, and the scan-line
//! accumulator that turns a dense run of pixel rows into the symbol rows
//! [`crate::row::extract_words`] operates on.
//!
//! Loading an actual image (PBM or otherwise) is explicitly out of scope
//! for this crate; callers provide any type implementing [`Bitmap`].

use log::trace;

use crate::codebook::CODEBOOK;
use crate::codeword::CodewordBuffer;
use crate::config::DiagnosticFlags;
use crate::row;

/// A read-only binary pixel grid, indexed `(row, col)`.
///
/// `true` is black. Implementations are expected to be cheap to query
/// repeatedly; the scanner below walks every pixel of every row exactly
/// once, row over row.
pub trait Bitmap {
    fn cols(&self) -> usize;
    fn rows(&self) -> usize;
    fn is_black(&self, row: usize, col: usize) -> bool;
}

/// Walks `bitmap` top to bottom, grouping consecutive visually identical
/// pixel rows into scan-line accumulators and handing each completed one to
/// [`row::extract_words`], feeding the results into a fresh
/// [`CodewordBuffer`].
///
/// Two thresholds, scaled to image width, drive the grouping: a pair of
/// pixel rows differing in fewer than `cols/40` columns are folded into the
/// same accumulator (still the same barcode row); differing in more than
/// `cols/20` columns starts a new barcode row. Rows falling strictly between
/// the two thresholds hold the current accumulator open without altering it,
/// tolerating a column or two of scan noise at a row boundary.
pub fn scan_bitmap(bitmap: &dyn Bitmap, max_codewords: usize, flags: DiagnosticFlags) -> CodewordBuffer {
    let cols = bitmap.cols();
    let rows = bitmap.rows();

    // Force the lazily-built codebook to materialize before the hot loop.
    let _ = &*CODEBOOK;

    let fuzz_thresh = cols / 40;
    let row_thresh = cols / 20;

    let mut buffer = CodewordBuffer::new(max_codewords);
    let mut rownum = 0usize;

    let mut cumbits = vec![0.0f64; cols];
    let mut num = 0usize;
    let mut accumulating = false;

    if rows == 0 {
        return buffer;
    }

    for r in 1..rows {
        let mut d = 0usize;
        for c in 0..cols {
            if bitmap.is_black(r, c) != bitmap.is_black(r - 1, c) {
                d += 1;
            }
        }

        if d < fuzz_thresh {
            if !accumulating {
                num = 0;
                cumbits.iter_mut().for_each(|v| *v = 0.0);
                accumulating = true;
            }
            for c in 0..cols {
                if bitmap.is_black(r, c) {
                    cumbits[c] += 1.0;
                }
            }
            num += 1;
        } else if d > row_thresh && accumulating {
            if emit_row(cols, rownum, num, &cumbits, &mut buffer, flags) {
                rownum += 1;
            }
            accumulating = false;
        }
    }

    if accumulating && emit_row(cols, rownum, num, &cumbits, &mut buffer, flags) {
        rownum += 1;
    }

    if flags.contains(DiagnosticFlags::ROW_TRANSITIONS) {
        trace!("bitmap: scanned {} barcode rows", rownum);
    }
    buffer
}

fn emit_row(
    cols: usize,
    rownum: usize,
    num: usize,
    cumbits: &[f64],
    buffer: &mut CodewordBuffer,
    flags: DiagnosticFlags,
) -> bool {
    let words = row::extract_words(cols, num, cumbits, flags);
    if words.is_empty() {
        return false;
    }
    let cluster = (rownum % 3) as u8;
    for word in words {
        buffer.accept_raw_word(word, cluster, flags);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A bitmap backed by a flat `Vec<bool>`, used only to exercise the
    /// scan-line accumulator in isolation.
    struct VecBitmap {
        cols: usize,
        rows: usize,
        pixels: Vec<bool>,
    }

    impl Bitmap for VecBitmap {
        fn cols(&self) -> usize {
            self.cols
        }
        fn rows(&self) -> usize {
            self.rows
        }
        fn is_black(&self, row: usize, col: usize) -> bool {
            self.pixels[row * self.cols + col]
        }
    }

    #[test]
    fn single_pixel_row_produces_no_codewords() {
        let bmp = VecBitmap { cols: 40, rows: 1, pixels: vec![false; 40] };
        let buffer = scan_bitmap(&bmp, 100, DiagnosticFlags::empty());
        assert!(buffer.is_empty());
    }

    #[test]
    fn an_all_white_image_produces_no_codewords() {
        let bmp = VecBitmap { cols: 80, rows: 20, pixels: vec![false; 80 * 20] };
        let buffer = scan_bitmap(&bmp, 100, DiagnosticFlags::empty());
        assert!(buffer.is_empty());
    }
}
