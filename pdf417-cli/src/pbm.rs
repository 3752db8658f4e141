// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A minimal PBM (portable bitmap) reader, supporting both the `P1` (plain
//! ASCII) and `P4` (packed binary) variants.
//!
//! This exists only so `pdf417-cli` has something to feed
//! `pdf417_core::Bitmap`; loading images is explicitly out of scope for the
//! core crate, the way the reference decoder instead links against
//! `libnetpbm`'s `pbm_readpbm`.

use std::fmt;

use pdf417_core::Bitmap;

#[derive(Debug)]
pub struct PbmError(String);

impl fmt::Display for PbmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PbmError {}

/// A decoded PBM image: one bit per pixel, row-major, `true` = black.
pub struct PbmBitmap {
    cols: usize,
    rows: usize,
    pixels: Vec<bool>,
}

impl Bitmap for PbmBitmap {
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

impl PbmBitmap {
    pub fn parse(bytes: &[u8]) -> Result<PbmBitmap, PbmError> {
        let mut cursor = Cursor { bytes, pos: 0 };

        let magic = cursor.take_token()?;
        let cols = cursor.take_uint()?;
        let rows = cursor.take_uint()?;

        let pixels = match magic {
            b"P1" => read_plain(&mut cursor, cols, rows)?,
            b"P4" => read_raw(&mut cursor, cols, rows)?,
            other => {
                return Err(PbmError(format!(
                    "unrecognized PBM magic number {:?}",
                    String::from_utf8_lossy(other)
                )))
            }
        };

        Ok(PbmBitmap { cols, rows, pixels })
    }
}

fn read_plain(cursor: &mut Cursor<'_>, cols: usize, rows: usize) -> Result<Vec<bool>, PbmError> {
    let mut pixels = Vec::with_capacity(cols * rows);
    for _ in 0..(cols * rows) {
        let bit = cursor.take_uint()?;
        pixels.push(bit != 0);
    }
    Ok(pixels)
}

fn read_raw(cursor: &mut Cursor<'_>, cols: usize, rows: usize) -> Result<Vec<bool>, PbmError> {
    // Exactly one byte of whitespace separates the header from raw data.
    cursor.pos += 1;

    let row_bytes = (cols + 7) / 8;
    let mut pixels = Vec::with_capacity(cols * rows);

    for _ in 0..rows {
        let row = cursor.take_bytes(row_bytes)?;
        for col in 0..cols {
            let byte = row[col / 8];
            let bit = (byte >> (7 - (col % 8))) & 1;
            pixels.push(bit != 0);
        }
    }

    Ok(pixels)
}

/// A tiny hand-rolled cursor over the raw file bytes: enough to tokenize the
/// whitespace/comment-delimited PBM header and then switch to raw byte reads
/// for `P4` pixel data.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.bytes.len() && self.bytes[self.pos] == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn take_token(&mut self) -> Result<&'a [u8], PbmError> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(PbmError("unexpected end of file while reading header".into()));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn take_uint(&mut self) -> Result<usize, PbmError> {
        let token = self.take_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PbmError(format!("expected an integer, found {:?}", String::from_utf8_lossy(token))))
    }

    fn take_bytes(&mut self, n: usize) -> Result<&'a [u8], PbmError> {
        if self.pos + n > self.bytes.len() {
            return Err(PbmError("unexpected end of file while reading pixel data".into()));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_pbm() {
        let data = b"P1\n3 2\n0 1 0\n1 0 1\n";
        let bmp = PbmBitmap::parse(data).unwrap();
        assert_eq!(bmp.cols(), 3);
        assert_eq!(bmp.rows(), 2);
        assert!(!bmp.is_black(0, 0));
        assert!(bmp.is_black(0, 1));
        assert!(bmp.is_black(1, 0));
    }

    #[test]
    fn parses_a_raw_pbm() {
        // 8x1 image, raw row byte 0b10110000 -> 1,0,1,1,0,0,0,0
        let mut data = b"P4\n8 1\n".to_vec();
        data.push(0b1011_0000);
        let bmp = PbmBitmap::parse(&data).unwrap();
        assert!(bmp.is_black(0, 0));
        assert!(!bmp.is_black(0, 1));
        assert!(bmp.is_black(0, 2));
        assert!(bmp.is_black(0, 3));
        assert!(!bmp.is_black(0, 4));
    }

    #[test]
    fn rejects_an_unrecognized_magic_number() {
        let data = b"P6\n1 1\n255\n";
        assert!(PbmBitmap::parse(data).is_err());
    }
}
