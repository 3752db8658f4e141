// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembles demodulated symbols from every row of a bitmap into the flat
//! codeword stream the stream parser and Reed-Solomon decoder operate on.
//!
//! This replaces the reference decoder's `add_codeword`, which kept its
//! state (`len`, `sorow`, `skip`) in function-local `static` variables --
//! effectively a second, hidden piece of global state alongside the
//! codeword array itself. [`CodewordBuffer`] holds that state explicitly so
//! a [`crate::decoder::Pdf417Decoder`] owns it rather than sharing it across
//! every decode on the process.

use log::{debug, warn};

use crate::codebook::{self, DemodResult, CODEBOOK};
use crate::config::DiagnosticFlags;

/// Owns the in-progress codeword stream for a symbol as it is assembled row
/// by row.
pub struct CodewordBuffer {
    codewords: Vec<u16>,
    erasures: Vec<usize>,
    /// Index into `codewords` where the current row began, used by
    /// [`CodewordBuffer::rewind_to_row_start`].
    sorow: usize,
    /// Number of upcoming accepted words to discard outright. Set to `1`
    /// when a start-of-row pattern is seen, since the symbol immediately
    /// following it duplicates information already implied by the pattern.
    skip: u8,
    max_codewords: usize,
}

impl CodewordBuffer {
    pub fn new(max_codewords: usize) -> CodewordBuffer {
        CodewordBuffer {
            codewords: Vec::new(),
            erasures: Vec::new(),
            sorow: 0,
            skip: 0,
            max_codewords,
        }
    }

    /// Feeds one raw, pre-codebook 15-bit symbol pattern (as produced by
    /// [`crate::row::extract_words`]) into the buffer.
    ///
    /// `expected_cluster` is `rownum % 3`: which of the three row clusters
    /// this symbol's row belongs to.
    pub fn accept_raw_word(&mut self, raw_word: u16, expected_cluster: u8, flags: DiagnosticFlags) {
        // The skip gate is checked before anything else, including before
        // recognizing another start-of-row pattern -- a direct port of the
        // reference decoder's ordering, which means two start patterns back
        // to back only consume the skip counter rather than re-arming it.
        if self.skip > 0 {
            self.skip -= 1;
            return;
        }

        if raw_word == codebook::start_word() {
            self.skip = 1;
            self.sorow = self.codewords.len();
            return;
        }
        if raw_word == codebook::stop_word() {
            self.codewords.pop();
            return;
        }

        match CODEBOOK.demodulate(raw_word, expected_cluster, flags) {
            DemodResult::Match(codeword) => self.push_codeword(Some(codeword)),
            DemodResult::ClusterMismatch => {
                if flags.contains(DiagnosticFlags::DEMODULATION) {
                    debug!("codeword: symbol matched a different row cluster, marking erasure");
                }
                self.push_codeword(None);
            }
            DemodResult::NoMatch => {
                if flags.contains(DiagnosticFlags::DEMODULATION) {
                    debug!("codeword: no codebook entry for symbol, marking erasure");
                }
                self.push_codeword(None);
            }
        }
    }

    /// Discards every codeword accepted since the start of the current row.
    ///
    /// Kept for API parity with the reference decoder's rewind signal; nothing
    /// in this crate's own row-extraction path currently triggers it.
    pub fn rewind_to_row_start(&mut self) {
        self.codewords.truncate(self.sorow);
        self.erasures.retain(|&e| e < self.codewords.len());
    }

    fn push_codeword(&mut self, codeword: Option<u16>) {
        if self.codewords.len() >= self.max_codewords {
            warn!("codeword buffer reached its {} codeword limit, dropping codeword", self.max_codewords);
            return;
        }
        match codeword {
            Some(cw) => self.codewords.push(cw),
            None => {
                self.erasures.push(self.codewords.len());
                self.codewords.push(0);
            }
        }
    }

    pub fn codewords(&self) -> &[u16] {
        &self.codewords
    }

    pub fn erasures(&self) -> &[usize] {
        &self.erasures
    }

    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codewords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pattern_arms_skip_without_storing_a_codeword() {
        let mut buf = CodewordBuffer::new(100);
        buf.accept_raw_word(codebook::start_word(), 0, DiagnosticFlags::empty());
        assert!(buf.is_empty());
    }

    #[test]
    fn word_immediately_after_start_is_discarded() {
        let mut buf = CodewordBuffer::new(100);
        buf.accept_raw_word(codebook::start_word(), 0, DiagnosticFlags::empty());
        // Whatever comes next is skipped outright, even a second start
        // pattern, matching the reference decoder's ordering.
        buf.accept_raw_word(codebook::start_word(), 0, DiagnosticFlags::empty());
        assert!(buf.is_empty());
        assert_eq!(buf.sorow, 0);
    }

    #[test]
    fn stop_pattern_drops_the_preceding_codeword() {
        let mut buf = CodewordBuffer::new(100);
        buf.push_codeword(Some(42));
        buf.accept_raw_word(codebook::stop_word(), 0, DiagnosticFlags::empty());
        assert!(buf.is_empty());
    }

    #[test]
    fn unrecognized_symbol_is_recorded_as_an_erasure() {
        let mut buf = CodewordBuffer::new(100);
        // A word this dense (14 of 15 bits set) is never produced by a
        // valid bar/space width tuple, so no cluster has an entry for it.
        buf.accept_raw_word(0x7ffe, 0, DiagnosticFlags::empty());
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.erasures(), &[0]);
        assert_eq!(buf.codewords()[0], 0);
    }

    #[test]
    fn max_codewords_limit_is_enforced() {
        let mut buf = CodewordBuffer::new(2);
        buf.push_codeword(Some(1));
        buf.push_codeword(Some(2));
        buf.push_codeword(Some(3));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn rewind_discards_the_current_row() {
        let mut buf = CodewordBuffer::new(100);
        buf.push_codeword(Some(1));
        buf.push_codeword(Some(2));
        buf.accept_raw_word(codebook::start_word(), 0, DiagnosticFlags::empty()); // sorow = 2
        buf.accept_raw_word(999, 0, DiagnosticFlags::empty()); // skipped
        buf.push_codeword(Some(3));
        buf.push_codeword(Some(4));
        assert_eq!(buf.len(), 4);

        buf.rewind_to_row_start();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.codewords(), &[1, 2]);
    }
}
