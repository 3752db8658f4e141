// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder configuration.

use bitflags::bitflags;

bitflags! {
    /// Flags controlling what diagnostic information the decoder emits via
    /// the `log` facade while it walks a symbol.
    ///
    /// `Pdf417Options::debug_level` is the ergonomic, linear knob a caller
    /// turns; internally the decoder expands it (plus `dump_codebook`) into
    /// one of these flag sets so that each subsystem only pays for the
    /// logging calls it was asked to make.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DiagnosticFlags: u8 {
        /// Log the column offsets at which a row transitions between runs.
        const ROW_TRANSITIONS = 1 << 0;
        /// Log demodulation detail (raw word, chosen cluster, Hamming
        /// distance) for every symbol.
        const DEMODULATION    = 1 << 1;
        /// Log Reed-Solomon syndrome and correction detail.
        const RS_DETAIL       = 1 << 2;
        /// Log the per-symbol codebook entry that was matched, the way the
        /// reference decoder's `-c` flag dumps `dham[which][word]`.
        const CODEBOOK_DUMP   = 1 << 3;
    }
}

impl DiagnosticFlags {
    /// Expands a linear `debug_level` (as accepted on the command line) plus
    /// the standalone `dump_codebook` switch into the flag set the decoder's
    /// internals consult.
    pub fn from_level(debug_level: u8, dump_codebook: bool) -> DiagnosticFlags {
        let mut flags = DiagnosticFlags::empty();
        if debug_level >= 1 {
            flags |= DiagnosticFlags::ROW_TRANSITIONS;
        }
        if debug_level >= 2 {
            flags |= DiagnosticFlags::DEMODULATION | DiagnosticFlags::RS_DETAIL;
        }
        if dump_codebook {
            flags |= DiagnosticFlags::CODEBOOK_DUMP;
        }
        flags
    }
}

/// The maximum number of codewords a single symbol can contain: 90 columns
/// across at most 34 rows.
pub const MAX_CODEWORDS: usize = 34 * 90;

/// Configuration for a [`crate::decoder::Pdf417Decoder`].
///
/// Mirrors the reference decoder's four command-line switches (`-d`, `-c`,
/// `-e`, `-rs`) as struct fields rather than process-global `int`s.
#[derive(Debug, Clone)]
pub struct Pdf417Options {
    /// Verbosity, `0` (warnings only) through `2` (trace-level detail).
    pub debug_level: u8,
    /// Emit the raw codebook entry matched for every demodulated symbol.
    pub dump_codebook: bool,
    /// Emit output framed with a two-letter segment tag and hex-escaped
    /// bytes (`"BC \"..\""`-style), instead of raw decoded bytes.
    pub emit_framed: bool,
    /// Run Reed-Solomon error-and-erasure correction on the codeword stream
    /// before parsing it.
    pub apply_ecc: bool,
    /// Upper bound on the number of codewords accepted from a single symbol.
    /// Guards against a pathological bitmap producing an unbounded codeword
    /// stream.
    pub max_codewords: usize,
}

impl Default for Pdf417Options {
    fn default() -> Self {
        Pdf417Options {
            debug_level: 0,
            dump_codebook: false,
            emit_framed: false,
            apply_ecc: false,
            max_codewords: MAX_CODEWORDS,
        }
    }
}

impl Pdf417Options {
    pub(crate) fn diagnostic_flags(&self) -> DiagnosticFlags {
        DiagnosticFlags::from_level(self.debug_level, self.dump_codebook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_quiet() {
        assert_eq!(DiagnosticFlags::from_level(0, false), DiagnosticFlags::empty());
    }

    #[test]
    fn level_two_enables_demodulation_and_rs_detail() {
        let flags = DiagnosticFlags::from_level(2, false);
        assert!(flags.contains(DiagnosticFlags::DEMODULATION));
        assert!(flags.contains(DiagnosticFlags::RS_DETAIL));
        assert!(!flags.contains(DiagnosticFlags::CODEBOOK_DUMP));
    }

    #[test]
    fn dump_codebook_is_independent_of_level() {
        let flags = DiagnosticFlags::from_level(0, true);
        assert!(flags.contains(DiagnosticFlags::CODEBOOK_DUMP));
        assert!(!flags.contains(DiagnosticFlags::ROW_TRANSITIONS));
    }
}
