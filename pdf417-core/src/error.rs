// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the crate's common error type.

use std::fmt;
use std::result;

/// `Pdf417Error` enumerates the errors that can be reported while decoding a
/// symbol.
///
/// Most failures encountered while walking a symbol (a cluster mismatch, an
/// unrecognized control codeword, a malformed numeric batch) are not fatal
/// to the overall decode: a single bad row or segment is logged and skipped,
/// and the decode continues with whatever was recovered. This type exists
/// for the smaller set of failures that leave the decoder with nothing
/// useful to return.
#[derive(Debug)]
pub enum Pdf417Error {
    /// The codeword stream ended before a complete codeword count could be
    /// read, or the declared length ran past the end of the stream.
    Truncated,
    /// Reed-Solomon decoding determined the block was damaged beyond repair.
    Uncorrectable,
}

impl fmt::Display for Pdf417Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pdf417Error::Truncated => write!(f, "codeword stream is truncated"),
            Pdf417Error::Uncorrectable => write!(f, "uncorrectable codeword block"),
        }
    }
}

impl std::error::Error for Pdf417Error {}

pub type Result<T> = result::Result<T, Pdf417Error>;

/// Convenience function to create a truncated-stream error.
pub fn truncated_error<T>() -> Result<T> {
    Err(Pdf417Error::Truncated)
}

/// Convenience function to create an uncorrectable-block error.
pub fn uncorrectable_error<T>() -> Result<T> {
    Err(Pdf417Error::Uncorrectable)
}
