// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `pdf417-core` decodes PDF417 two-dimensional barcodes from a rasterized
//! binary bitmap into the payload they encode.
//!
//! The pipeline, leaves first: GF(929) tables (`gf`) and the Hamming
//! codebook (`codebook`) are process-global, lazily-built lookup data; the
//! row extractor (`row`) and scan-line accumulator (`bitmap`) turn a bitmap
//! into demodulated codewords (`codeword`); Reed-Solomon (`rs`) corrects the
//! assembled stream; the stream parser (`parser`) splits it into compaction
//! segments and routes each to its converter (`text`, `byteconv`,
//! `numeric`), which write through an [`sink::OutputSink`].
//!
//! [`decoder::Pdf417Decoder`] is the single entry point tying all of this
//! together.

pub mod bitmap;
pub mod byteconv;
pub mod codebook;
pub mod codeword;
pub mod config;
pub mod decoder;
pub mod error;
pub mod gf;
pub mod numeric;
pub mod parser;
pub mod row;
pub mod rs;
pub mod sink;
pub mod text;

pub use bitmap::Bitmap;
pub use config::Pdf417Options;
pub use decoder::Pdf417Decoder;
pub use error::{Pdf417Error, Result};
pub use sink::OutputSink;
