// PDF417-rs
// Copyright (c) 2024 The PDF417-rs Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where decoded payload bytes go.
//!
//! The reference decoder's converters call `printf` directly; this crate
//! routes every converter through this trait instead so a caller can
//! collect the output into a `Vec<u8>`, write it straight through, or frame
//! it, without the decoding logic knowing which.

use std::io;

/// Receives decoded output, one compaction segment at a time.
pub trait OutputSink {
    /// Appends raw decoded bytes (already reassembled from whatever
    /// compaction mode produced them).
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Appends a single decoded byte. Default implementation forwards to
    /// [`OutputSink::write_bytes`].
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    /// Called between compaction segments. Framed output uses this to close
    /// out the previous segment's quoted tag; unframed output can ignore it.
    fn begin_segment(&mut self, _tag: &str) {}

    /// Called after the last byte of a segment has been written.
    fn end_segment(&mut self) {}
}

impl OutputSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Adapts any [`std::io::Write`] into an [`OutputSink`].
///
/// Write errors are not surfaced through the trait (mirroring the reference
/// decoder, which never checked `printf`'s return value); they are instead
/// recorded and can be inspected with [`WriteSink::into_result`].
pub struct WriteSink<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(writer: W) -> WriteSink<W> {
        WriteSink { writer, error: None }
    }

    /// Consumes the sink, returning the first write error encountered, if
    /// any.
    pub fn into_result(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: io::Write> OutputSink for WriteSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.writer.write_all(bytes) {
            self.error = Some(err);
        }
    }
}

/// Frames each segment the way the reference decoder's `-e` flag does:
/// a two-letter tag, a quoted, hex-escaped body.
pub struct FramedSink<'a, S: OutputSink + ?Sized> {
    inner: &'a mut S,
}

impl<'a, S: OutputSink + ?Sized> FramedSink<'a, S> {
    pub fn new(inner: &'a mut S) -> FramedSink<'a, S> {
        FramedSink { inner }
    }
}

impl<'a, S: OutputSink + ?Sized> OutputSink for FramedSink<'a, S> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.inner.write_bytes(format!("{:02X}", b).as_bytes());
        }
    }

    fn begin_segment(&mut self, tag: &str) {
        self.inner.write_bytes(tag.as_bytes());
        self.inner.write_bytes(b" \"");
    }

    fn end_segment(&mut self) {
        self.inner.write_bytes(b"\"\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_bytes() {
        let mut sink: Vec<u8> = Vec::new();
        sink.write_bytes(b"hello");
        sink.write_byte(b'!');
        assert_eq!(sink, b"hello!");
    }

    #[test]
    fn framed_sink_hex_escapes_and_wraps() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut framed = FramedSink::new(&mut out);
            framed.begin_segment("BC");
            framed.write_bytes(&[0x41, 0x42]);
            framed.end_segment();
        }
        assert_eq!(out, b"BC \"4142\"\n");
    }
}
