//! Inbound line decoder.
//!
//! Agents are untrusted peers, so the content of a line never fails the
//! stream: invalid UTF-8 is decoded lossily, and a line longer than the
//! limit is skipped up to its newline and reported as [`Frame::Oversized`].
//! Only real I/O errors surface as `Err`.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// One decoded unit of inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line without its terminator (`\n` or `\r\n`)
    Line(String),
    /// A line that exceeded the limit; carries its length in bytes
    Oversized(usize),
}

/// Newline-delimited decoder with a per-line byte limit.
#[derive(Debug, Clone)]
pub struct AgentLineCodec {
    max_length: usize,
    /// Bytes already scanned for a newline
    next_index: usize,
    /// Skipping the tail of an oversized line
    discarding: bool,
    discarded: usize,
}

impl AgentLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
            discarded: 0,
        }
    }

    fn finish_discard(&mut self, tail: usize) -> Frame {
        let len = self.discarded + tail;
        self.discarding = false;
        self.discarded = 0;
        Frame::Oversized(len)
    }

    fn text_frame(&self, line: &[u8]) -> Frame {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.len() > self.max_length {
            return Frame::Oversized(line.len());
        }
        Frame::Line(String::from_utf8_lossy(line).into_owned())
    }
}

impl Decoder for AgentLineCodec {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, std::io::Error> {
        let newline = buf[self.next_index..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|offset| self.next_index + offset);

        let Some(newline) = newline else {
            // One spare byte for a `\r` before the newline
            if self.discarding || buf.len() > self.max_length.saturating_add(1) {
                self.discarded += buf.len();
                self.discarding = true;
                self.next_index = 0;
                buf.clear();
            } else {
                self.next_index = buf.len();
            }
            return Ok(None);
        };

        self.next_index = 0;
        let line = buf.split_to(newline + 1);
        if self.discarding {
            return Ok(Some(self.finish_discard(newline)));
        }
        Ok(Some(self.text_frame(&line[..newline])))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, std::io::Error> {
        if let Some(frame) = self.decode(buf)? {
            return Ok(Some(frame));
        }
        if self.discarding {
            return Ok(Some(self.finish_discard(0)));
        }
        if buf.is_empty() {
            return Ok(None);
        }
        // Unterminated last line
        self.next_index = 0;
        let line = buf.split_to(buf.len());
        Ok(Some(self.text_frame(&line)))
    }
}
