//! Frame shapes and byte-wise frame assembly
//!
//! The bus carries two fixed-length frame shapes and nothing else: there is
//! no start byte and no length field. A receiver knows from its role which
//! shape to expect and reads exactly that many bytes.
//!
//! ```text
//! master -> slave (85 bytes)
//! ┌────┬──────┬────────┬─────────┬──────────────────┬──────────┐
//! │ TO │ FROM │ INPUTS │ OUTPUTS │ LINES 4 x 20B    │ CHECKSUM │
//! └────┴──────┴────────┴─────────┴──────────────────┴──────────┘
//!
//! slave -> master (5 bytes)
//! ┌────┬──────┬────────┬─────────┬──────────┐
//! │ TO │ FROM │ INPUTS │ OUTPUTS │ CHECKSUM │
//! └────┴──────┴────────┴─────────┴──────────┘
//! ```

use core::fmt;
use core::marker::PhantomData;

use heapless::Vec;

use crate::messages::MASTER_FRAME_LEN;

/// Largest frame on the bus
pub const MAX_FRAME_LEN: usize = MASTER_FRAME_LEN;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Byte count does not match the frame shape
    Framing { expected: usize, actual: usize },
    /// Checksum mismatch
    Corrupt,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Framing { expected, actual } => {
                write!(f, "expected a {expected} byte frame, got {actual} bytes")
            }
            FrameError::Corrupt => f.write_str("frame checksum mismatch"),
            FrameError::BufferTooSmall => f.write_str("buffer too small for frame"),
        }
    }
}

/// Check a received slice against the fixed length of a frame shape
pub(crate) fn check_len(bytes: &[u8], expected: usize) -> Result<(), FrameError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(FrameError::Framing {
            expected,
            actual: bytes.len(),
        })
    }
}

/// A message with a fixed-length wire representation
pub trait WireFrame: Sized {
    /// Exact frame length in bytes, checksum included
    const LEN: usize;

    /// Encode into the start of `buf`, returning the number of bytes written
    fn write_frame(&self, buf: &mut [u8]) -> Result<usize, FrameError>;

    /// Decode and verify exactly one frame
    fn read_frame(bytes: &[u8]) -> Result<Self, FrameError>;
}

/// Collects bytes arriving one at a time into frames of one shape
///
/// There is no sync byte to hunt for, so the assembler trusts the caller to
/// start feeding on a frame boundary. After an error it starts over with an
/// empty buffer; realigning to the bus is up to the transport.
#[derive(Debug, Clone)]
pub struct FrameAssembler<F> {
    buffer: Vec<u8, MAX_FRAME_LEN>,
    _frame: PhantomData<F>,
}

impl<F: WireFrame> Default for FrameAssembler<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WireFrame> FrameAssembler<F> {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            _frame: PhantomData,
        }
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes buffered towards the next frame
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when no partial frame is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` once `F::LEN` bytes have arrived and the
    /// checksum matches, `Ok(None)` while more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<F>, FrameError> {
        if self.buffer.push(byte).is_err() {
            let actual = self.buffer.len() + 1;
            self.reset();
            return Err(FrameError::Framing {
                expected: F::LEN,
                actual,
            });
        }

        if self.buffer.len() < F::LEN {
            return Ok(None);
        }

        let result = F::read_frame(&self.buffer);
        self.reset();
        result.map(Some)
    }

    /// Feed multiple bytes
    ///
    /// Stops at the first complete frame or error and returns it together
    /// with the number of bytes consumed. `bytes[consumed..]` belongs to the
    /// next frame.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<F>, FrameError>) {
        for (index, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                result => return (index + 1, result),
            }
        }
        (bytes.len(), Ok(None))
    }
}
