//! Frame integrity checks
//!
//! Every frame ends in one checksum byte: CRC-8/SMBUS (polynomial 0x07,
//! init 0x00, no reflection) over all bytes before it. Any single corrupted
//! byte, checksum included, changes the result.

use crc::{Crc, CRC_8_SMBUS};

use crate::frame::FrameError;

const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Compute the checksum over the non-checksum bytes of a frame
pub fn checksum_of(bytes: &[u8]) -> u8 {
    CRC8.checksum(bytes)
}

/// Verify the trailing checksum byte of a complete frame
///
/// An empty slice has no checksum to compare against and is reported as
/// corrupt. Length checks are the codec's job and happen before this.
pub fn verify(frame: &[u8]) -> Result<(), FrameError> {
    let (&received, body) = frame.split_last().ok_or(FrameError::Corrupt)?;
    if checksum_of(body) == received {
        Ok(())
    } else {
        Err(FrameError::Corrupt)
    }
}

/// Write the checksum of `frame[..len - 1]` into the last byte
pub fn seal(frame: &mut [u8]) {
    if let Some((last, body)) = frame.split_last_mut() {
        *last = checksum_of(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // Standard CRC-8/SMBUS check value
        assert_eq!(checksum_of(b"123456789"), 0xF4);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum_of(&[]), 0x00);
    }

    #[test]
    fn test_seal_then_verify() {
        let mut frame = [0x02, 0x01, 0x00, 0x01, 0x00];
        seal(&mut frame);
        assert_eq!(frame[4], checksum_of(&frame[..4]));
        assert_eq!(verify(&frame), Ok(()));
    }

    #[test]
    fn test_corrupt_body() {
        let mut frame = [0x02, 0x01, 0x00, 0x01, 0x00];
        seal(&mut frame);
        frame[2] ^= 0x01;
        assert_eq!(verify(&frame), Err(FrameError::Corrupt));
    }

    #[test]
    fn test_corrupt_checksum_byte() {
        let mut frame = [0xFF; 5];
        seal(&mut frame);
        frame[4] ^= 0x80;
        assert_eq!(verify(&frame), Err(FrameError::Corrupt));
    }

    #[test]
    fn test_verify_empty() {
        assert_eq!(verify(&[]), Err(FrameError::Corrupt));
    }

    #[test]
    fn test_every_single_byte_error_detected() {
        let mut frame = [0x10, 0x01, 0xA5, 0x5A, 0x00];
        seal(&mut frame);

        for index in 0..frame.len() {
            for mask in 1..=255u8 {
                let mut damaged = frame;
                damaged[index] ^= mask;
                assert_eq!(verify(&damaged), Err(FrameError::Corrupt));
            }
        }
    }
}
