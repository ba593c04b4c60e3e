//! Master and slave messages
//!
//! Fields are packed by explicit byte offset in declaration order, so the
//! wire layout never depends on how the compiler lays out the structs.

use crate::address::NodeAddress;
use crate::checksum;
use crate::frame::{check_len, FrameError, WireFrame};

/// Display rows carried by a master frame
pub const LINE_COUNT: usize = 4;

/// Bytes per display row
pub const LINE_LEN: usize = 20;

/// One display row, fixed width and not NUL-terminated
pub type Line = [u8; LINE_LEN];

/// Master frame length: 4 header bytes, the line slots, 1 checksum byte
pub const MASTER_FRAME_LEN: usize = 4 + LINE_COUNT * LINE_LEN + 1;

/// Slave frame length: 4 header bytes, 1 checksum byte
pub const SLAVE_FRAME_LEN: usize = 5;

// Field offsets shared by both shapes
const TO: usize = 0;
const FROM: usize = 1;
const INPUTS: usize = 2;
const OUTPUTS: usize = 3;
const LINES: usize = 4;

/// Frame sent from the master to one slave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MasterMessage {
    /// Destination node
    pub to: NodeAddress,
    /// Source node, normally the master
    pub from: NodeAddress,
    /// Input bitmask relevant to the addressed node
    pub inputs: u8,
    /// Commanded output bitmask for the addressed node
    pub outputs: u8,
    /// Display rows, opaque bytes
    pub lines: [Line; LINE_COUNT],
}

impl MasterMessage {
    /// Create a master message
    ///
    /// Lines are sent exactly as given; pad short text before calling
    /// (see [`crate::screen::Screen`]).
    pub const fn new(
        to: NodeAddress,
        from: NodeAddress,
        inputs: u8,
        outputs: u8,
        lines: [Line; LINE_COUNT],
    ) -> Self {
        Self {
            to,
            from,
            inputs,
            outputs,
            lines,
        }
    }

    /// True if this frame is addressed to `address`
    pub fn is_for(&self, address: NodeAddress) -> bool {
        self.to == address
    }

    /// Encode to a complete frame with the checksum attached
    pub fn encode(&self) -> [u8; MASTER_FRAME_LEN] {
        let mut frame = [0u8; MASTER_FRAME_LEN];
        frame[TO] = self.to.value();
        frame[FROM] = self.from.value();
        frame[INPUTS] = self.inputs;
        frame[OUTPUTS] = self.outputs;

        let slots = frame[LINES..LINES + LINE_COUNT * LINE_LEN].chunks_exact_mut(LINE_LEN);
        for (slot, line) in slots.zip(&self.lines) {
            slot.copy_from_slice(line);
        }

        checksum::seal(&mut frame);
        frame
    }

    /// Encode into the start of `buf`, returning the number of bytes written
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let dst = buf
            .get_mut(..MASTER_FRAME_LEN)
            .ok_or(FrameError::BufferTooSmall)?;
        dst.copy_from_slice(&self.encode());
        Ok(MASTER_FRAME_LEN)
    }

    /// Decode a received frame, rejecting wrong lengths and bad checksums
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        check_len(bytes, MASTER_FRAME_LEN)?;
        checksum::verify(bytes)?;
        Ok(Self::read_fields(bytes))
    }

    /// Decode field values without checking the checksum
    ///
    /// Only for diagnostics; the result of a corrupt frame must not drive
    /// outputs.
    pub fn decode_unverified(bytes: &[u8]) -> Result<Self, FrameError> {
        check_len(bytes, MASTER_FRAME_LEN)?;
        Ok(Self::read_fields(bytes))
    }

    fn read_fields(bytes: &[u8]) -> Self {
        let mut lines = [[0u8; LINE_LEN]; LINE_COUNT];
        let slots = bytes[LINES..LINES + LINE_COUNT * LINE_LEN].chunks_exact(LINE_LEN);
        for (line, slot) in lines.iter_mut().zip(slots) {
            line.copy_from_slice(slot);
        }

        Self {
            to: NodeAddress::new(bytes[TO]),
            from: NodeAddress::new(bytes[FROM]),
            inputs: bytes[INPUTS],
            outputs: bytes[OUTPUTS],
            lines,
        }
    }
}

impl WireFrame for MasterMessage {
    const LEN: usize = MASTER_FRAME_LEN;

    fn write_frame(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        self.encode_into(buf)
    }

    fn read_frame(bytes: &[u8]) -> Result<Self, FrameError> {
        Self::decode(bytes)
    }
}

/// Frame sent from a slave back to the master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveMessage {
    /// Destination node, normally the master
    pub to: NodeAddress,
    /// Reporting node
    pub from: NodeAddress,
    /// Input bitmask as seen by the slave
    pub inputs: u8,
    /// Output bitmask as driven by the slave
    pub outputs: u8,
}

impl SlaveMessage {
    /// Create a slave message
    pub const fn new(to: NodeAddress, from: NodeAddress, inputs: u8, outputs: u8) -> Self {
        Self {
            to,
            from,
            inputs,
            outputs,
        }
    }

    /// Answer a master frame: addresses swapped, state reported by the slave
    pub const fn reply_to(request: &MasterMessage, inputs: u8, outputs: u8) -> Self {
        Self::new(request.from, request.to, inputs, outputs)
    }

    /// True if this frame is addressed to `address`
    pub fn is_for(&self, address: NodeAddress) -> bool {
        self.to == address
    }

    /// Encode to a complete frame with the checksum attached
    pub fn encode(&self) -> [u8; SLAVE_FRAME_LEN] {
        let mut frame = [0u8; SLAVE_FRAME_LEN];
        frame[TO] = self.to.value();
        frame[FROM] = self.from.value();
        frame[INPUTS] = self.inputs;
        frame[OUTPUTS] = self.outputs;
        checksum::seal(&mut frame);
        frame
    }

    /// Encode into the start of `buf`, returning the number of bytes written
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let dst = buf
            .get_mut(..SLAVE_FRAME_LEN)
            .ok_or(FrameError::BufferTooSmall)?;
        dst.copy_from_slice(&self.encode());
        Ok(SLAVE_FRAME_LEN)
    }

    /// Decode a received frame, rejecting wrong lengths and bad checksums
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        check_len(bytes, SLAVE_FRAME_LEN)?;
        checksum::verify(bytes)?;
        Ok(Self::read_fields(bytes))
    }

    /// Decode field values without checking the checksum
    pub fn decode_unverified(bytes: &[u8]) -> Result<Self, FrameError> {
        check_len(bytes, SLAVE_FRAME_LEN)?;
        Ok(Self::read_fields(bytes))
    }

    fn read_fields(bytes: &[u8]) -> Self {
        Self {
            to: NodeAddress::new(bytes[TO]),
            from: NodeAddress::new(bytes[FROM]),
            inputs: bytes[INPUTS],
            outputs: bytes[OUTPUTS],
        }
    }
}

impl WireFrame for SlaveMessage {
    const LEN: usize = SLAVE_FRAME_LEN;

    fn write_frame(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        self.encode_into(buf)
    }

    fn read_frame(bytes: &[u8]) -> Result<Self, FrameError> {
        Self::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: NodeAddress = NodeAddress::new(0x01);
    const DISPLAY: NodeAddress = NodeAddress::new(0x02);

    fn blank_display_frame() -> MasterMessage {
        MasterMessage::new(DISPLAY, MASTER, 0x00, 0x01, [[b' '; LINE_LEN]; LINE_COUNT])
    }

    #[test]
    fn test_frame_lengths() {
        assert_eq!(MASTER_FRAME_LEN, 85);
        assert_eq!(SLAVE_FRAME_LEN, 5);
        assert_eq!(<MasterMessage as WireFrame>::LEN, 85);
        assert_eq!(<SlaveMessage as WireFrame>::LEN, 5);
    }

    #[test]
    fn test_master_layout() {
        let mut lines = [[0u8; LINE_LEN]; LINE_COUNT];
        lines[0][0] = b'A';
        lines[1][19] = b'B';
        lines[3][0] = b'C';
        let message = MasterMessage::new(DISPLAY, MASTER, 0xA5, 0x5A, lines);
        let frame = message.encode();

        assert_eq!(frame[0], 0x02); // to
        assert_eq!(frame[1], 0x01); // from
        assert_eq!(frame[2], 0xA5); // inputs
        assert_eq!(frame[3], 0x5A); // outputs
        assert_eq!(frame[4], b'A'); // line 0, col 0
        assert_eq!(frame[4 + 20 + 19], b'B'); // line 1, col 19
        assert_eq!(frame[4 + 60], b'C'); // line 3, col 0
        assert_eq!(frame[84], checksum::checksum_of(&frame[..84]));
    }

    #[test]
    fn test_slave_layout() {
        let frame = SlaveMessage::new(MASTER, NodeAddress::new(0x07), 0x81, 0x42).encode();
        assert_eq!(&frame[..4], &[0x01, 0x07, 0x81, 0x42]);
        assert_eq!(frame[4], checksum::checksum_of(&frame[..4]));
    }

    #[test]
    fn test_display_scenario() {
        let message = blank_display_frame();
        let frame = message.encode();

        assert_eq!(checksum::verify(&frame), Ok(()));
        let decoded = MasterMessage::decode(&frame).unwrap();
        assert_eq!(decoded, message);
        assert!(decoded.is_for(DISPLAY));
        assert_eq!(decoded.from, MASTER);
        assert_eq!(decoded.lines, [[b' '; LINE_LEN]; LINE_COUNT]);
    }

    #[test]
    fn test_display_scenario_last_line_byte_flipped() {
        let mut frame = blank_display_frame().encode();
        frame[MASTER_FRAME_LEN - 2] ^= 0x01;

        assert_eq!(checksum::verify(&frame), Err(FrameError::Corrupt));
        assert_eq!(MasterMessage::decode(&frame), Err(FrameError::Corrupt));
    }

    #[test]
    fn test_master_wrong_lengths() {
        let frame = blank_display_frame().encode();
        let mut long = [0u8; MASTER_FRAME_LEN + 1];
        long[..MASTER_FRAME_LEN].copy_from_slice(&frame);

        assert_eq!(
            MasterMessage::decode(&frame[..84]),
            Err(FrameError::Framing {
                expected: 85,
                actual: 84
            })
        );
        assert_eq!(
            MasterMessage::decode(&long),
            Err(FrameError::Framing {
                expected: 85,
                actual: 86
            })
        );
        assert_eq!(
            MasterMessage::decode_unverified(&[]),
            Err(FrameError::Framing {
                expected: 85,
                actual: 0
            })
        );
    }

    #[test]
    fn test_slave_wrong_lengths() {
        assert_eq!(
            SlaveMessage::decode(&[0u8; 4]),
            Err(FrameError::Framing {
                expected: 5,
                actual: 4
            })
        );
        // A master frame is never mistaken for a slave frame
        assert!(matches!(
            SlaveMessage::decode(&blank_display_frame().encode()),
            Err(FrameError::Framing { actual: 85, .. })
        ));
    }

    #[test]
    fn test_decode_unverified_ignores_checksum() {
        let message = SlaveMessage::new(MASTER, NodeAddress::new(0x09), 0x00, 0xFF);
        let mut frame = message.encode();
        frame[4] ^= 0xFF;

        assert_eq!(SlaveMessage::decode(&frame), Err(FrameError::Corrupt));
        assert_eq!(SlaveMessage::decode_unverified(&frame), Ok(message));
    }

    #[test]
    fn test_encode_into() {
        let message = SlaveMessage::new(MASTER, NodeAddress::new(0x03), 1, 2);
        let mut buf = [0u8; 8];
        assert_eq!(message.encode_into(&mut buf), Ok(SLAVE_FRAME_LEN));
        assert_eq!(&buf[..SLAVE_FRAME_LEN], &message.encode());

        let mut small = [0u8; MASTER_FRAME_LEN - 1];
        assert_eq!(
            blank_display_frame().encode_into(&mut small),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_reply_swaps_addresses() {
        let request = MasterMessage::new(
            NodeAddress::new(0x10),
            MASTER,
            0x00,
            0x01,
            [[0; LINE_LEN]; LINE_COUNT],
        );
        let reply = SlaveMessage::reply_to(&request, 0x04, 0x01);

        assert_eq!(reply.to, MASTER);
        assert_eq!(reply.from, NodeAddress::new(0x10));
        assert!(reply.is_for(MASTER));
        assert_eq!(reply.outputs, 0x01);
    }

    #[test]
    fn test_boundary_bitmasks() {
        for mask in [0x00, 0xFF] {
            let message = SlaveMessage::new(MASTER, DISPLAY, mask, mask);
            assert_eq!(SlaveMessage::decode(&message.encode()), Ok(message));
        }
    }
}
