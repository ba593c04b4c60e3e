//! Display line buffer
//!
//! Builds the four fixed-width rows a master frame carries to the display
//! node. Text is truncated to the row width and padded with spaces, since
//! the frame codec sends line slots exactly as given.

use crate::messages::{Line, LINE_COUNT, LINE_LEN};

/// Fill byte for unused columns
pub const BLANK: u8 = b' ';

/// Four rows of 20 columns for the display node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Screen {
    lines: [Line; LINE_COUNT],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            lines: [[BLANK; LINE_LEN]; LINE_COUNT],
        }
    }

    /// Wrap rows received in a master frame
    pub const fn from_lines(lines: [Line; LINE_COUNT]) -> Self {
        Self { lines }
    }

    /// Blank every row
    pub fn clear(&mut self) {
        self.lines = [[BLANK; LINE_LEN]; LINE_COUNT];
    }

    /// Set the content of a row
    ///
    /// Text past the row width is dropped, never splitting a UTF-8
    /// character. Rows outside the screen are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            let mut len = text.len().min(LINE_LEN);
            while !text.is_char_boundary(len) {
                len -= 1;
            }
            line[..len].copy_from_slice(&text.as_bytes()[..len]);
            line[len..].fill(BLANK);
        }
    }

    /// Raw bytes of a row
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Row as text with trailing padding removed, if it is valid UTF-8
    pub fn line_str(&self, row: usize) -> Option<&str> {
        let line = self.lines.get(row)?;
        let text = core::str::from_utf8(line).ok()?;
        Some(text.trim_end_matches(BLANK as char))
    }

    /// All rows, ready for [`crate::messages::MasterMessage::new`]
    pub const fn lines(&self) -> [Line; LINE_COUNT] {
        self.lines
    }
}
