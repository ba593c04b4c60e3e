//! Node addressing
//!
//! An address is any byte. Which addresses belong to the master and the
//! display is deployment configuration, see [`crate::config::BusConfig`].

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bus address of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeAddress(u8);

impl NodeAddress {
    /// Wrap a raw address byte
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw address byte as sent on the wire
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for NodeAddress {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<NodeAddress> for u8 {
    fn from(address: NodeAddress) -> Self {
        address.0
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}
