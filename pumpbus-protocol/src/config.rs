//! Bus configuration
//!
//! Line rates and the reserved node addresses are passed in at start-up
//! rather than baked in, so several buses (or tests) can run side by side
//! with different settings.
//!
//! With the `toml` feature a configuration can be read from a document such
//! as:
//!
//! ```toml
//! bus_baud = 115200
//! monitor_baud = 115200
//! master_address = 1
//! display_address = 2
//! ```
//!
//! Missing keys take their default values.

use pumpbus_hal::UartConfig;

use crate::address::NodeAddress;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default RS-485 bus line rate
pub const DEFAULT_BUS_BAUD: u32 = 115_200;

/// Default serial monitor line rate
pub const DEFAULT_MONITOR_BAUD: u32 = 115_200;

/// Conventional master controller address
pub const DEFAULT_MASTER_ADDRESS: NodeAddress = NodeAddress::new(0x01);

/// Conventional display node address
pub const DEFAULT_DISPLAY_ADDRESS: NodeAddress = NodeAddress::new(0x02);

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document could not be parsed into a configuration
    Parse,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Parse => f.write_str("invalid bus configuration"),
        }
    }
}

/// Settings shared by every node on one bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BusConfig {
    /// RS-485 bus baud rate
    pub bus_baud: u32,
    /// Debug serial monitor baud rate
    pub monitor_baud: u32,
    /// Address of the master controller
    pub master_address: NodeAddress,
    /// Address of the display node
    pub display_address: NodeAddress,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BusConfig {
    /// Configuration with the conventional rates and addresses
    pub const fn new() -> Self {
        Self {
            bus_baud: DEFAULT_BUS_BAUD,
            monitor_baud: DEFAULT_MONITOR_BAUD,
            master_address: DEFAULT_MASTER_ADDRESS,
            display_address: DEFAULT_DISPLAY_ADDRESS,
        }
    }

    /// Parse a configuration from TOML
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|_| ConfigError::Parse)
    }

    /// UART settings for the bus (8N1)
    pub const fn bus_uart(&self) -> UartConfig {
        UartConfig::new(self.bus_baud)
    }

    /// UART settings for the serial monitor (8N1)
    pub const fn monitor_uart(&self) -> UartConfig {
        UartConfig::new(self.monitor_baud)
    }

    /// True if `address` is the master controller
    pub fn is_master(&self, address: NodeAddress) -> bool {
        address == self.master_address
    }

    /// True if `address` is the display node
    pub fn is_display(&self, address: NodeAddress) -> bool {
        address == self.display_address
    }

    /// Time in microseconds a frame of `len` bytes occupies the bus
    ///
    /// Useful for sizing receive timeouts in the transport.
    pub const fn frame_time_us(&self, len: usize) -> u64 {
        self.bus_uart().transmit_time_us(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{MASTER_FRAME_LEN, SLAVE_FRAME_LEN};

    #[test]
    fn test_defaults() {
        let config = BusConfig::default();
        assert_eq!(config.bus_baud, 115_200);
        assert_eq!(config.monitor_baud, 115_200);
        assert_eq!(config.master_address.value(), 0x01);
        assert_eq!(config.display_address.value(), 0x02);
    }

    #[test]
    fn test_roles() {
        let config = BusConfig::new();
        assert!(config.is_master(NodeAddress::new(0x01)));
        assert!(config.is_display(NodeAddress::new(0x02)));
        assert!(!config.is_master(NodeAddress::new(0x02)));
        assert!(!config.is_display(NodeAddress::new(0x03)));
    }

    #[test]
    fn test_independent_buses() {
        let first = BusConfig::new();
        let second = BusConfig {
            bus_baud: 9600,
            master_address: NodeAddress::new(0x10),
            ..BusConfig::new()
        };

        assert!(first.is_master(NodeAddress::new(0x01)));
        assert!(!second.is_master(NodeAddress::new(0x01)));
        assert_eq!(second.bus_uart().baudrate, 9600);
        assert_eq!(second.monitor_uart().baudrate, 115_200);
    }

    #[test]
    fn test_frame_time() {
        let config = BusConfig::new();
        assert_eq!(config.frame_time_us(MASTER_FRAME_LEN), 7379);
        assert_eq!(config.frame_time_us(SLAVE_FRAME_LEN), 435);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = BusConfig::from_toml(
            "bus_baud = 57600\nmaster_address = 16\ndisplay_address = 32\n",
        )
        .unwrap();
        assert_eq!(config.bus_baud, 57_600);
        assert_eq!(config.monitor_baud, DEFAULT_MONITOR_BAUD);
        assert_eq!(config.master_address, NodeAddress::new(0x10));
        assert_eq!(config.display_address, NodeAddress::new(0x20));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_rejects_bad_address() {
        assert_eq!(
            BusConfig::from_toml("master_address = 300\n"),
            Err(ConfigError::Parse)
        );
    }
}
