//! Pump bus hardware abstraction layer
//!
//! Traits for the peripherals a bus node needs to talk on the shared
//! RS-485 line. Chip-specific crates implement them; the protocol crate
//! only ever sees these traits.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Node application (master, pump, LCD)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pumpbus-protocol (frames, BusLink)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pumpbus-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`gpio::OutputPin`] - Transceiver driver-enable line

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

pub use gpio::{NoDirectionPin, OutputPin};
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};
