//! Pump control bus protocol
//!
//! This crate defines the RS-485 protocol between the master controller and
//! the slave nodes (pump actuators and the display). One master polls many
//! slaves over a shared half-duplex line.
//!
//! # Protocol Overview
//!
//! Two fixed-length frame shapes, packed byte by byte with no padding:
//! ```text
//! master -> slave  ┌────┬──────┬────────┬─────────┬─────────────┬──────────┐
//!   85 bytes       │ TO │ FROM │ INPUTS │ OUTPUTS │ LINES 4x20B │ CHECKSUM │
//!                  └────┴──────┴────────┴─────────┴─────────────┴──────────┘
//! slave -> master  ┌────┬──────┬────────┬─────────┬──────────┐
//!   5 bytes        │ TO │ FROM │ INPUTS │ OUTPUTS │ CHECKSUM │
//!                  └────┴──────┴────────┴─────────┴──────────┘
//! ```
//!
//! The checksum is CRC-8/SMBUS over every preceding byte. A frame whose
//! length or checksum is wrong is never decoded into a message.

#![no_std]
#![deny(unsafe_code)]

pub mod address;
pub mod checksum;
pub mod config;
pub mod frame;
pub mod link;
pub mod messages;
pub mod screen;

pub use address::NodeAddress;
pub use checksum::{checksum_of, seal, verify};
pub use config::{BusConfig, ConfigError};
pub use frame::{FrameAssembler, FrameError, WireFrame, MAX_FRAME_LEN};
pub use link::{BusLink, LinkError};
pub use messages::{
    Line, MasterMessage, SlaveMessage, LINE_COUNT, LINE_LEN, MASTER_FRAME_LEN, SLAVE_FRAME_LEN,
};
pub use screen::Screen;
