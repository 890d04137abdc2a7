//! Register definitions for the QCA8K / AR8327 switch family.
//!
//! This module provides:
//! - Register offsets, bit layouts and reset values ([`registers_spec`])
//! - Register identities, port contexts and captured samples ([`registers`])
//!
//! # Register Map
//!
//! Only the registers that show up in `qca,ar8327-initvals` blobs are
//! modelled:
//!
//! ```text
//!   0x04  PAD0_MODE      CPU port 0 interface
//!   0x08  PAD5_MODE      port 5 interface
//!   0x0C  PAD6_MODE      port 6 interface
//!   0x10  PWS_REG        power-on straps
//!   0x50  LED_CTRL0      LED 0 rules   [31:16] phy4  [15:0] phy0..3
//!   0x54  LED_CTRL1      LED 1 rules
//!   0x58  LED_CTRL2      LED 2 rules
//!   0x5C  LED_CTRL3      per-port pattern enables
//!   0xE0  SGMII_CTRL     SerDes control
//!   0xE4  MAC_POWER_SEL  RGMII I/O voltage
//! ```
//!
//! # Example
//!
//! ```
//! use qca8k_initvals::device::{CpuPort, Register};
//!
//! let reg = Register::from_offset(0x08).unwrap();
//! assert_eq!(reg, Register::Pad(CpuPort::Port5));
//! assert_eq!(reg.name(), "PAD5_MODE");
//! ```

pub mod registers;
pub mod registers_spec;

pub use registers::{CpuPort, LedIndex, PortContext, Register, RegisterSample};
