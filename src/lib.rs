//! qca8k-initvals library
//!
//! Decodes the raw `qca,ar8327-initvals` register table found in legacy
//! QCA8K/AR8327 switch device trees and tells you which properties of the
//! current qca8k binding reproduce it.
//!
//! ```
//! use qca8k_initvals::decode::Dispatcher;
//! use qca8k_initvals::parser::scan_str;
//!
//! let blocks = scan_str("qca,ar8327-initvals = <0xe4 0x80000>;");
//! let outcomes = Dispatcher::default().decode_block(blocks[0].context, &blocks[0].samples);
//! assert_eq!(outcomes[0].advisories(), vec!["Set qca,rgmii0-1-8v in the switch node"]);
//! ```

pub mod config;
pub mod decode;
pub mod device;
pub mod parser;
