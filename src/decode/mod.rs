//! Register decoders.
//!
//! Turns `(offset, value)` samples from a `qca,ar8327-initvals` table into
//! advice for the qca8k device tree binding.
//!
//! ```text
//!   RegisterSample ──► Dispatcher ──► Register::from_offset
//!                                         │
//!                 ┌──────────┬────────────┼────────────┬──────────┐
//!                 ▼          ▼            ▼            ▼          ▼
//!               pad       power      led_normal    led_extended  sgmii / mac_power
//!                 │          │            │            │          │
//!                 └──────────┴─── Word::take ... finish ──────────┘
//!                                         │
//!                                     Report (advisories + residual)
//! ```
//!
//! Every decoder is a pure function of the value: extraction builds a typed
//! token set and a [`Word`], composition turns the tokens into advisory
//! lines, and whatever the word did not account for ends up in the
//! residual diagnostic.

pub mod field;
pub mod led_extended;
pub mod led_normal;
pub mod mac_power;
pub mod pad;
pub mod power;
pub mod report;
pub mod residual;
pub mod sgmii;

use std::collections::HashSet;
use std::fmt;

use crate::device::{PortContext, Register, RegisterSample};

pub use field::{Coverage, FieldSpec, Tokens, Word};
pub use report::Report;
pub use residual::Diagnostic;

/// Knobs passed down to every decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep the decoded tokens in each report
    pub verbose: bool,
    /// Offsets to skip on top of the built-in list
    pub extra_ignored: Vec<u32>,
}

/// Seal a report: record coverage and the residual diagnostic.
pub(crate) fn close(report: &mut Report, word: Word) {
    let coverage = word.finish();
    report.coverage = coverage;
    report.diagnostic = residual::check(report.register, coverage.residual);
}

/// Result of dispatching one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Offset is on the ignore list
    Ignored(RegisterSample),
    /// Offset has no decoder
    Unrecognized(RegisterSample),
    Decoded(Report),
}

impl Outcome {
    /// Advisory lines this outcome contributes to the output.
    pub fn advisories(&self) -> Vec<String> {
        match self {
            Outcome::Ignored(_) => Vec::new(),
            Outcome::Unrecognized(sample) => vec![unrecognized_line(sample)],
            Outcome::Decoded(report) => report.advisories.clone(),
        }
    }
}

fn unrecognized_line(sample: &RegisterSample) -> String {
    format!(
        "Unrecognized register {:#x} with value {:#x}",
        sample.offset, sample.value
    )
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ignored(_) => Ok(()),
            Outcome::Unrecognized(sample) => writeln!(f, "{}", unrecognized_line(sample)),
            Outcome::Decoded(report) => write!(f, "{}", report),
        }
    }
}

/// Routes samples to their decoder.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    options: DecodeOptions,
    extra_ignored: HashSet<u32>,
}

impl Dispatcher {
    pub fn new(options: DecodeOptions) -> Self {
        let extra_ignored = options.extra_ignored.iter().copied().collect();
        Self {
            options,
            extra_ignored,
        }
    }

    fn is_ignored(&self, offset: u32) -> bool {
        Register::is_ignored_offset(offset) || self.extra_ignored.contains(&offset)
    }

    /// Decode a single sample.
    pub fn dispatch(&self, sample: RegisterSample) -> Outcome {
        if self.is_ignored(sample.offset) {
            log::debug!("skipping ignored register {}", sample);
            return Outcome::Ignored(sample);
        }

        let Some(register) = Register::from_offset(sample.offset) else {
            log::warn!("unrecognized register {}", sample);
            return Outcome::Unrecognized(sample);
        };

        let opts = &self.options;
        let value = sample.value;
        let report = match register {
            Register::Pad(port) => pad::decode(port, value, opts),
            Register::PowerStrap => power::decode(value, opts),
            Register::LedNormal(index) => led_normal::decode(index, value, opts),
            Register::LedExtended => led_extended::decode(value, opts),
            Register::SgmiiCtrl => sgmii::decode(value, opts),
            Register::MacPowerSel => mac_power::decode(value, opts),
        };
        Outcome::Decoded(report)
    }

    /// Decode every sample of one initvals table, in input order.
    pub fn decode_block(&self, context: PortContext, samples: &[RegisterSample]) -> Vec<Outcome> {
        log::debug!("decoding {} registers for {}", samples.len(), context);
        samples.iter().map(|s| self.dispatch(*s)).collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::registers_spec;
    use proptest::prelude::*;

    fn advisories(offset: u32, value: u32) -> Vec<String> {
        Dispatcher::default()
            .dispatch(RegisterSample::new(offset, value))
            .advisories()
    }

    const KNOWN: [u32; 10] = [
        registers_spec::PAD0_MODE,
        registers_spec::PAD5_MODE,
        registers_spec::PAD6_MODE,
        registers_spec::PWS_REG,
        registers_spec::LED_CTRL0,
        registers_spec::LED_CTRL1,
        registers_spec::LED_CTRL2,
        registers_spec::LED_CTRL3,
        registers_spec::SGMII_CTRL,
        registers_spec::MAC_POWER_SEL,
    ];

    #[test]
    fn test_mac06_exchange_only() {
        let out = advisories(0x04, 0x8000_0000);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "Configuration for CPU port 0");
        assert!(out[1].contains("qca,mac6-exchange"));
        assert!(out.iter().all(|l| !l.contains("phy-mode")));
    }

    #[test]
    fn test_pad0_absent() {
        let out = advisories(0x04, 0x0);
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("PAD0_MODE"));
    }

    #[test]
    fn test_mac_power_rgmii0() {
        let out = advisories(0xE4, 0x0008_0000);
        assert_eq!(out, vec!["Set qca,rgmii0-1-8v in the switch node"]);
    }

    #[test]
    fn test_led_ctrl0_phy4_only() {
        let out = advisories(0x50, 0x0004_CC35);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|l| !l.contains("phy0123")));
        assert!(out[0].contains("phy4") && out[0].contains("linkup-over"));
        assert_eq!(out[1], "port4 LED 0 is set to mode off");
    }

    #[test]
    fn test_unrecognized_register() {
        let outcome = Dispatcher::default().dispatch(RegisterSample::new(0x20, 0x1));
        assert!(matches!(outcome, Outcome::Unrecognized(_)));
        let out = outcome.advisories();
        assert_eq!(out, vec!["Unrecognized register 0x20 with value 0x1"]);
    }

    #[test]
    fn test_ignored_offsets_are_silent() {
        for offset in [0x7C, 0x94, 0x970, 0x988, 0x9A4] {
            let outcome = Dispatcher::default().dispatch(RegisterSample::new(offset, 0xFFFF_FFFF));
            assert!(matches!(outcome, Outcome::Ignored(_)), "{:#x}", offset);
            assert_eq!(outcome.to_string(), "");
        }
    }

    #[test]
    fn test_extra_ignored_offsets() {
        let dispatcher = Dispatcher::new(DecodeOptions {
            extra_ignored: vec![0x20],
            ..Default::default()
        });
        let outcome = dispatcher.dispatch(RegisterSample::new(0x20, 0x1));
        assert!(matches!(outcome, Outcome::Ignored(_)));
    }

    #[test]
    fn test_block_keeps_input_order() {
        let samples = [
            RegisterSample::new(0xE4, 0x0008_0000),
            RegisterSample::new(0x20, 0x1),
            RegisterSample::new(0x04, 0x0),
        ];
        let outcomes = Dispatcher::default().decode_block(PortContext::Phy0, &samples);
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(&outcomes[0], Outcome::Decoded(r) if r.register == Register::MacPowerSel));
        assert!(matches!(&outcomes[1], Outcome::Unrecognized(_)));
        assert!(matches!(&outcomes[2], Outcome::Decoded(r) if r.register == Register::Pad(crate::device::CpuPort::Port0)));
    }

    #[test]
    fn test_decode_is_repeatable() {
        let dispatcher = Dispatcher::default();
        for offset in KNOWN {
            let a = dispatcher.dispatch(RegisterSample::new(offset, 0x07A0_C935));
            let b = dispatcher.dispatch(RegisterSample::new(offset, 0x07A0_C935));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_verbose_fills_tokens() {
        let dispatcher = Dispatcher::new(DecodeOptions {
            verbose: true,
            ..Default::default()
        });
        let Outcome::Decoded(report) = dispatcher.dispatch(RegisterSample::new(0xE4, 0x0008_0000)) else {
            panic!("expected a decoded report");
        };
        assert_eq!(report.tokens, vec!["Rgmii0Low"]);
    }

    proptest! {
        #[test]
        fn prop_coverage_partitions_value(idx in 0usize..KNOWN.len(), value in any::<u32>()) {
            let outcome = Dispatcher::default().dispatch(RegisterSample::new(KNOWN[idx], value));
            let Outcome::Decoded(report) = outcome else {
                return Err(TestCaseError::fail("known register not decoded"));
            };
            let c = report.coverage;
            prop_assert_eq!(c.union(), value);
            prop_assert_eq!(c.claimed & c.ignored, 0);
            prop_assert_eq!(c.claimed & c.residual, 0);
            prop_assert_eq!(c.ignored & c.residual, 0);
            prop_assert_eq!(report.diagnostic.map(|d| d.bits).unwrap_or(0), c.residual);
        }

        #[test]
        fn prop_unknown_offsets_never_panic(offset in any::<u32>(), value in any::<u32>()) {
            prop_assume!(Register::from_offset(offset).is_none());
            prop_assume!(!Register::is_ignored_offset(offset));
            let outcome = Dispatcher::default().dispatch(RegisterSample::new(offset, value));
            let lines = outcome.advisories();
            prop_assert_eq!(lines.len(), 1);
            let offset_hex = format!("{:#x}", offset);
            let value_hex = format!("{:#x}", value);
            prop_assert!(lines[0].contains(&offset_hex));
            prop_assert!(lines[0].contains(&value_hex));
        }
    }
}
