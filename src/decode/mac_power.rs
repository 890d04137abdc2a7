//! MAC_POWER_SEL decoder (RGMII I/O voltage).

use super::field::{FieldSpec, Tokens, Word};
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::mac_power;
use crate::device::Register;

const RGMII0_1_8V: FieldSpec = FieldSpec::flag(mac_power::RGMII0_1_8V);
const RGMII56_1_8V: FieldSpec = FieldSpec::flag(mac_power::RGMII56_1_8V);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacPowerToken {
    /// RGMII0 pads at 1.8V
    Rgmii0Low,
    /// RGMII5/6 pads at 1.8V
    Rgmii56Low,
}

pub fn extract(value: u32) -> (Tokens<MacPowerToken>, Word) {
    let mut tokens = Tokens::new();
    let word = Word::new(value);

    let (set, word) = word.take_flag(RGMII0_1_8V);
    tokens.insert_if(set, MacPowerToken::Rgmii0Low);
    let (set, word) = word.take_flag(RGMII56_1_8V);
    tokens.insert_if(set, MacPowerToken::Rgmii56Low);

    (tokens, word.ignore(mac_power::UNMODELED_MASK))
}

pub fn decode(value: u32, opts: &DecodeOptions) -> Report {
    let mut report = Report::new(Register::MacPowerSel, value);
    let (tokens, word) = extract(value);
    report.trace(opts.verbose, tokens.render());

    if tokens.contains(MacPowerToken::Rgmii0Low) {
        report.advise("Set qca,rgmii0-1-8v in the switch node");
    }
    if tokens.contains(MacPowerToken::Rgmii56Low) {
        report.advise("Set qca,rgmii56-1-8v in the switch node");
    }

    close(&mut report, word);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgmii0_only() {
        let report = decode(0x0008_0000, &DecodeOptions::default());
        assert_eq!(report.advisories, vec!["Set qca,rgmii0-1-8v in the switch node"]);
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn test_both_rails() {
        let report = decode(0x000C_0000 | mac_power::UNMODELED_MASK, &DecodeOptions::default());
        assert_eq!(report.advisories.len(), 2);
        assert_eq!(report.advisories[1], "Set qca,rgmii56-1-8v in the switch node");
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn test_residual() {
        let report = decode(0x0010_0000, &DecodeOptions::default());
        assert!(report.advisories.is_empty());
        assert_eq!(report.diagnostic.map(|d| d.bits), Some(0x0010_0000));
    }
}
