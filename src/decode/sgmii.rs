//! SGMII_CTRL decoder.

use std::fmt;

use super::field::{FieldSpec, Tokens, Word};
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::sgmii;
use crate::device::Register;

const MODE_CTRL: FieldSpec = FieldSpec::new(sgmii::MODE_CTRL_MASK, sgmii::MODE_CTRL_SHIFT);
const EN_PLL: FieldSpec = FieldSpec::flag(sgmii::EN_PLL);
const EN_RX: FieldSpec = FieldSpec::flag(sgmii::EN_RX);
const EN_TX: FieldSpec = FieldSpec::flag(sgmii::EN_TX);
const EN_SD: FieldSpec = FieldSpec::flag(sgmii::EN_SD);

/// SerDes clock mode (`mode_ctrl_25m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgmiiClockMode {
    BaseX,
    Phy,
    Mac,
}

impl SgmiiClockMode {
    /// Value 3 is not documented.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(SgmiiClockMode::BaseX),
            1 => Some(SgmiiClockMode::Phy),
            2 => Some(SgmiiClockMode::Mac),
            _ => None,
        }
    }
}

impl fmt::Display for SgmiiClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SgmiiClockMode::BaseX => write!(f, "BASE-X"),
            SgmiiClockMode::Phy => write!(f, "PHY"),
            SgmiiClockMode::Mac => write!(f, "MAC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgmiiToken {
    ClockMode(SgmiiClockMode),
    EnablePll,
    EnableRx,
    EnableTx,
    EnableSignalDetect,
}

pub fn extract(value: u32) -> (Tokens<SgmiiToken>, Word) {
    let mut tokens = Tokens::new();
    let word = Word::new(value);

    let (mode, word) = word.take(MODE_CTRL);
    match SgmiiClockMode::from_bits(mode) {
        Some(mode) => tokens.insert(SgmiiToken::ClockMode(mode)),
        None => log::debug!("SGMII_CTRL: undefined clock mode {}", mode),
    }
    let (set, word) = word.take_flag(EN_PLL);
    tokens.insert_if(set, SgmiiToken::EnablePll);
    let (set, word) = word.take_flag(EN_RX);
    tokens.insert_if(set, SgmiiToken::EnableRx);
    let (set, word) = word.take_flag(EN_TX);
    tokens.insert_if(set, SgmiiToken::EnableTx);
    let (set, word) = word.take_flag(EN_SD);
    tokens.insert_if(set, SgmiiToken::EnableSignalDetect);

    (tokens, word.ignore(sgmii::UNMODELED_MASK))
}

pub fn synthesize(tokens: &Tokens<SgmiiToken>) -> Vec<String> {
    let mut lines = Vec::new();

    let mode = tokens.find_map(|t| match t {
        SgmiiToken::ClockMode(mode) => Some(*mode),
        _ => None,
    });
    if let Some(mode) = mode {
        lines.push(format!(
            "SGMII clock mode set to {}; PHY mode is selected by the qca8k driver and can be ignored",
            mode
        ));
    }

    let pll = [SgmiiToken::EnablePll, SgmiiToken::EnableRx, SgmiiToken::EnableTx]
        .into_iter()
        .any(|t| tokens.contains(t));
    if pll {
        lines.push("Set qca,sgmii-enable-pll in the CPU port node that uses SGMII".to_string());
    }

    lines
}

pub fn decode(value: u32, opts: &DecodeOptions) -> Report {
    let mut report = Report::new(Register::SgmiiCtrl, value);
    let (tokens, word) = extract(value);
    report.trace(opts.verbose, tokens.render());
    report.advisories = synthesize(&tokens);
    close(&mut report, word);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(value: u32) -> Vec<String> {
        decode(value, &DecodeOptions::default()).advisories
    }

    #[test]
    fn test_clock_modes() {
        assert!(lines(0x0000_0000)[0].contains("set to BASE-X"));
        assert!(lines(0x0040_0000)[0].contains("set to PHY"));
        assert!(lines(0x0080_0000)[0].contains("set to MAC"));
    }

    #[test]
    fn test_undefined_mode_is_silent() {
        let report = decode(0x00C0_0000, &DecodeOptions::default());
        assert!(report.advisories.is_empty());
        assert!(report.diagnostic.is_none());
        assert_eq!(report.coverage.claimed, 0x00C0_0000);
    }

    #[test]
    fn test_pll_advice_single_line() {
        let out = lines(0x0040_0000 | sgmii::EN_PLL | sgmii::EN_RX | sgmii::EN_TX);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], "Set qca,sgmii-enable-pll in the CPU port node that uses SGMII");

        let out = lines(0x0040_0000 | sgmii::EN_TX);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_signal_detect_alone() {
        let out = lines(0x0040_0000 | sgmii::EN_SD);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_typical_value() {
        // 0xc74164de from a common AR8337 board
        let report = decode(0xC741_64DE, &DecodeOptions::default());
        assert_eq!(report.advisories.len(), 2);
        assert!(report.advisories[0].contains("PHY"));
        assert!(report.diagnostic.is_none());
    }
}
