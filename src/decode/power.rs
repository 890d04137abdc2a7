//! PWS_REG decoder (power-on straps).

use super::field::{FieldSpec, Tokens, Word};
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::pws;
use crate::device::Register;

const POWER_ON_SEL: FieldSpec = FieldSpec::flag(pws::POWER_ON_SEL);
const PACKAGE48: FieldSpec = FieldSpec::flag(pws::PACKAGE48_EN);
const LED_OPEN_DRAIN: FieldSpec = FieldSpec::flag(pws::LED_OPEN_EN);
const SERDES_AEN: FieldSpec = FieldSpec::flag(pws::SERDES_AEN);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerToken {
    PowerOnSel,
    Package48,
    LedOpenDrain,
    SerdesAutoNeg,
}

pub fn extract(value: u32) -> (Tokens<PowerToken>, Word) {
    let mut tokens = Tokens::new();
    let word = Word::new(value);

    let (set, word) = word.take_flag(POWER_ON_SEL);
    tokens.insert_if(set, PowerToken::PowerOnSel);
    let (set, word) = word.take_flag(PACKAGE48);
    tokens.insert_if(set, PowerToken::Package48);
    let (set, word) = word.take_flag(LED_OPEN_DRAIN);
    tokens.insert_if(set, PowerToken::LedOpenDrain);
    let (set, word) = word.take_flag(SERDES_AEN);
    tokens.insert_if(set, PowerToken::SerdesAutoNeg);

    (tokens, word.ignore(pws::UNMODELED_MASK))
}

fn advice(token: PowerToken) -> &'static str {
    match token {
        PowerToken::PowerOnSel => "Set qca,power-on-sel in the switch node",
        PowerToken::Package48 => "48-pin package, assume qca8327: set qca,package48 in the switch node",
        PowerToken::LedOpenDrain => "Set qca,led-open-drain in the switch node",
        PowerToken::SerdesAutoNeg => {
            "SerDes autonegotiation strap is set: no property, the driver programs it for SGMII ports"
        }
    }
}

pub fn decode(value: u32, opts: &DecodeOptions) -> Report {
    let mut report = Report::new(Register::PowerStrap, value);
    let (tokens, word) = extract(value);
    report.trace(opts.verbose, tokens.render());
    for token in tokens.iter() {
        report.advise(advice(*token));
    }
    close(&mut report, word);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_flag_one_line() {
        let report = decode(pws::POWER_ON_SEL | pws::LED_OPEN_EN, &DecodeOptions::default());
        assert_eq!(
            report.advisories,
            vec![
                "Set qca,power-on-sel in the switch node",
                "Set qca,led-open-drain in the switch node",
            ]
        );
    }

    #[test]
    fn test_package48() {
        let report = decode(pws::PACKAGE48_EN, &DecodeOptions::default());
        assert_eq!(report.advisories.len(), 1);
        assert!(report.advisories[0].contains("qca,package48"));
    }

    #[test]
    fn test_unmodeled_bits_are_not_residual() {
        let report = decode(pws::UNMODELED_MASK, &DecodeOptions::default());
        assert!(report.advisories.is_empty());
        assert!(report.diagnostic.is_none());
        assert_eq!(report.coverage.ignored, pws::UNMODELED_MASK);
    }

    #[test]
    fn test_residual() {
        let report = decode(pws::SERDES_AEN | 0x0000_0001, &DecodeOptions::default());
        assert_eq!(report.advisories.len(), 1);
        assert_eq!(report.diagnostic.map(|d| d.bits), Some(0x1));
    }

    #[test]
    fn test_typical_strap() {
        // Power-on select plus unmodeled strap bits
        let report = decode(0x8000_1320, &DecodeOptions::default());
        assert_eq!(report.advisories, vec!["Set qca,power-on-sel in the switch node"]);
        assert!(report.diagnostic.is_none());
    }
}
