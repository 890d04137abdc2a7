//! LED_CTRL0..2 decoder.
//!
//! Each register carries the rules for one LED index, split in two 16-bit
//! halves with the same layout:
//!
//! ```text
//!   [31:16] phy4      (pattern applies to port 4)
//!   [15:0]  phy0123   (pattern applies to port 0)
//!
//!   [15:14] pattern_en   [13] full_duplex  [12] half_duplex  [11] power_on
//!   [10] link_1000m  [9] link_100m  [8] link_10m  [7] col_blink
//!   [5] rx_blink  [4] tx_blink  [2] linkup_over  [1:0] blink_freq
//! ```
//!
//! A half that still holds its reset value is left alone. Anything else
//! needs a `qca,led_rules` entry.

use std::fmt;

use super::field::{FieldSpec, Tokens, Word};
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::led;
use crate::device::{LedIndex, Register};

const BLINK_FREQ: FieldSpec = FieldSpec::new(led::BLINK_FREQ_MASK, 0);
const LINKUP_OVER: FieldSpec = FieldSpec::flag(led::LINKUP_OVER_EN);
const TX_BLINK: FieldSpec = FieldSpec::flag(led::TX_BLINK_EN);
const RX_BLINK: FieldSpec = FieldSpec::flag(led::RX_BLINK_EN);
const COL_BLINK: FieldSpec = FieldSpec::flag(led::COL_BLINK_EN);
const LINK_10M: FieldSpec = FieldSpec::flag(led::LINK_10M_EN);
const LINK_100M: FieldSpec = FieldSpec::flag(led::LINK_100M_EN);
const LINK_1000M: FieldSpec = FieldSpec::flag(led::LINK_1000M_EN);
const POWER_ON: FieldSpec = FieldSpec::flag(led::POWER_ON_LIGHT_EN);
const HALF_DUPLEX: FieldSpec = FieldSpec::flag(led::HALF_DUPLEX_LIGHT_EN);
const FULL_DUPLEX: FieldSpec = FieldSpec::flag(led::FULL_DUPLEX_LIGHT_EN);
const PATTERN_EN: FieldSpec = FieldSpec::new(led::PATTERN_EN_MASK, led::PATTERN_EN_SHIFT);

/// LED pattern enable, shared with LED_CTRL3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    Off,
    Blink,
    On,
    Rule,
}

impl PatternMode {
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => PatternMode::Off,
            1 => PatternMode::Blink,
            2 => PatternMode::On,
            _ => PatternMode::Rule,
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternMode::Off => write!(f, "off"),
            PatternMode::Blink => write!(f, "blink"),
            PatternMode::On => write!(f, "on"),
            PatternMode::Rule => write!(f, "rule"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkFrequency {
    Hz2,
    Hz4,
    Hz8,
    Auto,
}

impl BlinkFrequency {
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => BlinkFrequency::Hz2,
            1 => BlinkFrequency::Hz4,
            2 => BlinkFrequency::Hz8,
            _ => BlinkFrequency::Auto,
        }
    }
}

impl fmt::Display for BlinkFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlinkFrequency::Hz2 => write!(f, "2hz"),
            BlinkFrequency::Hz4 => write!(f, "4hz"),
            BlinkFrequency::Hz8 => write!(f, "8hz"),
            BlinkFrequency::Auto => write!(f, "auto"),
        }
    }
}

/// Which half of the register is being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortGroup {
    /// Low half-word, PHYs 0 to 3
    Phy0123,
    /// High half-word, PHY 4
    Phy4,
}

impl PortGroup {
    pub const ALL: [PortGroup; 2] = [PortGroup::Phy0123, PortGroup::Phy4];

    fn shift(self) -> u8 {
        match self {
            PortGroup::Phy0123 => 0,
            PortGroup::Phy4 => led::HALF_SHIFT,
        }
    }

    /// Port named in the pattern line.
    fn pattern_port(self) -> u8 {
        match self {
            PortGroup::Phy0123 => 0,
            PortGroup::Phy4 => 4,
        }
    }
}

impl fmt::Display for PortGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortGroup::Phy0123 => write!(f, "phy0123"),
            PortGroup::Phy4 => write!(f, "phy4"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedToken {
    /// Only recorded when not the 2Hz default
    BlinkFrequency(BlinkFrequency),
    LinkupOverride,
    TxBlink,
    RxBlink,
    CollisionBlink,
    Link10M,
    Link100M,
    Link1000M,
    PowerOnReset,
    HalfDuplex,
    FullDuplex,
    Pattern(PatternMode),
}

impl LedToken {
    /// Rule keyword, `None` for the pattern which gets its own line.
    fn keyword(self) -> Option<String> {
        let word = match self {
            LedToken::BlinkFrequency(freq) => return Some(format!("blink-{}", freq)),
            LedToken::LinkupOverride => "linkup-over",
            LedToken::TxBlink => "tx-blink",
            LedToken::RxBlink => "rx-blink",
            LedToken::CollisionBlink => "collision-blink",
            LedToken::Link10M => "link-10M",
            LedToken::Link100M => "link-100M",
            LedToken::Link1000M => "link-1000M",
            LedToken::PowerOnReset => "power-on-reset",
            LedToken::HalfDuplex => "half-duplex",
            LedToken::FullDuplex => "full-duplex",
            LedToken::Pattern(_) => return None,
        };
        Some(word.to_string())
    }
}

/// Reset value of one half-word.
pub fn default_half(index: LedIndex) -> u32 {
    match index {
        LedIndex::Led0 => led::LED_CTRL0_DEFAULT,
        LedIndex::Led1 => led::LED_CTRL1_DEFAULT,
        LedIndex::Led2 => led::LED_CTRL2_DEFAULT,
    }
}

/// Decode one half of `word`.
///
/// Returns `None` when the half is at its reset value; its bits are then
/// ignored as a whole.
pub fn extract_half(word: Word, index: LedIndex, group: PortGroup) -> (Option<Tokens<LedToken>>, Word) {
    let shift = group.shift();
    let default = default_half(index);
    let half = (word.remaining() >> shift) & led::HALF_MASK;

    if half == default {
        return (None, word.ignore(led::HALF_MASK << shift));
    }

    let mut tokens = Tokens::new();

    let (freq, word) = word.take(BLINK_FREQ.shifted(shift));
    tokens.insert_if(freq != 0, LedToken::BlinkFrequency(BlinkFrequency::from_bits(freq)));

    let flags = [
        (LINKUP_OVER, LedToken::LinkupOverride),
        (TX_BLINK, LedToken::TxBlink),
        (RX_BLINK, LedToken::RxBlink),
        (COL_BLINK, LedToken::CollisionBlink),
        (LINK_10M, LedToken::Link10M),
        (LINK_100M, LedToken::Link100M),
        (LINK_1000M, LedToken::Link1000M),
        (POWER_ON, LedToken::PowerOnReset),
        (HALF_DUPLEX, LedToken::HalfDuplex),
        (FULL_DUPLEX, LedToken::FullDuplex),
    ];
    let word = flags.into_iter().fold(word, |word, (field, token)| {
        let (set, word) = word.take_flag(field.shifted(shift));
        tokens.insert_if(set, token);
        word
    });

    let (pattern, word) = word.take(PATTERN_EN.shifted(shift));
    tokens.insert(LedToken::Pattern(PatternMode::from_bits(pattern)));

    (Some(tokens), word.ignore(default << shift))
}

/// Advisory lines for one customised half.
pub fn synthesize(index: LedIndex, group: PortGroup, tokens: &Tokens<LedToken>) -> Vec<String> {
    let keywords: Vec<String> = tokens.iter().filter_map(|t| t.keyword()).collect();

    let mut rule = format!(
        "Custom rule for {} LED {} applied using qca,led_rules",
        group,
        index.number()
    );
    if !keywords.is_empty() {
        rule.push_str(": ");
        rule.push_str(&keywords.join(", "));
    }

    let mode = tokens
        .find_map(|t| match t {
            LedToken::Pattern(mode) => Some(*mode),
            _ => None,
        })
        .unwrap_or(PatternMode::Off);

    vec![
        rule,
        format!(
            "port{} LED {} is set to mode {}",
            group.pattern_port(),
            index.number(),
            mode
        ),
    ]
}

pub fn decode(index: LedIndex, value: u32, opts: &DecodeOptions) -> Report {
    let mut report = Report::new(Register::LedNormal(index), value);
    let mut word = Word::new(value);
    let mut traced = Vec::new();

    for group in PortGroup::ALL {
        let (tokens, next) = extract_half(word, index, group);
        word = next;
        let Some(tokens) = tokens else {
            continue;
        };
        traced.extend(tokens.render().into_iter().map(|t| format!("{} {}", group, t)));
        report.advisories.extend(synthesize(index, group, &tokens));
    }

    report.trace(opts.verbose, traced);
    close(&mut report, word);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(index: LedIndex, value: u32) -> Vec<String> {
        decode(index, value, &DecodeOptions::default()).advisories
    }

    #[test]
    fn test_reset_values_are_silent() {
        for (index, half) in [
            (LedIndex::Led0, 0xCC35),
            (LedIndex::Led1, 0xCA35),
            (LedIndex::Led2, 0xC935),
        ] {
            let report = decode(index, (half << 16) | half, &DecodeOptions::default());
            assert!(report.is_quiet(), "{:?}", report);
        }
    }

    #[test]
    fn test_high_half_linkup_override() {
        let out = lines(LedIndex::Led0, 0x0004_CC35);
        assert_eq!(
            out,
            vec![
                "Custom rule for phy4 LED 0 applied using qca,led_rules: linkup-over",
                "port4 LED 0 is set to mode off",
            ]
        );
    }

    #[test]
    fn test_low_half_rule() {
        // tx/rx blink, all link speeds, pattern = rule, 4Hz
        let low = 0xC000 | 0x0700 | 0x0030 | 0x1;
        let out = lines(LedIndex::Led1, (0xCA35 << 16) | low);
        assert_eq!(
            out,
            vec![
                "Custom rule for phy0123 LED 1 applied using qca,led_rules: blink-4hz, tx-blink, rx-blink, link-10M, link-100M, link-1000M",
                "port0 LED 1 is set to mode rule",
            ]
        );
    }

    #[test]
    fn test_both_halves_customised() {
        let out = lines(LedIndex::Led2, 0x8000_4000);
        assert_eq!(
            out,
            vec![
                "Custom rule for phy0123 LED 2 applied using qca,led_rules",
                "port0 LED 2 is set to mode blink",
                "Custom rule for phy4 LED 2 applied using qca,led_rules",
                "port4 LED 2 is set to mode on",
            ]
        );
    }

    #[test]
    fn test_residual_in_high_half() {
        let report = decode(LedIndex::Led0, 0x0048_CC35, &DecodeOptions::default());
        assert_eq!(report.diagnostic.map(|d| d.bits), Some(0x0048_0000));
        assert_eq!(report.advisories.len(), 2);
    }

    #[test]
    fn test_verbose_tokens_prefixed() {
        let opts = DecodeOptions { verbose: true, ..Default::default() };
        let report = decode(LedIndex::Led0, 0x0004_CC35, &opts);
        assert_eq!(report.tokens, vec!["phy4 LinkupOverride", "phy4 Pattern(Off)"]);
    }

    fn low_lines(index: LedIndex, value: u32) -> Vec<String> {
        lines(index, value)
            .into_iter()
            .filter(|l| l.contains("phy0123") || l.starts_with("port0"))
            .collect()
    }

    fn high_lines(index: LedIndex, value: u32) -> Vec<String> {
        lines(index, value)
            .into_iter()
            .filter(|l| l.contains("phy4") || l.starts_with("port4"))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_halves_independent(low in 0u32..=0xFFFF, high_a in 0u32..=0xFFFF, high_b in 0u32..=0xFFFF) {
            let a = (high_a << 16) | low;
            let b = (high_b << 16) | low;
            prop_assert_eq!(low_lines(LedIndex::Led0, a), low_lines(LedIndex::Led0, b));
        }

        #[test]
        fn prop_high_half_independent(high in 0u32..=0xFFFF, low_a in 0u32..=0xFFFF, low_b in 0u32..=0xFFFF) {
            let a = (high << 16) | low_a;
            let b = (high << 16) | low_b;
            prop_assert_eq!(high_lines(LedIndex::Led1, a), high_lines(LedIndex::Led1, b));
        }
    }
}
