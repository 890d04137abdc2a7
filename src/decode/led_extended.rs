//! LED_CTRL3 decoder.
//!
//! ```text
//!   [31:26] reserved
//!   [25:8]  pattern_en, 2 bits per slot; slot k = (port - 1) * 3 + led
//!   [7:2]   unused
//!   [1:0]   blink_high_time
//! ```

use std::fmt;

use super::field::{FieldSpec, Tokens, Word};
use super::led_normal::PatternMode;
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::led;
use crate::device::Register;

const BLINK_HIGH_TIME: FieldSpec = FieldSpec::new(led::BLINK_HIGH_TIME_MASK, 0);

/// Duty cycle of the blink pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkHighTime {
    Half,
    Eighth,
    Quarter,
    ThreeQuarters,
}

impl BlinkHighTime {
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => BlinkHighTime::Half,
            1 => BlinkHighTime::Eighth,
            2 => BlinkHighTime::Quarter,
            _ => BlinkHighTime::ThreeQuarters,
        }
    }
}

impl fmt::Display for BlinkHighTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlinkHighTime::Half => write!(f, "50%"),
            BlinkHighTime::Eighth => write!(f, "12.5%"),
            BlinkHighTime::Quarter => write!(f, "25%"),
            BlinkHighTime::ThreeQuarters => write!(f, "75%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedToken {
    /// Only recorded when not the 50% default
    BlinkHighTime(BlinkHighTime),
    Pattern { port: u8, led: u8, mode: PatternMode },
}

/// Pattern slot for `port` (1..=3) and `led` (0..=2).
fn slot(port: u8, index: u8) -> FieldSpec {
    let k = (port - 1) * led::CTRL3_LEDS_PER_PORT + index;
    let shift = led::CTRL3_PATTERN_BASE_SHIFT + k * led::CTRL3_PATTERN_WIDTH;
    FieldSpec::new(0x3 << shift, shift)
}

pub fn extract(value: u32) -> (Tokens<ExtendedToken>, Word) {
    let mut tokens = Tokens::new();
    let word = Word::new(value);

    let (blink, word) = word.take(BLINK_HIGH_TIME);
    tokens.insert_if(blink != 0, ExtendedToken::BlinkHighTime(BlinkHighTime::from_bits(blink)));
    let mut word = word.ignore(led::CTRL3_GAP_MASK);

    for port in 1..=led::CTRL3_PORTS {
        for index in 0..led::CTRL3_LEDS_PER_PORT {
            let (mode, next) = word.take(slot(port, index));
            word = next;
            tokens.insert(ExtendedToken::Pattern {
                port,
                led: index,
                mode: PatternMode::from_bits(mode),
            });
        }
    }

    (tokens, word.ignore(led::CTRL3_UNMODELED_MASK))
}

/// One line per slot, then the blink duty cycle if it was changed.
pub fn synthesize(tokens: &Tokens<ExtendedToken>) -> Vec<String> {
    let mut lines: Vec<String> = tokens
        .iter()
        .filter_map(|t| match t {
            ExtendedToken::Pattern { port, led, mode } => {
                Some(format!("port{} LED {} is set to mode {}", port, led, mode))
            }
            ExtendedToken::BlinkHighTime(_) => None,
        })
        .collect();

    let blink = tokens.find_map(|t| match t {
        ExtendedToken::BlinkHighTime(time) => Some(*time),
        _ => None,
    });
    if let Some(time) = blink {
        lines.push(format!(
            "Blink high time set to {}: not supported by qca,led_rules",
            time
        ));
    }

    lines
}

pub fn decode(value: u32, opts: &DecodeOptions) -> Report {
    let mut report = Report::new(Register::LedExtended, value);
    let (tokens, word) = extract(value);
    report.trace(opts.verbose, tokens.render());
    report.advisories = synthesize(&tokens);
    close(&mut report, word);
    report
}
