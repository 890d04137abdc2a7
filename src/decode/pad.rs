//! PADn_MODE decoder (CPU port interface mode).
//!
//! The PAD registers select RGMII or SGMII for ports 0, 5 and 6 together
//! with the RGMII clock delays. The binding expresses the delay enables
//! through `phy-mode` and the delay steps through `*-internal-delay-ps`.

use super::field::{FieldSpec, Tokens, Word};
use super::report::Report;
use super::{close, DecodeOptions};
use crate::device::registers_spec::pad;
use crate::device::{CpuPort, Register};

const MAC06_EXCHANGE: FieldSpec = FieldSpec::flag(pad::MAC06_EXCHANGE_EN);
const RGMII: FieldSpec = FieldSpec::flag(pad::RGMII_EN);
const TX_DELAY: FieldSpec = FieldSpec::flag(pad::RGMII_TXCLK_DELAY_EN);
const RX_DELAY: FieldSpec = FieldSpec::flag(pad::RGMII_RXCLK_DELAY_EN);
const TX_DELAY_SEL: FieldSpec =
    FieldSpec::new(pad::RGMII_TXCLK_DELAY_SEL_MASK, pad::RGMII_TXCLK_DELAY_SEL_SHIFT);
const RX_DELAY_SEL: FieldSpec =
    FieldSpec::new(pad::RGMII_RXCLK_DELAY_SEL_MASK, pad::RGMII_RXCLK_DELAY_SEL_SHIFT);
const RX_FALLING: FieldSpec = FieldSpec::flag(pad::SGMII_RXCLK_FALLING_EDGE);
const TX_FALLING: FieldSpec = FieldSpec::flag(pad::SGMII_TXCLK_FALLING_EDGE);
const SGMII: FieldSpec = FieldSpec::flag(pad::SGMII_EN);

/// Decoded PAD field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadToken {
    Port(CpuPort),
    Mac06Exchange,
    Rgmii,
    RgmiiTxDelay,
    RgmiiRxDelay,
    /// Transmit delay step, only recorded when it differs from the reset value
    TxDelaySelect(u8),
    /// Receive delay step, only recorded when it differs from the reset value
    RxDelaySelect(u8),
    RxFallingEdge,
    TxFallingEdge,
    Sgmii,
}

/// Pull every PAD field out of `value`.
pub fn extract(port: CpuPort, value: u32) -> (Tokens<PadToken>, Word) {
    let mut tokens = Tokens::new();
    tokens.insert(PadToken::Port(port));

    let word = Word::new(value);
    let (mac06, word) = word.take_flag(MAC06_EXCHANGE);
    tokens.insert_if(mac06, PadToken::Mac06Exchange);
    let (rgmii, word) = word.take_flag(RGMII);
    tokens.insert_if(rgmii, PadToken::Rgmii);
    let (tx_delay, word) = word.take_flag(TX_DELAY);
    tokens.insert_if(tx_delay, PadToken::RgmiiTxDelay);
    let (rx_delay, word) = word.take_flag(RX_DELAY);
    tokens.insert_if(rx_delay, PadToken::RgmiiRxDelay);

    let (tx_sel, word) = word.take(TX_DELAY_SEL);
    let tx_sel = tx_sel as u8;
    tokens.insert_if(tx_sel != pad::TX_DELAY_SEL_DEFAULT, PadToken::TxDelaySelect(tx_sel));
    let (rx_sel, word) = word.take(RX_DELAY_SEL);
    let rx_sel = rx_sel as u8;
    tokens.insert_if(rx_sel != pad::RX_DELAY_SEL_DEFAULT, PadToken::RxDelaySelect(rx_sel));

    let (rx_falling, word) = word.take_flag(RX_FALLING);
    tokens.insert_if(rx_falling, PadToken::RxFallingEdge);
    let (tx_falling, word) = word.take_flag(TX_FALLING);
    tokens.insert_if(tx_falling, PadToken::TxFallingEdge);
    let (sgmii, word) = word.take_flag(SGMII);
    tokens.insert_if(sgmii, PadToken::Sgmii);

    (tokens, word)
}

/// RGMII `phy-mode` implied by the enable and delay flags.
fn rgmii_mode(tokens: &Tokens<PadToken>) -> Option<&'static str> {
    let tx = tokens.contains(PadToken::RgmiiTxDelay);
    let rx = tokens.contains(PadToken::RgmiiRxDelay);
    match (tx, rx) {
        (true, true) => Some("rgmii-id"),
        (true, false) => Some("rgmii-txid"),
        (false, true) => Some("rgmii-rxid"),
        (false, false) if tokens.contains(PadToken::Rgmii) => Some("rgmii"),
        (false, false) => None,
    }
}

/// Advisory lines for an extracted PAD register.
pub fn synthesize(port: CpuPort, tokens: &Tokens<PadToken>) -> Vec<String> {
    let mut lines = vec![format!("Configuration for CPU port {}", port.number())];

    if let Some(mode) = rgmii_mode(tokens) {
        lines.push(format!("Set phy-mode = \"{}\" in the port{} node", mode, port.number()));
    }

    if tokens.contains(PadToken::RgmiiTxDelay) {
        let sel = tokens.find_map(|t| match t {
            PadToken::TxDelaySelect(sel) => Some(*sel),
            _ => None,
        });
        if let Some(sel) = sel {
            lines.push(format!(
                "Set tx-internal-delay-ps = <{}> in the port{} node",
                sel as u32 * pad::DELAY_STEP_PS,
                port.number()
            ));
        }
    }

    if tokens.contains(PadToken::RgmiiRxDelay) {
        let sel = tokens.find_map(|t| match t {
            PadToken::RxDelaySelect(sel) => Some(*sel),
            _ => None,
        });
        if let Some(sel) = sel {
            lines.push(format!(
                "Set rx-internal-delay-ps = <{}> in the port{} node",
                sel as u32 * pad::DELAY_STEP_PS,
                port.number()
            ));
        }
    }

    if tokens.contains(PadToken::Sgmii) {
        lines.push(format!("Set phy-mode = \"sgmii\" in the port{} node", port.number()));
    }
    if tokens.contains(PadToken::RxFallingEdge) {
        lines.push(format!("Set qca,sgmii-rxclk-falling-edge in the port{} node", port.number()));
    }
    if tokens.contains(PadToken::TxFallingEdge) {
        lines.push(format!("Set qca,sgmii-txclk-falling-edge in the port{} node", port.number()));
    }
    if tokens.contains(PadToken::Mac06Exchange) {
        lines.push("MAC0 and MAC6 are exchanged: set qca,mac6-exchange".to_string());
    }

    lines
}

fn absent_note(port: CpuPort) -> String {
    match port {
        CpuPort::Port0 => {
            "PAD0_MODE is 0x0: CPU port 0 looks unconfigured, which should not happen on a working board"
                .to_string()
        }
        other => format!(
            "PAD{}_MODE is 0x0: port {} is probably not attached",
            other.number(),
            other.number()
        ),
    }
}

/// Decode one PAD register.
pub fn decode(port: CpuPort, value: u32, opts: &DecodeOptions) -> Report {
    let register = Register::Pad(port);
    let mut report = Report::new(register, value);

    if value == 0 {
        report.advise(absent_note(port));
        close(&mut report, Word::new(value));
        return report;
    }

    let (tokens, word) = extract(port, value);
    report.trace(opts.verbose, tokens.render());
    report.advisories = synthesize(port, &tokens);
    close(&mut report, word);
    report
}
