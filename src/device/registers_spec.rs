//! QCA8K / AR8327 Register Address Specification
//!
//! Offsets, bit layouts and default values for the registers that appear in
//! `qca,ar8327-initvals` blocks. Layouts follow the AR8327 datasheet and the
//! Linux `qca8k` driver headers.
//!
//! Masks named `UNMODELED_MASK` cover bits that have no equivalent in the
//! `qca8k` binding. They are cleared before the residual check and are kept
//! as-is.

// ============================================================================
// PAD mode registers (CPU facing ports)
// ============================================================================

/// PAD0_MODE: CPU port 0
pub const PAD0_MODE: u32 = 0x04;

/// PAD5_MODE: port 5
pub const PAD5_MODE: u32 = 0x08;

/// PAD6_MODE: port 6
pub const PAD6_MODE: u32 = 0x0C;

pub mod pad {
    //! PADn_MODE bit fields.

    /// Swap MAC0 and MAC6 [31]
    pub const MAC06_EXCHANGE_EN: u32 = 0x8000_0000;
    /// RGMII interface enable [26]
    pub const RGMII_EN: u32 = 0x0400_0000;
    /// RGMII transmit clock delay enable [25]
    pub const RGMII_TXCLK_DELAY_EN: u32 = 0x0200_0000;
    /// RGMII receive clock delay enable [24]
    pub const RGMII_RXCLK_DELAY_EN: u32 = 0x0100_0000;
    /// Transmit delay select [23:22]
    pub const RGMII_TXCLK_DELAY_SEL_MASK: u32 = 0x00C0_0000;
    pub const RGMII_TXCLK_DELAY_SEL_SHIFT: u8 = 22;
    /// Receive delay select [21:20]
    pub const RGMII_RXCLK_DELAY_SEL_MASK: u32 = 0x0030_0000;
    pub const RGMII_RXCLK_DELAY_SEL_SHIFT: u8 = 20;
    /// SGMII receive clock on falling edge [19]
    pub const SGMII_RXCLK_FALLING_EDGE: u32 = 0x0008_0000;
    /// SGMII transmit clock on falling edge [18]
    pub const SGMII_TXCLK_FALLING_EDGE: u32 = 0x0004_0000;
    /// SGMII interface enable [7]
    pub const SGMII_EN: u32 = 0x0000_0080;

    /// Reset value of the transmit delay select
    pub const TX_DELAY_SEL_DEFAULT: u8 = 1;
    /// Reset value of the receive delay select
    pub const RX_DELAY_SEL_DEFAULT: u8 = 2;
    /// One delay select step in picoseconds
    pub const DELAY_STEP_PS: u32 = 1000;
}

// ============================================================================
// Power-on strapping (PWS_REG)
// ============================================================================

/// PWS_REG: power-on strap values
pub const PWS_REG: u32 = 0x10;

pub mod pws {
    //! PWS_REG bit fields.

    /// Power-on select [31]
    pub const POWER_ON_SEL: u32 = 0x8000_0000;
    /// 48-pin package (QCA8327) [30]
    pub const PACKAGE48_EN: u32 = 0x4000_0000;
    /// LED pins driven open-drain [24]
    pub const LED_OPEN_EN: u32 = 0x0100_0000;
    /// SerDes auto-negotiation [7]
    pub const SERDES_AEN: u32 = 0x0000_0080;

    pub const UNMODELED_MASK: u32 = 0x0026_1320;
}

// ============================================================================
// LED control
// ============================================================================

/// LED_CTRL0: LED 0 rules
pub const LED_CTRL0: u32 = 0x50;
/// LED_CTRL1: LED 1 rules
pub const LED_CTRL1: u32 = 0x54;
/// LED_CTRL2: LED 2 rules
pub const LED_CTRL2: u32 = 0x58;
/// LED_CTRL3: per-port pattern enables
pub const LED_CTRL3: u32 = 0x5C;

pub mod led {
    //! LED_CTRL0..2 half-word layout (identical for both halves) and
    //! LED_CTRL3 layout.

    /// Width of one port-group half
    pub const HALF_SHIFT: u8 = 16;
    pub const HALF_MASK: u32 = 0xFFFF;

    /// Blink frequency [1:0]
    pub const BLINK_FREQ_MASK: u32 = 0x0003;
    pub const LINKUP_OVER_EN: u32 = 0x0004;
    pub const TX_BLINK_EN: u32 = 0x0010;
    pub const RX_BLINK_EN: u32 = 0x0020;
    pub const COL_BLINK_EN: u32 = 0x0080;
    pub const LINK_10M_EN: u32 = 0x0100;
    pub const LINK_100M_EN: u32 = 0x0200;
    pub const LINK_1000M_EN: u32 = 0x0400;
    pub const POWER_ON_LIGHT_EN: u32 = 0x0800;
    pub const HALF_DUPLEX_LIGHT_EN: u32 = 0x1000;
    pub const FULL_DUPLEX_LIGHT_EN: u32 = 0x2000;
    /// Pattern enable [15:14]
    pub const PATTERN_EN_MASK: u32 = 0xC000;
    pub const PATTERN_EN_SHIFT: u8 = 14;

    /// Reset values of one half-word, per register
    pub const LED_CTRL0_DEFAULT: u32 = 0xCC35;
    pub const LED_CTRL1_DEFAULT: u32 = 0xCA35;
    pub const LED_CTRL2_DEFAULT: u32 = 0xC935;

    /// LED_CTRL3 blink high time [1:0]
    pub const BLINK_HIGH_TIME_MASK: u32 = 0x0000_0003;
    /// LED_CTRL3 bits between the blink high time and the first pattern slot
    pub const CTRL3_GAP_MASK: u32 = 0x0000_00FC;
    /// First LED_CTRL3 pattern slot
    pub const CTRL3_PATTERN_BASE_SHIFT: u8 = 8;
    pub const CTRL3_PATTERN_WIDTH: u8 = 2;
    /// Ports 1..=3 carry extended patterns
    pub const CTRL3_PORTS: u8 = 3;
    pub const CTRL3_LEDS_PER_PORT: u8 = 3;

    pub const CTRL3_UNMODELED_MASK: u32 = 0x03FF_FF00;
}

// ============================================================================
// SGMII / MAC power
// ============================================================================

/// SGMII_CTRL: SerDes control
pub const SGMII_CTRL: u32 = 0xE0;

/// MAC_POWER_SEL: RGMII I/O voltage
pub const MAC_POWER_SEL: u32 = 0xE4;

pub mod sgmii {
    //! SGMII_CTRL bit fields.

    pub const EN_PLL: u32 = 0x0000_0002;
    pub const EN_RX: u32 = 0x0000_0004;
    pub const EN_TX: u32 = 0x0000_0008;
    pub const EN_SD: u32 = 0x0000_0010;
    /// 25MHz clock mode [23:22]
    pub const MODE_CTRL_MASK: u32 = 0x00C0_0000;
    pub const MODE_CTRL_SHIFT: u8 = 22;

    pub const UNMODELED_MASK: u32 = 0xC701_64C0;
}

pub mod mac_power {
    //! MAC_POWER_SEL bit fields.

    /// RGMII0 I/O at 1.8V [19]
    pub const RGMII0_1_8V: u32 = 0x0008_0000;
    /// RGMII5/6 I/O at 1.8V [18]
    pub const RGMII56_1_8V: u32 = 0x0004_0000;

    pub const UNMODELED_MASK: u32 = 0x0002_A545;
}

// ============================================================================
// Ignored registers
// ============================================================================

/// Registers that show up in initvals blobs but carry nothing the binding
/// can express (port status, MIB and ACL windows).
pub const IGNORED_OFFSETS: &[u32] = &[
    0x0007C, 0x00094, 0x00970, 0x00974, 0x00978, 0x0097C, 0x00980, 0x00984, 0x00988, 0x0098C,
    0x00990, 0x00994, 0x00998, 0x0099C, 0x009A0, 0x009A4,
];
