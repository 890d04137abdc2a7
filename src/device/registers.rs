//! Register identities and samples.
//!
//! An initvals block is a list of `<offset value>` pairs. Each pair becomes a
//! [`RegisterSample`]; offsets the decoder understands resolve to a
//! [`Register`].

use std::fmt;

use super::registers_spec as spec;

/// Which switch block a set of initvals belongs to.
///
/// The device tree places the initvals under either the PHY 0 or PHY 4 node
/// (or a switch node at the same address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortContext {
    #[default]
    Phy0,
    Phy4,
}

impl fmt::Display for PortContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortContext::Phy0 => write!(f, "phy0"),
            PortContext::Phy4 => write!(f, "phy4"),
        }
    }
}

/// One captured `(offset, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSample {
    /// Register offset within the switch
    pub offset: u32,
    /// Raw 32-bit value written at boot
    pub value: u32,
}

impl RegisterSample {
    pub fn new(offset: u32, value: u32) -> Self {
        Self { offset, value }
    }
}

impl fmt::Display for RegisterSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} = {:#010x}", self.offset, self.value)
    }
}

/// CPU facing port configured by a PAD register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuPort {
    Port0,
    Port5,
    Port6,
}

impl CpuPort {
    /// Switch port number.
    pub fn number(self) -> u8 {
        match self {
            CpuPort::Port0 => 0,
            CpuPort::Port5 => 5,
            CpuPort::Port6 => 6,
        }
    }
}

/// LED index driven by one of LED_CTRL0..2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedIndex {
    Led0,
    Led1,
    Led2,
}

impl LedIndex {
    pub fn number(self) -> u8 {
        match self {
            LedIndex::Led0 => 0,
            LedIndex::Led1 => 1,
            LedIndex::Led2 => 2,
        }
    }
}

/// Every register the decoder has a field table for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// PAD0_MODE / PAD5_MODE / PAD6_MODE
    Pad(CpuPort),
    /// PWS_REG
    PowerStrap,
    /// LED_CTRL0..2, one per LED index
    LedNormal(LedIndex),
    /// LED_CTRL3
    LedExtended,
    /// SGMII_CTRL
    SgmiiCtrl,
    /// MAC_POWER_SEL
    MacPowerSel,
}

impl Register {
    /// Resolve an offset to a known register.
    pub fn from_offset(offset: u32) -> Option<Self> {
        match offset {
            spec::PAD0_MODE => Some(Register::Pad(CpuPort::Port0)),
            spec::PAD5_MODE => Some(Register::Pad(CpuPort::Port5)),
            spec::PAD6_MODE => Some(Register::Pad(CpuPort::Port6)),
            spec::PWS_REG => Some(Register::PowerStrap),
            spec::LED_CTRL0 => Some(Register::LedNormal(LedIndex::Led0)),
            spec::LED_CTRL1 => Some(Register::LedNormal(LedIndex::Led1)),
            spec::LED_CTRL2 => Some(Register::LedNormal(LedIndex::Led2)),
            spec::LED_CTRL3 => Some(Register::LedExtended),
            spec::SGMII_CTRL => Some(Register::SgmiiCtrl),
            spec::MAC_POWER_SEL => Some(Register::MacPowerSel),
            _ => None,
        }
    }

    /// Register offset.
    pub fn offset(self) -> u32 {
        match self {
            Register::Pad(CpuPort::Port0) => spec::PAD0_MODE,
            Register::Pad(CpuPort::Port5) => spec::PAD5_MODE,
            Register::Pad(CpuPort::Port6) => spec::PAD6_MODE,
            Register::PowerStrap => spec::PWS_REG,
            Register::LedNormal(LedIndex::Led0) => spec::LED_CTRL0,
            Register::LedNormal(LedIndex::Led1) => spec::LED_CTRL1,
            Register::LedNormal(LedIndex::Led2) => spec::LED_CTRL2,
            Register::LedExtended => spec::LED_CTRL3,
            Register::SgmiiCtrl => spec::SGMII_CTRL,
            Register::MacPowerSel => spec::MAC_POWER_SEL,
        }
    }

    /// Datasheet name.
    pub fn name(self) -> &'static str {
        match self {
            Register::Pad(CpuPort::Port0) => "PAD0_MODE",
            Register::Pad(CpuPort::Port5) => "PAD5_MODE",
            Register::Pad(CpuPort::Port6) => "PAD6_MODE",
            Register::PowerStrap => "PWS_REG",
            Register::LedNormal(LedIndex::Led0) => "LED_CTRL0",
            Register::LedNormal(LedIndex::Led1) => "LED_CTRL1",
            Register::LedNormal(LedIndex::Led2) => "LED_CTRL2",
            Register::LedExtended => "LED_CTRL3",
            Register::SgmiiCtrl => "SGMII_CTRL",
            Register::MacPowerSel => "MAC_POWER_SEL",
        }
    }

    /// True if the offset is listed as carrying nothing to convert.
    pub fn is_ignored_offset(offset: u32) -> bool {
        spec::IGNORED_OFFSETS.contains(&offset)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.name(), self.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_roundtrip() {
        let all = [
            Register::Pad(CpuPort::Port0),
            Register::Pad(CpuPort::Port5),
            Register::Pad(CpuPort::Port6),
            Register::PowerStrap,
            Register::LedNormal(LedIndex::Led0),
            Register::LedNormal(LedIndex::Led1),
            Register::LedNormal(LedIndex::Led2),
            Register::LedExtended,
            Register::SgmiiCtrl,
            Register::MacPowerSel,
        ];
        for reg in all {
            assert_eq!(Register::from_offset(reg.offset()), Some(reg), "{}", reg);
        }
    }

    #[test]
    fn test_unknown_offset() {
        assert_eq!(Register::from_offset(0x20), None);
        assert_eq!(Register::from_offset(0x7C), None);
    }

    #[test]
    fn test_ignored_offsets() {
        assert!(Register::is_ignored_offset(0x7C));
        assert!(Register::is_ignored_offset(0x94));
        assert!(Register::is_ignored_offset(0x9A4));
        assert!(!Register::is_ignored_offset(0x9A8));
        assert!(!Register::is_ignored_offset(0x04));
    }

    #[test]
    fn test_display() {
        assert_eq!(Register::Pad(CpuPort::Port6).to_string(), "PAD6_MODE (0xc)");
        assert_eq!(Register::LedNormal(LedIndex::Led1).to_string(), "LED_CTRL1 (0x54)");
        assert_eq!(RegisterSample::new(0xE4, 0x80000).to_string(), "0xe4 = 0x00080000");
        assert_eq!(PortContext::Phy4.to_string(), "phy4");
    }
}
