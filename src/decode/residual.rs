//! Residual bit validation.

use std::fmt;

use crate::device::Register;

/// Bits left set after every documented field was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub register: Register,
    /// Leftover bits, in register coordinates
    pub bits: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "!! unconverted bits {:#x} remain in {}",
            self.bits, self.register
        )
    }
}

/// Report leftover bits for `register`, if any.
///
/// Never fails the run; a nonzero remainder is logged and returned so the
/// caller can print it next to the advisories already produced.
pub fn check(register: Register, leftover: u32) -> Option<Diagnostic> {
    if leftover == 0 {
        return None;
    }
    let diag = Diagnostic {
        register,
        bits: leftover,
    };
    log::warn!("{}", diag);
    Some(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::CpuPort;

    #[test]
    fn test_clean_register() {
        assert_eq!(check(Register::PowerStrap, 0), None);
    }

    #[test]
    fn test_leftover_reported() {
        let diag = check(Register::Pad(CpuPort::Port5), 0x48).unwrap();
        assert_eq!(diag.bits, 0x48);
        let text = diag.to_string();
        assert!(text.contains("0x48"), "{}", text);
        assert!(text.contains("PAD5_MODE (0x8)"), "{}", text);
    }
}
