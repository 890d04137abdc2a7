//! Per-register decode results.

use std::fmt;

use super::field::Coverage;
use super::residual::Diagnostic;
use crate::device::Register;

/// Everything produced for one register sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub register: Register,
    /// Raw value that was decoded
    pub value: u32,
    /// Decoded tokens, only filled in verbose mode
    pub tokens: Vec<String>,
    /// Advisory lines, in reading order
    pub advisories: Vec<String>,
    /// Residual bits, if any
    pub diagnostic: Option<Diagnostic>,
    pub coverage: Coverage,
}

impl Report {
    pub fn new(register: Register, value: u32) -> Self {
        Self {
            register,
            value,
            tokens: Vec::new(),
            advisories: Vec::new(),
            diagnostic: None,
            coverage: Coverage::default(),
        }
    }

    pub fn advise(&mut self, line: impl Into<String>) {
        self.advisories.push(line.into());
    }

    /// Record the decoded tokens when verbose output is on.
    pub fn trace(&mut self, verbose: bool, tokens: Vec<String>) {
        log::debug!("{}: {:?}", self.register, tokens);
        if verbose {
            self.tokens.extend(tokens);
        }
    }

    /// True if decoding produced neither advice nor diagnostics.
    pub fn is_quiet(&self) -> bool {
        self.advisories.is_empty() && self.diagnostic.is_none()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {:#010x}", self.register, self.value)?;
        if !self.tokens.is_empty() {
            writeln!(f, "  tokens: [{}]", self.tokens.join(", "))?;
        }
        for line in &self.advisories {
            writeln!(f, "  {}", line)?;
        }
        if let Some(diag) = &self.diagnostic {
            writeln!(f, "  {}", diag)?;
        }
        Ok(())
    }
}
