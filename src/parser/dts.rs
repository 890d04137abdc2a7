//! Device tree source scanner.
//!
//! Pulls `qca,ar8327-initvals` tables out of `.dts`/`.dtsi` text. This is a
//! line scanner, not a device tree compiler: it tracks which switch node it
//! is in from a few well-known node names and collects `0x<offset>
//! 0x<value>` pairs until the property is closed.
//!
//! ```dts
//! switch0@1f {
//!     compatible = "qca,ar8327";
//!     qca,ar8327-initvals = <
//!         0x04 0x07600000 /* PAD0_MODE */
//!         0x0c 0x80       /* PAD6_MODE */
//!     >;
//! };
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::device::{PortContext, RegisterSample};

/// Compiled regex patterns used by the scanner.
struct Patterns {
    /// `0x<offset> 0x<value>`
    pair: Regex,
    /// Node names that select the phy0 context
    phy0_marker: Regex,
    /// Node names that select the phy4 context
    phy4_marker: Regex,
    /// Assignment that opens a table
    property: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    pair: Regex::new(r"0[xX]([0-9a-fA-F]+)\s+0[xX]([0-9a-fA-F]+)").unwrap(),
    // The bare compatible string, not the initvals property
    phy0_marker: Regex::new(r#"ethernet-phy@0|ethernet-switch@0|switch0@1f|"qca,ar8327""#).unwrap(),
    phy4_marker: Regex::new(r"ethernet-phy@4|ethernet-switch@4").unwrap(),
    property: Regex::new(r"qca,ar8327-initvals\s*=").unwrap(),
});

const BLOCK_END: &str = ">;";

/// Error type for scanning failures.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `qca,ar8327-initvals` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitvalsBlock {
    pub context: PortContext,
    /// 1-based line of the property
    pub line: usize,
    /// Pairs in first-seen order
    pub samples: Vec<RegisterSample>,
}

impl InitvalsBlock {
    fn new(context: PortContext, line: usize) -> Self {
        Self {
            context,
            line,
            samples: Vec::new(),
        }
    }

    /// Add a pair; a repeated offset overwrites the earlier value.
    fn record(&mut self, sample: RegisterSample) {
        match self.samples.iter_mut().find(|s| s.offset == sample.offset) {
            Some(existing) => {
                log::debug!(
                    "offset {:#x} repeated, {:#x} replaces {:#x}",
                    sample.offset,
                    sample.value,
                    existing.value
                );
                existing.value = sample.value;
            }
            None => self.samples.push(sample),
        }
    }
}

/// Remove `//` and `/* */` comments from one line.
///
/// `in_block` carries an unterminated `/*` over to the next line.
fn strip_comments(line: &str, in_block: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_block {
            match rest.find("*/") {
                Some(end) => {
                    rest = &rest[end + 2..];
                    *in_block = false;
                }
                None => return out,
            }
        }

        let line_comment = rest.find("//");
        let block_comment = rest.find("/*");
        match (line_comment, block_comment) {
            (Some(l), Some(b)) if l < b => {
                out.push_str(&rest[..l]);
                return out;
            }
            (_, Some(b)) => {
                out.push_str(&rest[..b]);
                out.push(' ');
                rest = &rest[b + 2..];
                *in_block = true;
            }
            (Some(l), None) => {
                out.push_str(&rest[..l]);
                return out;
            }
            (None, None) => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

fn parse_hex(digits: &str, line: usize) -> Option<u32> {
    match u32::from_str_radix(digits, 16) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("line {}: skipping hex literal 0x{}: {}", line, digits, e);
            None
        }
    }
}

fn collect_pairs(text: &str, line: usize, block: &mut InitvalsBlock) {
    for caps in PATTERNS.pair.captures_iter(text) {
        let (Some(offset), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let (Some(offset), Some(value)) = (parse_hex(offset.as_str(), line), parse_hex(value.as_str(), line)) else {
            continue;
        };
        block.record(RegisterSample::new(offset, value));
    }
}

/// Scan device tree source text for initvals tables.
pub fn scan_str(text: &str) -> Vec<InitvalsBlock> {
    let mut blocks = Vec::new();
    let mut context = PortContext::default();
    let mut current: Option<InitvalsBlock> = None;
    let mut in_comment = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comments(raw, &mut in_comment);

        if PATTERNS.phy0_marker.is_match(&line) {
            context = PortContext::Phy0;
        }
        if PATTERNS.phy4_marker.is_match(&line) {
            context = PortContext::Phy4;
        }

        let mut body = line.as_str();
        if let Some(found) = PATTERNS.property.find(&line) {
            if let Some(open) = current.take() {
                log::warn!("line {}: unterminated initvals table from line {}", line_no, open.line);
                blocks.push(open);
            }
            log::debug!("line {}: initvals table for {}", line_no, context);
            current = Some(InitvalsBlock::new(context, line_no));
            body = &line[found.end()..];
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        let closes = body.find(BLOCK_END);
        collect_pairs(closes.map_or(body, |end| &body[..end]), line_no, block);

        if closes.is_some() {
            if let Some(done) = current.take() {
                log::debug!("line {}: table closed with {} registers", line_no, done.samples.len());
                blocks.push(done);
            }
        }
    }

    if let Some(open) = current {
        log::warn!("initvals table from line {} is never closed", open.line);
        blocks.push(open);
    }

    blocks
}

/// Read and scan one file.
///
/// Invalid UTF-8 (typically Latin-1 in comments) is replaced, not rejected.
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<InitvalsBlock>, ScanError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let blocks = scan_str(&String::from_utf8_lossy(&bytes));
    log::debug!("{}: {} initvals table(s)", path.display(), blocks.len());
    Ok(blocks)
}
