use std::fmt::{Display, Formatter};

/// Byte that closes a frame on the wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    #[default]
    CarriageReturn,
    LineFeed,
}

impl Terminator {
    pub fn byte(&self) -> u8 {
        match self {
            Terminator::CarriageReturn => b'\r',
            Terminator::LineFeed => b'\n',
        }
    }
}

/// One terminator-delimited frame with surrounding CR/LF removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord(Vec<u8>);

impl LineRecord {
    /// Builds a record from raw frame bytes, trimming CR and LF on both ends.
    pub fn from_raw(raw: &[u8]) -> Self {
        let is_eol = |b: &u8| *b == b'\r' || *b == b'\n';
        let start = raw.iter().position(|b| !is_eol(b)).unwrap_or(raw.len());
        let end = raw.iter().rposition(|b| !is_eol(b)).map_or(start, |idx| idx + 1);
        LineRecord(raw[start..end].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LineRecord {
    fn from(value: &str) -> Self {
        LineRecord::from_raw(value.as_bytes())
    }
}

impl Display for LineRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
